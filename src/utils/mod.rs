pub(crate) mod extent;

/// Formats a coordinate for markup. Without a precision the shortest text that reads back to the same value is used, otherwise the value is rounded and trailing zeros are dropped.
pub(crate) fn format_number(value: f64, precision: Option<usize>) -> String {
    let text = match precision {
        Some(digits) => {
            let rounded = format!("{value:.digits$}");
            if rounded.contains('.') {
                rounded.trim_end_matches('0').trim_end_matches('.').to_owned()
            } else {
                rounded
            }
        },
        None => format!("{value}")
    };
    // "-0" only comes from rounding tiny negative numbers
    if text == "-0" {
        "0".to_owned()
    } else {
        text
    }
}

#[cfg(test)]
mod test {

    use super::format_number;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(250.0, None), "250");
        assert_eq!(format_number(12.5, None), "12.5");
        assert_eq!(format_number(12.3456, Some(2)), "12.35");
        assert_eq!(format_number(12.0001, Some(2)), "12");
        assert_eq!(format_number(-0.0001, Some(1)), "0");
        assert_eq!(format_number(7.0, Some(0)), "7");
    }
}

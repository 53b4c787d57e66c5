use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::layers::Feature;

pub(crate) const LOCAL_AUTHORITY_FIELD: &str = "local_auth";
pub(crate) const NAME_FIELD: &str = "NAME";
pub(crate) const COUNTY_NAME_FIELD: &str = "CountyName";
pub(crate) const FIRST_NAME_FIELD: &str = "NAME1";
pub(crate) const SECOND_NAME_FIELD: &str = "NAME2";
pub(crate) const SECOND_NAME_LANGUAGE_FIELD: &str = "NAME2_LANG";
pub(crate) const ENGLISH_LANGUAGE_CODE: &str = "eng";
pub(crate) const LATIN_NAME_FIELD: &str = "NAME_LATN";

/// Something that can name a feature from its properties.
pub(crate) trait IdentifyFeature {

    fn identify(&self, feature: &Feature) -> Option<String>;

}

/// How a layer's features are given their identifiers.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Serialize,Deserialize,JsonSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum IdentifierRule {
    /// The `local_auth` property.
    LocalAuthority,
    /// The `NAME` property.
    EnglandWalesCounty,
    /// The `CountyName` property.
    CountyBoundary,
    /// `NAME` if present. Otherwise `NAME2` when `NAME2_LANG` is "eng", and `NAME1` when it isn't.
    BilingualName,
    /// The `NAME_LATN` property.
    Region,
}

fn property_text(feature: &Feature, name: &str) -> Option<String> {
    match feature.property(name)? {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::Null | serde_json::Value::Bool(_) | serde_json::Value::Array(_) | serde_json::Value::Object(_) => None
    }
}

impl IdentifyFeature for IdentifierRule {

    fn identify(&self, feature: &Feature) -> Option<String> {
        match self {
            Self::LocalAuthority => property_text(feature, LOCAL_AUTHORITY_FIELD),
            Self::EnglandWalesCounty => property_text(feature, NAME_FIELD),
            Self::CountyBoundary => property_text(feature, COUNTY_NAME_FIELD),
            Self::BilingualName => {
                if feature.property(NAME_FIELD).is_some() {
                    property_text(feature, NAME_FIELD)
                } else if feature.property(SECOND_NAME_LANGUAGE_FIELD).and_then(serde_json::Value::as_str) == Some(ENGLISH_LANGUAGE_CODE) {
                    property_text(feature, SECOND_NAME_FIELD)
                } else {
                    property_text(feature, FIRST_NAME_FIELD)
                }
            },
            Self::Region => property_text(feature, LATIN_NAME_FIELD),
        }
    }
}

/**
Looks up the identifier rule for a layer by its name. Layers that aren't listed use the county boundary rule.
*/
#[derive(Clone,Debug)]
pub(crate) struct IdentifierRules {
    rules: BTreeMap<String,IdentifierRule>,
    fallback: IdentifierRule
}

impl IdentifierRules {

    pub(crate) fn rule_for(&self, layer: &str) -> IdentifierRule {
        self.rules.get(layer).copied().unwrap_or(self.fallback)
    }

    pub(crate) fn identify(&self, layer: &str, feature: &Feature) -> Option<String> {
        self.rule_for(layer).identify(feature)
    }

    pub(crate) fn with_rules<'rules, Rules: IntoIterator<Item = (&'rules String,&'rules IdentifierRule)>>(mut self, rules: Rules) -> Self {
        for (layer,rule) in rules {
            _ = self.rules.insert(layer.clone(), *rule);
        }
        self
    }

}

impl Default for IdentifierRules {

    fn default() -> Self {
        let rules = [
            ("local-authorities", IdentifierRule::LocalAuthority),
            ("pub_las", IdentifierRule::LocalAuthority),
            ("england-wales-counties", IdentifierRule::EnglandWalesCounty),
            ("england_wales_counties", IdentifierRule::EnglandWalesCounty),
            ("county-boundaries", IdentifierRule::CountyBoundary),
            ("OSNI_Open_Data_-_Largescale_Boundaries_-_County_Boundaries_", IdentifierRule::CountyBoundary),
            ("cities", IdentifierRule::BilingualName),
            ("gb_cities", IdentifierRule::BilingualName),
            ("ni_cities", IdentifierRule::BilingualName),
            ("regions", IdentifierRule::Region),
            ("NUTS_RG_03M_2021_3035", IdentifierRule::Region),
        ].into_iter().map(|(layer,rule)| (layer.to_owned(),rule)).collect();

        Self {
            rules,
            fallback: IdentifierRule::CountyBoundary
        }
    }
}

#[cfg(test)]
mod test {

    use std::collections::BTreeMap;

    use serde_json::json;

    use super::IdentifierRule;
    use super::IdentifierRules;
    use crate::layers::Feature;

    fn feature(properties: serde_json::Value) -> Feature {
        match properties {
            serde_json::Value::Object(properties) => Feature {
                geometry: None,
                properties
            },
            _ => panic!("test properties should be an object")
        }
    }

    #[test]
    fn test_local_authorities() {
        let rules = IdentifierRules::default();
        assert_eq!(rules.identify("local-authorities", &feature(json!({ "local_auth": "Cork County", "NAME": "ignored" }))), Some("Cork County".to_owned()));
        assert_eq!(rules.identify("local-authorities", &feature(json!({ "NAME": "ignored" }))), None);
    }

    #[test]
    fn test_england_wales_counties() {
        let rules = IdentifierRules::default();
        assert_eq!(rules.identify("england-wales-counties", &feature(json!({ "NAME": "Kent", "CountyName": "ignored" }))), Some("Kent".to_owned()));
    }

    #[test]
    fn test_fallback_is_county_name() {
        let rules = IdentifierRules::default();
        assert_eq!(rules.identify("county-boundaries", &feature(json!({ "CountyName": "ANTRIM" }))), Some("ANTRIM".to_owned()));
        assert_eq!(rules.identify("some_other_layer", &feature(json!({ "CountyName": "DOWN", "NAME": "ignored" }))), Some("DOWN".to_owned()));
        assert_eq!(rules.rule_for("some_other_layer"), IdentifierRule::CountyBoundary);
    }

    #[test]
    fn test_bilingual_fallback() {
        let rules = IdentifierRules::default();
        assert_eq!(rules.identify("cities", &feature(json!({ "NAME1": "Caerdydd", "NAME2": "Cardiff", "NAME2_LANG": "eng" }))), Some("Cardiff".to_owned()));
        assert_eq!(rules.identify("cities", &feature(json!({ "NAME1": "Abertawe", "NAME2": "Swansea", "NAME2_LANG": "wel" }))), Some("Abertawe".to_owned()));
        assert_eq!(rules.identify("cities", &feature(json!({ "NAME1": "Inverness" }))), Some("Inverness".to_owned()));
        assert_eq!(rules.identify("cities", &feature(json!({ "NAME": "Newport", "NAME1": "Casnewydd", "NAME2": "Newport", "NAME2_LANG": "eng" }))), Some("Newport".to_owned()));
        assert_eq!(rules.identify("cities", &feature(json!({ "NAME": "Belfast", "NAME1": "Béal Feirste", "NAME2_LANG": "gle" }))), Some("Belfast".to_owned()));
    }

    #[test]
    fn test_regions() {
        let rules = IdentifierRules::default();
        assert_eq!(rules.identify("regions", &feature(json!({ "NAME_LATN": "Wales" }))), Some("Wales".to_owned()));
    }

    #[test]
    fn test_non_text_values() {
        let rules = IdentifierRules::default();
        assert_eq!(rules.identify("county-boundaries", &feature(json!({ "CountyName": 12 }))), Some("12".to_owned()));
        assert_eq!(rules.identify("county-boundaries", &feature(json!({ "CountyName": null }))), None);
        assert_eq!(rules.identify("county-boundaries", &feature(json!({ "CountyName": true }))), None);
    }

    #[test]
    fn test_overridden_rules() {
        let overrides: BTreeMap<String,IdentifierRule> = [("wards".to_owned(), IdentifierRule::LocalAuthority)].into_iter().collect();
        let rules = IdentifierRules::default().with_rules(&overrides);
        assert_eq!(rules.identify("wards", &feature(json!({ "local_auth": "Fingal" }))), Some("Fingal".to_owned()));
        assert_eq!(rules.rule_for("gb_cities"), IdentifierRule::BilingualName);
    }
}

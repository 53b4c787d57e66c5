/*!
Boundmap draws county, city and region boundary maps of Ireland and the UK as SVG, from TopoJSON or GeoJSON sources. Run it with `--help` for the list of maps it knows how to draw.
*/

#![warn(noop_method_call)]
#![warn(single_use_lifetimes)]
#![warn(unused_lifetimes)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_crate_dependencies)]
#![warn(meta_variable_misuse)]
#![warn(unused_macro_rules)]
#![warn(unused_qualifications)]
#![warn(unused_results)] // Most of these come from map and set inserts. `_ = ` gets around it where the result really doesn't matter.
#![warn(variant_size_differences)]

use clap::Parser;

pub(crate) mod errors;
pub(crate) mod commands;
pub(crate) mod utils;
pub(crate) mod progress;
pub(crate) mod geometry;
pub(crate) mod layers;
pub(crate) mod projection;
pub(crate) mod identify;
pub(crate) mod plans;
pub(crate) mod markers;
pub(crate) mod render;
pub(crate) mod svg_document;
pub(crate) mod map;

use errors::ProgramError;

use commands::Boundmap;
use commands::Task;
use progress::ConsoleProgressBar;

/**
Runs Boundmap with arbitrary arguments. The first item in the arguments will be ignored. All output will be printed to Stdout or Stderr.
*/
fn run<Arg, Args>(args: &mut Args) -> Result<(),ProgramError>
where
    Arg: Clone + Into<std::ffi::OsString>,
    Args: Iterator<Item = Arg>
{
    let mut progress = ConsoleProgressBar::new();
    let command = Boundmap::try_parse_from(args)?;
    command.run(&mut progress)?;
    Ok(())
}

fn main() -> std::process::ExitCode {
    let mut args = std::env::args();
    // Returning a Result from main would print the error with Debug, not Display.
    match run(&mut args) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}",err);
            std::process::ExitCode::FAILURE
        }
    }
}

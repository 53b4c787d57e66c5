use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;

use crate::errors::CommandError;
use crate::map::MapOptions;
use crate::progress::ProgressObserver;
use crate::projection::Canvas;

mod maps;
mod show_plan;
mod docs;

use maps::Counties;
use maps::CountyBoundaries;
use maps::Cities;
use maps::Regions;
use maps::Render;
use show_plan::ShowPlan;
use docs::Docs;


pub(crate) trait Task {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError>;

}

#[macro_export]
macro_rules! subcommand_def {
    ($(#[$attr: meta])* $vis: vis struct $name: ident {$($body: tt)*}) => {

        #[derive(Args)]
        $(#[$attr])*
        $vis struct $name {
            $($body)*
        }
    };
}

#[macro_export]
macro_rules! command_def {
    ($struct_name: ident {$($command_name: ident),*}) => {

        #[derive(Subcommand)]
        pub(crate) enum $struct_name {
            $(
                $command_name($command_name)
            ),*
        }

        impl Task for $struct_name {

            fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
                match self {
                    $(Self::$command_name(a) => a.run(progress)),*
                }
            }

        }
    };
}

// "Docs" is hidden, it's only used to refresh the documentation in the repository.

command_def!{
    MainCommand {
        Counties,
        CountyBoundaries,
        Cities,
        Regions,
        Render,
        ShowPlan,
        Docs
    }
}

subcommand_def!{
    /// Arguments shared by every command that draws a map.
    #[derive(Clone)]
    pub(crate) struct MapArgs {

        /// The TopoJSON or GeoJSON file containing the boundaries
        source: PathBuf,

        /// The path to write the SVG map to
        target: PathBuf,

        #[arg(long,default_value_t=Canvas::DEFAULT_WIDTH)]
        /// Width of the drawing canvas, in SVG user units
        width: u32,

        #[arg(long,default_value_t=Canvas::DEFAULT_HEIGHT)]
        /// Height of the drawing canvas, in SVG user units
        height: u32,

        #[arg(long)]
        /// Number of decimal places written for coordinates. If not specified, coordinates are written at full precision.
        precision: Option<usize>,

        #[arg(long)]
        /// The layer name to use when the source is a plain GeoJSON FeatureCollection. Defaults to the first layer the map needs.
        geojson_layer: Option<String>,

        #[arg(long)]
        /// A city to leave out of the city markers, because it's drawn in more detail elsewhere.
        exclude_capital: Option<String>

    }
}

impl MapArgs {

    pub(crate) fn options(&self) -> MapOptions {
        MapOptions {
            canvas: Canvas {
                width: self.width,
                height: self.height
            },
            precision: self.precision,
            geojson_layer: self.geojson_layer.clone()
        }
    }

}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Boundmap {
    #[command(subcommand)]
    pub(crate) command: MainCommand
}

impl Task for Boundmap {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
        self.command.run(progress)
    }
}

use std::path::PathBuf;

use clap::Args;

use super::MapArgs;
use super::Task;
use crate::errors::CommandError;
use crate::map::draw_map;
use crate::map::read_input;
use crate::map::write_output;
use crate::plans::RenderPlan;
use crate::progress::ProgressObserver;
use crate::subcommand_def;

fn draw_plan<Progress: ProgressObserver>(mut plan: RenderPlan, args: &MapArgs, progress: &mut Progress) -> Result<(),CommandError> {

    if let Some(capital) = &args.exclude_capital {
        plan.excluded_capital = Some(capital.clone());
    }

    let source = read_input(&args.source)?;

    let text = draw_map(&source, &plan, &args.options(), progress)?;

    progress.announce(|| "Writing map");
    write_output(&args.target, &text)

}

subcommand_def!{
    /// Draws counties of Ireland and the UK, with cities that are also counties marked at their centers
    pub(crate) struct Counties {

        #[command(flatten)]
        map: MapArgs

    }
}

impl Task for Counties {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
        draw_plan(RenderPlan::counties(), &self.map, progress)
    }
}

subcommand_def!{
    /// Draws every county of Ireland and the UK as a boundary
    pub(crate) struct CountyBoundaries {

        #[command(flatten)]
        map: MapArgs

    }
}

impl Task for CountyBoundaries {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
        draw_plan(RenderPlan::county_boundaries(), &self.map, progress)
    }
}

subcommand_def!{
    /// Draws counties of Ireland and the UK, with the cities marked from the city layers
    pub(crate) struct Cities {

        #[command(flatten)]
        map: MapArgs

    }
}

impl Task for Cities {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
        draw_plan(RenderPlan::cities(), &self.map, progress)
    }
}

subcommand_def!{
    /// Draws NUTS regions, with Ireland as a dashed outline
    pub(crate) struct Regions {

        #[command(flatten)]
        map: MapArgs

    }
}

impl Task for Regions {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
        draw_plan(RenderPlan::regions(), &self.map, progress)
    }
}

subcommand_def!{
    /// Draws a map described by a render plan file
    pub(crate) struct Render {

        #[command(flatten)]
        map: MapArgs,

        #[arg(long)]
        /// The JSON file describing the layers to draw, see `show-plan` for examples
        plan_file: PathBuf

    }
}

impl Task for Render {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
        let plan = RenderPlan::from_file(&self.plan_file)?;
        draw_plan(plan, &self.map, progress)
    }
}

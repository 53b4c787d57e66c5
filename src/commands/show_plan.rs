use clap::Args;

use super::Task;
use crate::errors::CommandError;
use crate::plans::RenderPlan;
use crate::plans::BUILTIN_PLANS;
use crate::progress::ProgressObserver;
use crate::subcommand_def;

subcommand_def!{
    /// Prints one of the built-in render plans as JSON, as a starting point for a plan file
    pub(crate) struct ShowPlan {

        #[arg(value_parser=BUILTIN_PLANS)]
        /// The built-in plan to print
        name: String

    }
}

impl Task for ShowPlan {

    fn run<Progress: ProgressObserver>(self, _: &mut Progress) -> Result<(),CommandError> {
        let plan = RenderPlan::builtin(&self.name)?;
        let text = serde_json::to_string_pretty(&plan).map_err(|e| CommandError::PlanFileRead(format!("{e}")))?;
        println!("{text}");
        Ok(())
    }
}

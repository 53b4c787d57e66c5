use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use clap_markdown::help_markdown;
use schemars::schema_for;

use super::Boundmap;
use super::Task;
use crate::errors::CommandError;
use crate::plans::RenderPlan;
use crate::progress::ProgressObserver;
use crate::subcommand_def;

const CLI_DOCS_FILE: &str = "cli.md";
const PLAN_SCHEMA_FILE: &str = "render_plan.schema.json";

fn write_cli_docs(target: PathBuf) -> Result<(),CommandError> {
    let mut target = File::create(target).map_err(|e| CommandError::SchemaWrite(format!("{e}")))?;
    write!(&mut target,"{}",help_markdown::<Boundmap>()).map_err(|e| CommandError::SchemaWrite(format!("{e}")))
}

fn write_plan_schema(target: PathBuf) -> Result<(),CommandError> {
    let mut target = File::create(target).map_err(|e| CommandError::SchemaWrite(format!("{e}")))?;
    let schema = schema_for!(RenderPlan);
    let text = serde_json::to_string_pretty(&schema).map_err(|e| CommandError::SchemaWrite(format!("{e}")))?;
    write!(&mut target,"{text}").map_err(|e| CommandError::SchemaWrite(format!("{e}")))
}

subcommand_def!{
    /// Writes the command line documentation and the render plan JSON schema to a folder.
    #[command(hide=true)]
    pub(crate) struct Docs {

        #[arg(long)]
        /// The folder to output the generated documentation to
        target: PathBuf

    }
}

impl Task for Docs {
    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
        progress.announce(|| "Writing command line documentation");
        write_cli_docs(self.target.join(CLI_DOCS_FILE))?;
        progress.announce(|| "Writing render plan schema");
        write_plan_schema(self.target.join(PLAN_SCHEMA_FILE))
    }
}

//! Command execution implementations

use super::Commands;
use super::{icon, inspect, materials, pack, run};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Pack {
                input,
                output,
                resource_dir,
                quiet,
            } => pack::execute(input, output, resource_dir.as_deref(), *quiet),
            Commands::BindMaterials {
                input,
                output,
                mapping,
                quiet,
            } => materials::execute(input, output.as_deref(), mapping.as_deref(), *quiet),
            Commands::CopyIcon {
                source,
                destination,
            } => icon::execute(source, destination),
            Commands::Inspect { path } => inspect::execute(path),
            Commands::Run { config, quiet } => run::execute(config, *quiet),
        }
    }
}

use clap::{Parser, Subcommand};

use crate::model::ComponentName;

/// Resolves component dependencies and assembles ordered source distributions.
#[derive(Debug, Parser)]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub cmd: Command,
    #[arg(short, long, default_value = ".")]
    /// Project root directory; every other path is relative to it.
    pub root: String,
    #[arg(short, long, default_value = "componentry.toml")]
    /// Location of the componentry manifest file.
    pub module_location: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prints the requested components and their dependencies in build order
    Resolve {
        #[arg(required = true)]
        components: Vec<String>,
    },
    /// Concatenates component sources into the distribution file
    Build {
        /// Components to build. Defaults to the manifest's `default` list
        components: Vec<String>,
        #[arg(short, long)]
        /// Directory holding the component sources
        src_dir: Option<String>,
        #[arg(short, long)]
        /// Distribution file to write
        output: Option<String>,
    },
    /// Creates an initial componentry manifest in the provided directory
    Init {
        #[arg(default_value = ".")]
        directory: String,
        #[arg(short, long)]
        name: Option<String>,
    },
}

pub fn component_names(components: Vec<String>) -> Vec<ComponentName> {
    components.into_iter().map(ComponentName::from).collect()
}

use std::path::PathBuf;

use crate::{
    cli::command_handlers::{do_build, do_init, do_resolve},
    model::ComponentName,
};

mod builder;

pub use builder::ComponentryBuilder;

pub struct Componentry {
    root: PathBuf,
    module_file_name: PathBuf,
    src_dir: Option<PathBuf>,
    dist_file: Option<PathBuf>,
}

impl Componentry {
    pub fn builder() -> ComponentryBuilder {
        ComponentryBuilder::default()
    }

    /// Creates an initial componentry manifest
    pub fn init(&self, name: Option<String>) -> anyhow::Result<()> {
        do_init(&self.root, name, &self.module_file_name)
    }

    /// Resolves components declared in the manifest into dependency order
    pub fn resolve(&self, components: &[ComponentName]) -> anyhow::Result<Vec<ComponentName>> {
        do_resolve(&self.root, &self.module_file_name, components)
    }

    /// Writes the distribution file for the given components, or for the manifest
    /// defaults when none are given. Returns the path that was written.
    pub fn build(&self, components: &[ComponentName]) -> anyhow::Result<PathBuf> {
        do_build(
            &self.root,
            &self.module_file_name,
            components,
            self.src_dir.as_deref(),
            self.dist_file.as_deref(),
        )
    }
}

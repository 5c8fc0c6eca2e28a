use std::{env, path::PathBuf};

use crate::{config::ComponentryConfig, Componentry};

#[derive(Default)]
pub struct ComponentryBuilder {
    // All other paths are relative to `root`
    root: Option<PathBuf>,
    module_file_name: Option<PathBuf>,
    src_dir: Option<PathBuf>,
    dist_file: Option<PathBuf>,
    config: Option<ComponentryConfig>,
}

impl ComponentryBuilder {
    /// Project root directory.
    ///
    /// Defaults to the current directory.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Name of the componentry manifest toml file.
    ///
    /// Defaults to `componentry.toml`.
    pub fn module_file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.module_file_name = Some(path.into());
        self
    }

    /// Directory holding the component sources.
    /// It will override `src_dir` from the manifest and `COMPONENTRY_SRC_DIR`.
    pub fn src_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.src_dir = Some(path.into());
        self
    }

    /// Distribution file to write.
    /// It will override `dist_file` from the manifest and `COMPONENTRY_DIST_FILE`.
    pub fn dist_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dist_file = Some(path.into());
        self
    }

    /// Environment overrides to use instead of reading `COMPONENTRY_*` variables.
    pub fn config(mut self, config: ComponentryConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn try_build(self) -> anyhow::Result<Componentry> {
        let Self {
            root,
            module_file_name,
            src_dir,
            dist_file,
            config,
        } = self;
        let root = match root {
            Some(root) => root,
            None => env::current_dir()?,
        };

        let module_file_name =
            module_file_name.unwrap_or_else(|| PathBuf::from("componentry.toml"));

        let config = match config {
            Some(config) => config,
            None => ComponentryConfig::load()?,
        };

        Ok(Componentry {
            root,
            module_file_name,
            src_dir: src_dir.or(config.src_dir),
            dist_file: dist_file.or(config.dist_file),
        })
    }
}

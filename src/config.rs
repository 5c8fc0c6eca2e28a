use std::{collections::HashMap, path::PathBuf};

use config::{Config, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "COMPONENTRY";

/// Overrides read from `COMPONENTRY_SRC_DIR` and `COMPONENTRY_DIST_FILE`.
///
/// They take precedence over the manifest, but not over paths given on the
/// command line or to the builder.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ComponentryConfig {
    pub src_dir: Option<PathBuf>,
    pub dist_file: Option<PathBuf>,
}

impl ComponentryConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_env(None)
    }

    /// Reads the overrides from `env` instead of the process environment when given.
    pub fn from_env(env: Option<HashMap<String, String>>) -> anyhow::Result<Self> {
        // No key separator: `SRC_DIR` maps to the flat `src_dir` field.
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .source(env),
            )
            .build()?
            .try_deserialize::<Self>()?;
        Ok(config.without_empty_paths())
    }

    // `COMPONENTRY_SRC_DIR=` is treated as unset.
    fn without_empty_paths(self) -> Self {
        let non_empty = |path: Option<PathBuf>| path.filter(|p| !p.as_os_str().is_empty());
        Self {
            src_dir: non_empty(self.src_dir),
            dist_file: non_empty(self.dist_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn nothing_set() {
        let config = ComponentryConfig::from_env(env(&[])).unwrap();
        assert_eq!(config, ComponentryConfig::default());
    }

    #[test]
    fn both_overrides() {
        let config = ComponentryConfig::from_env(env(&[
            ("COMPONENTRY_SRC_DIR", "/work/src"),
            ("COMPONENTRY_DIST_FILE", "out/bundle.js"),
        ]))
        .unwrap();
        assert_eq!(
            config,
            ComponentryConfig {
                src_dir: Some("/work/src".into()),
                dist_file: Some("out/bundle.js".into()),
            }
        );
    }

    #[test]
    fn unrelated_and_empty_variables_are_ignored() {
        let config = ComponentryConfig::from_env(env(&[
            ("COMPONENTRY_SRC_DIR", ""),
            ("OTHER_DIST_FILE", "elsewhere.js"),
        ]))
        .unwrap();
        assert_eq!(config, ComponentryConfig::default());
    }
}

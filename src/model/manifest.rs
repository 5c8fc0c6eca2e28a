use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::{debug, error};
use toml::{map::Map, Value};

use crate::model::{ComponentName, DependencyGraph, ParseError};

pub const DEFAULT_SOURCE_DIRECTORY: &str = "src";
pub const DEFAULT_EXTENSION: &str = "js";

/// Project description read from `componentry.toml`.
#[derive(PartialEq, Debug, Clone)]
pub struct Manifest {
    pub name: String,
    /// Component always emitted first in a distribution.
    pub core: Option<ComponentName>,
    pub src_dir: Option<PathBuf>,
    pub dist_file: Option<PathBuf>,
    pub extension: Option<String>,
    /// Components built when none are requested explicitly.
    pub default: Option<Vec<ComponentName>>,
    pub components: DependencyGraph,
}

impl Manifest {
    pub fn new(name: String) -> Self {
        Manifest {
            name,
            core: None,
            src_dir: None,
            dist_file: None,
            extension: None,
            default: None,
            components: DependencyGraph::new(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Manifest, ParseError> {
        debug!("Attempting to read manifest from {}", path.display());
        let contents = std::fs::read_to_string(path)?;

        let manifest = Manifest::from_toml_str(&contents);
        if let Err(err) = &manifest {
            error!("Could not build a valid manifest from {} due to err {err}", path.display())
        }
        manifest
    }

    pub fn from_toml_str(data: &str) -> Result<Manifest, ParseError> {
        let mut toml_value = toml::from_str::<HashMap<String, Value>>(data)?;

        let name = toml_value
            .remove("name")
            .ok_or_else(|| ParseError::MissingKey("name".to_string()))
            .and_then(|v| v.try_into::<String>().map_err(|e| e.into()))?;

        let core = toml_value
            .remove("core")
            .map(|v| v.try_into::<String>())
            .map_or(Ok(None), |v| v.map(Some))?
            .map(|core| ComponentName::parse(&core, "core"))
            .transpose()?;

        let src_dir = toml_value
            .remove("src_dir")
            .map(|v| v.try_into::<PathBuf>())
            .map_or(Ok(None), |v| v.map(Some))?;

        let dist_file = toml_value
            .remove("dist_file")
            .map(|v| v.try_into::<PathBuf>())
            .map_or(Ok(None), |v| v.map(Some))?;

        let extension = toml_value
            .remove("extension")
            .map(|v| v.try_into::<String>())
            .map_or(Ok(None), |v| v.map(Some))?;

        let default = toml_value
            .remove("default")
            .map(|v| v.try_into::<Vec<String>>())
            .map_or(Ok(None), |v| v.map(Some))?
            .map(|default| {
                default
                    .iter()
                    .map(|name| ComponentName::parse(name, "default"))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let components = match toml_value.remove("components") {
            Some(Value::Table(table)) => DependencyGraph::from_toml_table(&table)?,
            Some(other) => {
                return Err(ParseError::InvalidComponentsTable(
                    other.type_str().to_string(),
                ))
            }
            None => DependencyGraph::new(),
        };

        if let Some(key) = toml_value.into_keys().next() {
            return Err(ParseError::UnexpectedKey(key));
        }

        Ok(Manifest {
            name,
            core,
            src_dir,
            dist_file,
            extension,
            default,
            components,
        })
    }

    pub fn into_toml(self) -> Value {
        let mut manifest = Map::new();
        manifest.insert("name".to_string(), Value::String(self.name));
        if let Some(core) = self.core {
            manifest.insert("core".to_string(), Value::String(core.to_string()));
        }
        if let Some(src_dir) = self.src_dir {
            manifest.insert(
                "src_dir".to_string(),
                Value::String(src_dir.to_string_lossy().to_string()),
            );
        }
        if let Some(dist_file) = self.dist_file {
            manifest.insert(
                "dist_file".to_string(),
                Value::String(dist_file.to_string_lossy().to_string()),
            );
        }
        if let Some(extension) = self.extension {
            manifest.insert("extension".to_string(), Value::String(extension));
        }
        if let Some(default) = self.default {
            let default = default
                .into_iter()
                .map(|c| Value::String(c.to_string()))
                .collect();
            manifest.insert("default".to_string(), Value::Array(default));
        }
        manifest.insert(
            "components".to_string(),
            Value::Table(self.components.to_toml_table()),
        );
        Value::Table(manifest)
    }

    /// Components built when the caller does not name any: the `default` list, or
    /// every declared component.
    pub fn default_components(&self) -> Vec<ComponentName> {
        match &self.default {
            Some(default) => default.clone(),
            None => self.components.names().cloned().collect(),
        }
    }

    pub fn source_directory(&self) -> &Path {
        self.src_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_SOURCE_DIRECTORY))
    }

    pub fn distribution_file(&self) -> PathBuf {
        match &self.dist_file {
            Some(dist_file) => dist_file.clone(),
            None => Path::new("dist").join(format!("{}.{}", self.name, self.extension())),
        }
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }
}

use thiserror::Error;

pub mod component;
pub mod manifest;

pub use component::{ComponentName, DependencyGraph};
pub use manifest::Manifest;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading manifest toml: {0}")]
    IO(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Missing TOML key `{0}` while parsing")]
    MissingKey(String),
    #[error("Unexpected TOML key `{0}` in manifest")]
    UnexpectedKey(String),
    #[error("Dependencies of component `{0}` must be a string or an array of strings, found {1}")]
    InvalidDependencies(String, String),
    #[error("`components` must be a table of component names, found {0}")]
    InvalidComponentsTable(String),
    #[error("Component names must not be empty (in `{0}`)")]
    EmptyComponentName(String),
}

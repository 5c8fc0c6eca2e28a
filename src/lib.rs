pub mod cli;
pub mod config;
pub mod distrib;
pub mod model;
pub mod resolver;

mod api;

pub use api::{Componentry, ComponentryBuilder};
pub use model::ComponentName;
pub use resolver::{DependencyResolver, ResolveError};

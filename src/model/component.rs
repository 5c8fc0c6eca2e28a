use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
};

use toml::{Table, Value};

use crate::model::ParseError;

#[derive(Clone, Hash, PartialEq, Eq, Ord, PartialOrd)]
pub struct ComponentName(String);

impl ComponentName {
    /// Parses a name read from a manifest. `context` names the key it was read from.
    pub fn parse(name: &str, context: &str) -> Result<Self, ParseError> {
        if name.is_empty() {
            Err(ParseError::EmptyComponentName(context.to_string()))
        } else {
            Ok(ComponentName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ComponentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Quoted, so that stack snapshots read like `["a", "b"]` in diagnostics.
impl Debug for ComponentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl From<String> for ComponentName {
    fn from(s: String) -> Self {
        ComponentName(s)
    }
}

impl From<&str> for ComponentName {
    fn from(s: &str) -> Self {
        ComponentName(s.to_string())
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Mapping from a component to the components it requires, in declared order.
///
/// Values are never mutated once the graph is built. Cycles are allowed here and
/// only reported when the graph is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    entries: BTreeMap<ComponentName, Vec<ComponentName>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a TOML table whose values are either a single component
    /// name or an array of component names. A single name is read as a one-element
    /// dependency list.
    pub fn from_toml_table(table: &Table) -> Result<Self, ParseError> {
        let mut entries = BTreeMap::new();
        for (name, value) in table {
            let component = ComponentName::parse(name, "components")?;
            entries.insert(component, parse_dependencies(name, value)?);
        }
        Ok(DependencyGraph { entries })
    }

    pub fn insert<N, I, D>(&mut self, name: N, dependencies: I)
    where
        N: Into<ComponentName>,
        I: IntoIterator<Item = D>,
        D: Into<ComponentName>,
    {
        self.entries.insert(
            name.into(),
            dependencies.into_iter().map(Into::into).collect(),
        );
    }

    /// Declared direct dependencies, or `None` for components without an entry.
    pub fn dependencies_of(&self, name: &ComponentName) -> Option<&[ComponentName]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &ComponentName) -> bool {
        self.entries.contains_key(name)
    }

    /// Component names with an entry, sorted.
    pub fn names(&self) -> impl Iterator<Item = &ComponentName> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_toml_table(&self) -> Table {
        self.entries
            .iter()
            .map(|(name, dependencies)| {
                let dependencies = dependencies
                    .iter()
                    .map(|d| Value::String(d.to_string()))
                    .collect();
                (name.to_string(), Value::Array(dependencies))
            })
            .collect()
    }
}

impl<N, I, D> FromIterator<(N, I)> for DependencyGraph
where
    N: Into<ComponentName>,
    I: IntoIterator<Item = D>,
    D: Into<ComponentName>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut graph = DependencyGraph::new();
        for (name, dependencies) in iter {
            graph.insert(name, dependencies);
        }
        graph
    }
}

fn parse_dependencies(name: &str, value: &Value) -> Result<Vec<ComponentName>, ParseError> {
    match value {
        Value::String(dependency) => Ok(vec![ComponentName::parse(dependency, name)?]),
        Value::Array(dependencies) => dependencies
            .iter()
            .map(|dependency| match dependency {
                Value::String(dependency) => ComponentName::parse(dependency, name),
                other => Err(ParseError::InvalidDependencies(
                    name.to_string(),
                    format!("an array containing {}", other.type_str()),
                )),
            })
            .collect(),
        other => Err(ParseError::InvalidDependencies(
            name.to_string(),
            other.type_str().to_string(),
        )),
    }
}

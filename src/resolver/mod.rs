use std::collections::HashSet;

use log::{debug, trace};
use thiserror::Error;

use crate::model::{ComponentName, DependencyGraph};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Circular dependency on {component:?}, dependencies stack: {stack:?}")]
    CircularDependency {
        component: ComponentName,
        /// Components being expanded when the cycle was hit, outermost first.
        stack: Vec<ComponentName>,
    },
}

/// Orders components so that every component comes after everything it requires.
///
/// The resolution stack lives on the call, not on the resolver, so a resolver can be
/// shared across threads and stays usable after a failed resolution.
#[derive(Debug, Clone)]
pub struct DependencyResolver {
    graph: DependencyGraph,
}

impl DependencyResolver {
    pub fn new(graph: DependencyGraph) -> Self {
        DependencyResolver { graph }
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Resolves the requested components and all of their transitive dependencies.
    ///
    /// Every component appears once, at the position of its first occurrence in a
    /// depth-first walk that emits dependencies before the component itself.
    /// Components without a graph entry are kept as they are.
    pub fn resolve<I, N>(&self, components: I) -> Result<Vec<ComponentName>, ResolveError>
    where
        I: IntoIterator<Item = N>,
        N: Into<ComponentName>,
    {
        let requested: Vec<ComponentName> = components.into_iter().map(Into::into).collect();
        debug!("Resolving {:?}", requested);

        let mut stack = Vec::new();
        let resolved = self.resolve_all(&requested, &mut stack)?;

        debug!("Resolved order: {:?}", resolved);
        Ok(resolved)
    }

    fn resolve_all(
        &self,
        components: &[ComponentName],
        stack: &mut Vec<ComponentName>,
    ) -> Result<Vec<ComponentName>, ResolveError> {
        let mut resolved = Vec::new();

        for component in components {
            if stack.contains(component) {
                return Err(ResolveError::CircularDependency {
                    component: component.clone(),
                    stack: stack.clone(),
                });
            }

            if let Some(dependencies) = self.graph.dependencies_of(component) {
                trace!("Expanding {} -> {:?}", component, dependencies);
                stack.push(component.clone());
                let nested = self.resolve_all(dependencies, stack);
                stack.pop();
                resolved.extend(nested?);
            }

            resolved.push(component.clone());
        }

        Ok(dedup_first(resolved))
    }
}

fn dedup_first(components: Vec<ComponentName>) -> Vec<ComponentName> {
    let mut seen = HashSet::new();
    components
        .into_iter()
        .filter(|component| seen.insert(component.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use toml::toml;

    use super::*;

    use pretty_assertions::assert_eq;

    fn names(names: &[&str]) -> Vec<ComponentName> {
        names.iter().copied().map(ComponentName::from).collect()
    }

    fn resolver(graph: toml::Table) -> DependencyResolver {
        DependencyResolver::new(DependencyGraph::from_toml_table(&graph).unwrap())
    }

    #[test]
    fn empty_graph_keeps_request_order() {
        let resolver = DependencyResolver::new(DependencyGraph::new());
        assert_eq!(resolver.resolve(["a", "b"]).unwrap(), names(&["a", "b"]));
    }

    #[test]
    fn unknown_component_resolves_to_itself() {
        let resolver = resolver(toml! {
            a = ["b"]
        });
        assert_eq!(resolver.resolve(["x"]).unwrap(), names(&["x"]));
    }

    #[test]
    fn chain_is_reversed() {
        let resolver = resolver(toml! {
            a = ["b"]
            b = ["c"]
            c = []
        });
        assert_eq!(resolver.resolve(["a"]).unwrap(), names(&["c", "b", "a"]));
    }

    #[test]
    fn scalar_dependency() {
        let resolver = resolver(toml! {
            a = "b"
            b = []
        });
        assert_eq!(resolver.resolve(["a"]).unwrap(), names(&["b", "a"]));
    }

    #[test]
    fn shared_dependencies_are_collapsed() {
        let resolver = resolver(toml! {
            a = ["b", "c"]
            b = []
            c = ["b"]
        });
        assert_eq!(
            resolver.resolve(["a", "c"]).unwrap(),
            names(&["b", "c", "a"])
        );
    }

    #[test]
    fn duplicate_requests_are_collapsed() {
        let resolver = resolver(toml! {
            a = ["b"]
        });
        assert_eq!(
            resolver.resolve(["a", "b", "a", "z", "z"]).unwrap(),
            names(&["b", "a", "z"])
        );
    }

    #[test]
    fn circular_dependency_is_reported() {
        let resolver = resolver(toml! {
            a = ["b"]
            b = ["a"]
        });
        let err = resolver.resolve(["a"]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CircularDependency {
                component: "a".into(),
                stack: names(&["a", "b"]),
            }
        );
        assert_eq!(
            err.to_string(),
            r#"Circular dependency on "a", dependencies stack: ["a", "b"]"#
        );
    }

    #[test]
    fn resolver_is_reusable_after_cycle() {
        let resolver = resolver(toml! {
            a = ["b"]
            b = ["a"]
        });
        assert!(resolver.resolve(["a"]).is_err());
        assert_eq!(resolver.resolve(["x"]).unwrap(), names(&["x"]));
    }

    #[test]
    fn self_dependency_is_circular() {
        let resolver = resolver(toml! {
            a = ["a"]
        });
        let err = resolver.resolve(["a"]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CircularDependency {
                component: "a".into(),
                stack: names(&["a"]),
            }
        );
    }

    #[test]
    fn indirect_cycle_below_a_valid_root() {
        let resolver = resolver(toml! {
            root = ["core", "loop1"]
            core = []
            loop1 = ["loop2"]
            loop2 = ["loop3"]
            loop3 = ["loop1"]
        });
        let err = resolver.resolve(["root"]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::CircularDependency {
                component: "loop1".into(),
                stack: names(&["root", "loop1", "loop2", "loop3"]),
            }
        );
    }

    #[test]
    fn dependencies_come_before_dependents() {
        let resolver = resolver(toml! {
            window = ["core", "shadow", "effects"]
            dialog = ["window"]
            shadow = "core"
            effects = ["core"]
            carousel = ["core", "effects"]
            calendar = ["core"]
            core = []
        });
        let graph = resolver.graph().clone();
        let resolved = resolver
            .resolve(["calendar", "dialog", "carousel", "window"])
            .unwrap();

        let unique: HashSet<_> = resolved.iter().collect();
        assert_eq!(unique.len(), resolved.len());

        for (position, component) in resolved.iter().enumerate() {
            for dependency in graph.dependencies_of(component).unwrap_or_default() {
                let dependency_position = resolved
                    .iter()
                    .position(|c| c == dependency)
                    .expect("dependency missing from result");
                assert!(
                    dependency_position < position,
                    "{dependency} should come before {component}"
                );
            }
        }
    }

    #[test]
    fn resolver_can_be_shared_between_threads() {
        let resolver = resolver(toml! {
            a = ["b"]
            b = ["c"]
        });
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| resolver.resolve(["a"]).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), names(&["c", "b", "a"]));
            }
        });
    }
}

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, trace, warn};
use thiserror::Error;

use crate::{
    model::{ComponentName, Manifest},
    resolver::{DependencyResolver, ResolveError},
};

#[derive(Error, Debug)]
pub enum DistribError {
    #[error("Error while resolving components: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Bad output file {0}")]
    BadOutputFile(String),
    #[error("Component {component} is a directory without {}", path.display())]
    MissingSource {
        component: ComponentName,
        path: PathBuf,
    },
    #[error("Could not read component {component} from {}: {source}", path.display())]
    ReadSource {
        component: ComponentName,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write distribution file {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Assembles a single distribution file out of component sources.
///
/// src_dir: directory holding one file or directory per component
/// extension: source file extension, without the dot
pub struct Distribution<'a> {
    resolver: DependencyResolver,
    core: Option<&'a ComponentName>,
    src_dir: &'a Path,
    extension: &'a str,
}

impl<'a> Distribution<'a> {
    pub fn new(manifest: &'a Manifest, src_dir: &'a Path) -> Self {
        Distribution {
            resolver: DependencyResolver::new(manifest.components.clone()),
            core: manifest.core.as_ref(),
            src_dir,
            extension: manifest.extension(),
        }
    }

    /// Resolved components in the order they are written, core first.
    pub fn components(
        &self,
        requested: &[ComponentName],
    ) -> Result<Vec<ComponentName>, DistribError> {
        let mut components = self.resolver.resolve(requested.iter().cloned())?;
        if let Some(core) = self.core {
            components.retain(|component| component != core);
            components.insert(0, core.clone());
        }
        Ok(components)
    }

    /// Writes every resolved component to `dist_file`, each followed by a newline.
    ///
    /// All sources are read before anything is written, and the output goes through
    /// a sibling temporary file, so a failed build leaves an existing distribution
    /// file untouched.
    pub fn write(
        &self,
        requested: &[ComponentName],
        dist_file: &Path,
    ) -> Result<Vec<ComponentName>, DistribError> {
        let components = self.components(requested)?;

        let bad_output_file =
            || DistribError::BadOutputFile(dist_file.to_string_lossy().to_string());
        if dist_file.is_dir() {
            return Err(bad_output_file());
        }
        let file_name = dist_file.file_name().ok_or_else(bad_output_file)?;

        let sources = components
            .iter()
            .map(|component| self.read_source(component))
            .collect::<Result<Vec<_>, _>>()?;

        let write_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| DistribError::WriteOutput { path, source }
        };

        if let Some(parent) = dist_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error(parent))?;
        }

        let partial_file =
            dist_file.with_file_name(format!(".{}.partial", file_name.to_string_lossy()));
        if let Err(err) = write_sources(&partial_file, &components, &sources) {
            let _ = std::fs::remove_file(&partial_file);
            return Err(write_error(&partial_file)(err));
        }
        std::fs::rename(&partial_file, dist_file).map_err(write_error(dist_file))?;

        info!(
            "Wrote {} components to {}",
            components.len(),
            dist_file.display()
        );
        Ok(components)
    }

    /// Raw source bytes of a component. A component may be a directory holding
    /// `<component>.<ext>`, a plain file, or a `<component>.<ext>` file. A component
    /// with none of these contributes nothing.
    pub fn read_source(&self, component: &ComponentName) -> Result<Vec<u8>, DistribError> {
        match self.source_path(component)? {
            Some(path) => {
                debug!("Reading {} from {}", component, path.display());
                std::fs::read(&path).map_err(|source| DistribError::ReadSource {
                    component: component.clone(),
                    path,
                    source,
                })
            }
            None => {
                warn!(
                    "No source found for component {} in {}",
                    component,
                    self.src_dir.display()
                );
                Ok(Vec::new())
            }
        }
    }

    fn source_path(&self, component: &ComponentName) -> Result<Option<PathBuf>, DistribError> {
        let file_name = format!("{}.{}", component, self.extension);
        let component_path = self.src_dir.join(component.as_str());

        if component_path.is_dir() {
            let path = component_path.join(file_name);
            if path.is_file() {
                Ok(Some(path))
            } else {
                Err(DistribError::MissingSource {
                    component: component.clone(),
                    path,
                })
            }
        } else if component_path.is_file() {
            Ok(Some(component_path))
        } else {
            Ok(Some(self.src_dir.join(file_name)).filter(|p| p.is_file()))
        }
    }
}

fn write_sources(
    path: &Path,
    components: &[ComponentName],
    sources: &[Vec<u8>],
) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (component, source) in components.iter().zip(sources) {
        trace!("Writing {} bytes for {}", source.len(), component);
        writer.write_all(source)?;
        writer.write_all(b"\n")?;
    }
    writer.into_inner()?.sync_all()
}

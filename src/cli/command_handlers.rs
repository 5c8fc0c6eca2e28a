use anyhow::bail;
use log::{debug, info};

use crate::{
    distrib::Distribution,
    model::{ComponentName, Manifest},
    resolver::DependencyResolver,
};
use std::path::{Path, PathBuf};

/// Handler to resolve command
pub fn do_resolve(
    root: &Path,
    module_file_name: &Path,
    components: &[ComponentName],
) -> anyhow::Result<Vec<ComponentName>> {
    let manifest = Manifest::from_file(&root.join(module_file_name))?;
    let resolver = DependencyResolver::new(manifest.components);
    Ok(resolver.resolve(components.iter().cloned())?)
}

/// Handler to build command
/// Resolves the requested components, or the manifest defaults when none are given,
/// and concatenates their sources into the distribution file.
pub fn do_build(
    root: &Path,
    module_file_name: &Path,
    components: &[ComponentName],
    src_dir: Option<&Path>,
    dist_file: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let manifest = Manifest::from_file(&root.join(module_file_name))?;

    let requested = if components.is_empty() {
        manifest.default_components()
    } else {
        components.to_vec()
    };
    if requested.is_empty() && manifest.core.is_none() {
        bail!("No components to build: none were requested and the manifest declares none");
    }
    debug!("Building components {:?}", requested);

    let src_dir = root.join(src_dir.unwrap_or(manifest.source_directory()));
    let dist_file = root.join(match dist_file {
        Some(dist_file) => dist_file.to_path_buf(),
        None => manifest.distribution_file(),
    });

    Distribution::new(&manifest, &src_dir).write(&requested, &dist_file)?;

    Ok(dist_file)
}

/// Handler to init command
pub fn do_init(root: &Path, name: Option<String>, module_file_name: &Path) -> anyhow::Result<()> {
    let name = build_module_name(name, root)?;
    let manifest = Manifest::new(name);
    let module_file_path = root.join(module_file_name);
    if module_file_path.exists() {
        bail!("File already exists: {}", module_file_path.display());
    }
    std::fs::write(
        &module_file_path,
        toml::to_string_pretty(&manifest.into_toml())?,
    )?;
    info!("Wrote manifest to {}", module_file_path.display());
    Ok(())
}

/// Name if present otherwise attempt to extract from directory
fn build_module_name(name: Option<String>, path: &Path) -> anyhow::Result<String> {
    match name {
        Some(name) => Ok(name),
        None => match path.canonicalize()?.file_name() {
            Some(dir) => Ok(dir.to_string_lossy().to_string()),
            None => bail!("Project name not given and could not convert location to directory name"),
        },
    }
}

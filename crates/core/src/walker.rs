//! Transitive dependency walk over .car archives
//!
//! Starting from a root artifact already staged by the packaging step, the
//! walker expands every `type="car"` dependency edge depth-first, pulling
//! archives from the staging directory or the repository layout as it goes.
//! A visited set keyed on descriptor identity guarantees termination on
//! diamond-shaped and cyclic graphs. The walk is best-effort closure
//! building, not validation: an unresolvable or unreadable transitive
//! dependency is skipped with a warning, while any failure on the root
//! artifact itself aborts the whole resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::archive;
use crate::descriptor::Descriptor;
use crate::error::{Error, Result};
use crate::locator;

/// Resolves the full transitive closure of .car dependencies for the root
/// artifact `{artifact_id}-{version}.car`, which must already be present in
/// `staging_dir`.
///
/// Returns every reachable dependency archive, excluding the root itself.
/// Dependencies absent from the staging directory are fetched from the
/// Maven-layout repository under `repo_root` and copied into the staging
/// directory as a side effect.
pub fn resolve_dependent_capp_files(
    repo_root: &Path,
    staging_dir: &Path,
    artifact_id: &str,
    version: &str,
) -> Result<Vec<PathBuf>> {
    let root_car = staging_dir.join(format!("{artifact_id}-{version}.car"));
    if !root_car.is_file() {
        return Err(Error::RootArtifactMissing { path: root_car });
    }

    // The root's own descriptor must be readable; a locally-built root is
    // trusted, so any failure here is fatal.
    let root = Descriptor::parse(&archive::read_descriptor(&root_car)?)?;

    let mut collected = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(root.artifact.descriptor_id());

    collect_dependent_capp_files(
        repo_root,
        staging_dir,
        &root_car,
        root,
        &mut collected,
        &mut visited,
    )?;
    Ok(collected)
}

/// Expands the dependency edges of one already-parsed archive, recursing
/// into each newly discovered dependency.
///
/// `visited` records descriptor identities whose edges have been claimed; an
/// edge pointing at a visited identity is skipped outright, which is what
/// terminates cycles and keeps diamond sub-dependencies from being expanded
/// twice. Transitive archives that cannot be read or parsed are logged and
/// treated as unresolved.
fn collect_dependent_capp_files(
    repo_root: &Path,
    staging_dir: &Path,
    car_file: &Path,
    descriptor: Descriptor,
    collected: &mut Vec<PathBuf>,
    visited: &mut HashSet<String>,
) -> Result<()> {
    let car_deps: Vec<_> = descriptor
        .dependencies
        .into_iter()
        .filter(|d| d.is_car())
        .collect();
    debug!(
        "Processing {} car dependencies of {}",
        car_deps.len(),
        car_file.display()
    );

    for dep in car_deps {
        if !visited.insert(dep.artifact.descriptor_id()) {
            debug!("Already visited {}, skipping", dep.artifact);
            continue;
        }

        let candidate = match locator::find_in_staging(
            staging_dir,
            &dep.artifact.artifact_id,
            &dep.artifact.version,
        ) {
            Some(path) => Some(path),
            None => locator::fetch_from_repository(repo_root, staging_dir, &dep.artifact)?,
        };
        let Some(candidate) = candidate else {
            warn!("Could not resolve dependency {}, skipping", dep.artifact);
            continue;
        };

        // A stale or corrupt fetched archive must not sink the whole walk.
        let child = match archive::read_descriptor(&candidate).and_then(|t| Descriptor::parse(&t)) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!(
                    "Skipping unreadable dependency archive {}: {e}",
                    candidate.display()
                );
                continue;
            }
        };

        if !collected.contains(&candidate) {
            collected.push(candidate.clone());
        }
        collect_dependent_capp_files(repo_root, staging_dir, &candidate, child, collected, visited)?;
    }
    Ok(())
}

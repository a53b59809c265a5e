//! Locating dependency archives on disk
//!
//! A dependency is looked up first in the flat staging directory and, failing
//! that, under the conventional Maven2 repository layout. Absence from both
//! sources is a normal "try the next source" signal, not an error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::descriptor::ArtifactRef;
use crate::error::Result;

/// Scans `staging_dir` (non-recursive) for a file literally named
/// `{artifact_id}-{version}.car`.
pub fn find_in_staging(staging_dir: &Path, artifact_id: &str, version: &str) -> Option<PathBuf> {
    let candidate = staging_dir.join(format!("{artifact_id}-{version}.car"));
    if candidate.is_file() {
        Some(candidate)
    } else {
        None
    }
}

/// Conventional Maven2 repository path of an artifact's .car file:
/// `{repo}/{groupId with dots as separators}/{artifactId}/{version}/{artifactId}-{version}.car`.
pub fn repository_path(repo_root: &Path, artifact: &ArtifactRef) -> PathBuf {
    let mut path = repo_root.to_path_buf();
    for segment in artifact.group_id.split('.') {
        path.push(segment);
    }
    path.push(&artifact.artifact_id);
    path.push(&artifact.version);
    path.push(artifact.car_file_name());
    path
}

/// Attempts to fetch the .car file for `artifact` from the repository layout
/// under `repo_root`.
///
/// When the file exists it is copied byte-for-byte into `staging_dir`,
/// overwriting any existing same-named file, and the staged location is
/// returned. A missing repository file yields `Ok(None)`; only the copy
/// itself can fail.
pub fn fetch_from_repository(
    repo_root: &Path,
    staging_dir: &Path,
    artifact: &ArtifactRef,
) -> Result<Option<PathBuf>> {
    let source = repository_path(repo_root, artifact);
    if !source.is_file() {
        debug!("No repository copy of {artifact} at {}", source.display());
        return Ok(None);
    }
    if !staging_dir.exists() {
        fs::create_dir_all(staging_dir)?;
    }
    let staged = staging_dir.join(artifact.car_file_name());
    fs::copy(&source, &staged)?;
    info!(
        "Fetched {artifact} from repository into {}",
        staged.display()
    );
    Ok(Some(staged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn stage_repo_car(repo: &Path, artifact: &ArtifactRef, contents: &[u8]) -> PathBuf {
        let path = repository_path(repo, artifact);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn finds_staged_file_by_exact_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("orders-1.0.0.car"), b"zip").unwrap();

        assert!(find_in_staging(dir.path(), "orders", "1.0.0").is_some());
        assert!(find_in_staging(dir.path(), "orders", "1.0.1").is_none());
        assert!(find_in_staging(dir.path(), "order", "1.0.0").is_none());
    }

    #[test]
    fn repository_path_follows_maven_layout() {
        let artifact = ArtifactRef::new("com.example.apps", "orders", "1.0.0");
        let path = repository_path(Path::new("/repo"), &artifact);
        assert_eq!(
            path,
            Path::new("/repo/com/example/apps/orders/1.0.0/orders-1.0.0.car")
        );
    }

    #[test]
    fn fetch_copies_byte_identical_into_staging() {
        let repo = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let artifact = ArtifactRef::new("com.example", "orders", "1.0.0");
        stage_repo_car(repo.path(), &artifact, b"archive-bytes");

        let staged = fetch_from_repository(repo.path(), staging.path(), &artifact)
            .unwrap()
            .unwrap();
        assert_eq!(staged, staging.path().join("orders-1.0.0.car"));
        assert_eq!(fs::read(&staged).unwrap(), b"archive-bytes");
    }

    #[test]
    fn fetch_overwrites_existing_staged_file() {
        let repo = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let artifact = ArtifactRef::new("com.example", "orders", "1.0.0");
        stage_repo_car(repo.path(), &artifact, b"fresh");
        fs::write(staging.path().join("orders-1.0.0.car"), b"stale").unwrap();

        let staged = fetch_from_repository(repo.path(), staging.path(), &artifact)
            .unwrap()
            .unwrap();
        assert_eq!(fs::read(&staged).unwrap(), b"fresh");
    }

    #[test]
    fn absent_repository_file_is_not_an_error() {
        let repo = TempDir::new().unwrap();
        let staging = TempDir::new().unwrap();
        let artifact = ArtifactRef::new("com.example", "missing", "9.9.9");

        let result = fetch_from_repository(repo.path(), staging.path(), &artifact).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn fetch_creates_staging_dir_when_absent() {
        let repo = TempDir::new().unwrap();
        let parent = TempDir::new().unwrap();
        let staging = parent.path().join("dependencies");
        let artifact = ArtifactRef::new("com.example", "orders", "1.0.0");
        stage_repo_car(repo.path(), &artifact, b"bytes");

        let staged = fetch_from_repository(repo.path(), &staging, &artifact)
            .unwrap()
            .unwrap();
        assert!(staged.is_file());
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::debug;

use carpack_core::{ArtifactLedger, archive, properties, resolve_dependent_capp_files};

/// Materializes a fat archive directory: the dependency closure plus the
/// merged artifacts.xml and config.properties of every bundled .car.
pub fn bundle_command(
    artifact_id: &str,
    version: &str,
    staging_dir: &Path,
    repo: &Path,
    archive_dir: &Path,
) -> Result<()> {
    let closure = resolve_dependent_capp_files(repo, staging_dir, artifact_id, version)
        .with_context(|| format!("failed to resolve dependencies of {artifact_id}-{version}"))?;

    let dependencies_dir = archive_dir.join("dependencies");
    fs::create_dir_all(&dependencies_dir)?;

    let mut ledger = ArtifactLedger::new();
    for car_file in &closure {
        let file_name = car_file
            .file_name()
            .context("resolved path has no file name")?;
        fs::copy(car_file, dependencies_dir.join(file_name))?;

        // Each bundled .car contributes its own manifest and configuration.
        let extracted = TempDir::new()?;
        archive::unzip(car_file, extracted.path())
            .with_context(|| format!("failed to extract {}", car_file.display()))?;
        ledger.merge_artifacts_xml(&extracted.path().join("artifacts.xml"))?;
        properties::handle_config_properties(extracted.path(), archive_dir)?;
        debug!("Merged contributions of {}", car_file.display());
    }

    ledger.write_artifacts_xml(&archive_dir.join("artifacts.xml"), artifact_id, version)?;
    println!(
        "Bundled {} dependencies into {}",
        closure.len(),
        archive_dir.display()
    );
    Ok(())
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tempfile::TempDir;
use tracing::info;

use carpack_core::{ArtifactLedger, archive, resolve_dependent_capp_files};

#[derive(Serialize)]
struct ResolveReport<'a> {
    artifact_id: &'a str,
    version: &'a str,
    dependencies: Vec<PathBuf>,
}

pub fn resolve_command(
    artifact_id: &str,
    version: &str,
    staging_dir: &Path,
    repo: &Path,
    copy_to: Option<&Path>,
    artifacts_xml: Option<&Path>,
    json: bool,
) -> Result<()> {
    let closure = resolve_dependent_capp_files(repo, staging_dir, artifact_id, version)
        .with_context(|| format!("failed to resolve dependencies of {artifact_id}-{version}"))?;

    if let Some(dest) = copy_to {
        fs::create_dir_all(dest)?;
        for car_file in &closure {
            let file_name = car_file
                .file_name()
                .context("resolved path has no file name")?;
            fs::copy(car_file, dest.join(file_name))?;
        }
        info!("Copied {} archives into {}", closure.len(), dest.display());
    }

    if let Some(manifest_path) = artifacts_xml {
        let mut ledger = ArtifactLedger::new();
        for car_file in &closure {
            let extracted = TempDir::new()?;
            archive::unzip(car_file, extracted.path())
                .with_context(|| format!("failed to extract {}", car_file.display()))?;
            ledger.merge_artifacts_xml(&extracted.path().join("artifacts.xml"))?;
        }
        ledger.write_artifacts_xml(manifest_path, artifact_id, version)?;
        info!("Wrote combined manifest to {}", manifest_path.display());
    }

    if json {
        let report = ResolveReport {
            artifact_id,
            version,
            dependencies: closure,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if closure.is_empty() {
        println!("{artifact_id}-{version} has no .car dependencies");
    } else {
        for car_file in &closure {
            println!("{}", car_file.display());
        }
    }
    Ok(())
}

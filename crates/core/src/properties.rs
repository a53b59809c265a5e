//! Merging of `config.properties` fragments
//!
//! Bundled sub-artifacts may each ship a `config.properties` file; their
//! lines are unioned into the archive's single target file. Lines are
//! compared by exact string equality, not by key: two lines that differ only
//! in the value for the same key are both retained.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// File name of the configuration fragment contributed by an artifact.
pub const CONFIG_PROPERTIES_FILE: &str = "config.properties";

/// Carries `src_dir/config.properties` into `target_dir`.
///
/// No source file means nothing to contribute. When the target directory or
/// file does not exist yet the source is copied verbatim; otherwise the two
/// files are merged line-wise.
pub fn handle_config_properties(src_dir: &Path, target_dir: &Path) -> Result<()> {
    let source = src_dir.join(CONFIG_PROPERTIES_FILE);
    if !source.is_file() {
        return Ok(());
    }
    if !target_dir.exists() {
        fs::create_dir_all(target_dir)?;
    }
    let target = target_dir.join(CONFIG_PROPERTIES_FILE);
    if !target.exists() {
        debug!(
            "Copying {} into {}",
            source.display(),
            target_dir.display()
        );
        fs::copy(&source, &target)?;
        return Ok(());
    }
    merge_properties_files(&source, &target)
}

/// Appends every line of `source` not already present verbatim in `target`.
///
/// Existing target lines keep their original order; appended lines follow
/// source order. Blank lines are ignored. Merging the same source twice is
/// idempotent.
pub fn merge_properties_files(source: &Path, target: &Path) -> Result<()> {
    let source_text = fs::read_to_string(source)?;
    let target_text = fs::read_to_string(target)?;

    let mut merged: Vec<&str> = target_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    for line in source_text.lines() {
        if !line.trim().is_empty() && !merged.contains(&line) {
            merged.push(line);
        }
    }

    let mut out = merged.join("\n");
    out.push('\n');
    fs::write(target, out)?;
    Ok(())
}

use std::path::Path;

use anyhow::{Context, Result};

use carpack_core::properties;

pub fn merge_config_command(src_dir: &Path, target_dir: &Path) -> Result<()> {
    properties::handle_config_properties(src_dir, target_dir).with_context(|| {
        format!(
            "failed to merge config.properties from {} into {}",
            src_dir.display(),
            target_dir.display()
        )
    })
}

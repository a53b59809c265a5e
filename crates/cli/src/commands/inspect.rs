use std::path::Path;

use anyhow::{Context, Result};

use carpack_core::{Descriptor, archive};

pub fn inspect_command(car_file: &Path, json: bool) -> Result<()> {
    let text = archive::read_descriptor(car_file)
        .with_context(|| format!("cannot read descriptor of {}", car_file.display()))?;
    let descriptor = Descriptor::parse(&text)
        .with_context(|| format!("cannot parse descriptor of {}", car_file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
        return Ok(());
    }

    println!("{}", descriptor.artifact);
    if descriptor.dependencies.is_empty() {
        println!("  (no declared dependencies)");
    }
    for dep in &descriptor.dependencies {
        println!("  {} ({})", dep.artifact, dep.dep_type);
    }
    Ok(())
}

//! The flat dependency ledger behind `artifacts.xml`
//!
//! Each bundled sub-artifact contributes its own `artifacts.xml` manifest;
//! the ledger accumulates every `<dependency>` record destined for the final
//! manifest of the archive being assembled. Duplicate `(artifact, version)`
//! declarations across independently built sub-artifacts are surfaced to the
//! user through an error log rather than silently reconciled.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::error;

use crate::error::{Error, Result};

/// One `<dependency>` record of an `artifacts.xml` manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactDependency {
    pub artifact: String,
    pub version: String,
    pub server_role: Option<String>,
    pub include: bool,
}

impl ArtifactDependency {
    pub fn new(
        artifact: impl Into<String>,
        version: impl Into<String>,
        server_role: Option<String>,
        include: bool,
    ) -> Self {
        Self {
            artifact: artifact.into(),
            version: version.into(),
            server_role,
            include,
        }
    }
}

/// Accumulates the dependency records for one packaging run.
#[derive(Debug, Default)]
pub struct ArtifactLedger {
    entries: Vec<ArtifactDependency>,
}

impl ArtifactLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ArtifactDependency] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a dependency record unless an entry with the same
    /// `(artifact, version)` key is already present.
    ///
    /// A duplicate is dropped, reported through the error log, and leaves
    /// the ledger unchanged; the caller decides whether accumulated
    /// conflicts fail the build. Returns whether the entry was appended.
    pub fn push(&mut self, dependency: ArtifactDependency) -> bool {
        let duplicate = self
            .entries
            .iter()
            .any(|e| e.artifact == dependency.artifact && e.version == dependency.version);
        if duplicate {
            error!(
                "Dependency {}-{} already exists in between dependencies or between a dependency and your project.",
                dependency.artifact, dependency.version
            );
            return false;
        }
        self.entries.push(dependency);
        true
    }

    /// Merges every `<dependency>` element of an existing `artifacts.xml`
    /// into the ledger. A missing file is a no-op; nothing to merge.
    pub fn merge_artifacts_xml(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let text = fs::read_to_string(path)?;
        let doc = roxmltree::Document::parse(&text).map_err(|e| Error::MalformedManifest {
            path: path.to_path_buf(),
            reason: format!("invalid XML: {e}"),
        })?;

        for node in doc.descendants().filter(|n| n.has_tag_name("dependency")) {
            let attr = |name: &str| {
                node.attribute(name)
                    .map(str::to_string)
                    .ok_or_else(|| Error::MalformedManifest {
                        path: path.to_path_buf(),
                        reason: format!("<dependency> element missing attribute '{name}'"),
                    })
            };
            let dependency = ArtifactDependency {
                artifact: attr("artifact")?,
                version: attr("version")?,
                server_role: node
                    .attribute("serverRole")
                    .filter(|v| !v.is_empty())
                    .map(str::to_string),
                include: attr("include")?.eq_ignore_ascii_case("true"),
            };
            self.push(dependency);
        }
        Ok(())
    }

    /// Serializes the ledger as the `artifacts.xml` of the named artifact.
    pub fn write_artifacts_xml(
        &self,
        path: &Path,
        artifact_name: &str,
        artifact_version: &str,
    ) -> Result<()> {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<artifacts>\n");
        xml.push_str(&format!(
            "  <artifact name=\"{}\" version=\"{}\" type=\"carbon/application\">\n",
            escape_attr(artifact_name),
            escape_attr(artifact_version)
        ));
        for entry in &self.entries {
            xml.push_str(&format!(
                "    <dependency artifact=\"{}\" version=\"{}\" include=\"{}\"",
                escape_attr(&entry.artifact),
                escape_attr(&entry.version),
                entry.include
            ));
            if let Some(role) = &entry.server_role {
                xml.push_str(&format!(" serverRole=\"{}\"", escape_attr(role)));
            }
            xml.push_str("/>\n");
        }
        xml.push_str("  </artifact>\n</artifacts>\n");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, xml)?;
        Ok(())
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

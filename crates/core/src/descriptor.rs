//! Parsing of the `descriptor.xml` manifest carried inside every .car archive
//!
//! The descriptor identifies the artifact through an `<id>` element of the
//! form `groupId_artifactId_version` and declares its direct dependencies as
//! attribute-only `<dependency/>` elements.

use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};

/// Dependency type that participates in closure resolution.
pub const CAR_TYPE: &str = "car";

/// Identity of a composite application artifact.
///
/// The triple uniquely determines the archive file name,
/// `{artifactId}-{version}.car`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArtifactRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ArtifactRef {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// File name of the archive this reference points at.
    pub fn car_file_name(&self) -> String {
        format!("{}-{}.car", self.artifact_id, self.version)
    }

    /// The underscore-delimited form used by descriptor `<id>` elements,
    /// also used as the visited-set key during the closure walk.
    pub fn descriptor_id(&self) -> String {
        format!("{}_{}_{}", self.group_id, self.artifact_id, self.version)
    }

    /// Parses a `groupId_artifactId_version` identity string.
    ///
    /// The string is split from the right: the last segment is the version,
    /// the one before it the artifactId, everything left of that the groupId.
    /// This is the only unambiguous reading when the artifactId itself
    /// contains no underscore; an underscored artifactId cannot be recovered
    /// from this format.
    pub fn parse_descriptor_id(id: &str) -> Result<Self> {
        let mut parts = id.rsplitn(3, '_');
        let version = parts.next().filter(|s| !s.is_empty());
        let artifact_id = parts.next().filter(|s| !s.is_empty());
        let group_id = parts.next().filter(|s| !s.is_empty());
        match (group_id, artifact_id, version) {
            (Some(g), Some(a), Some(v)) => Ok(Self::new(g, a, v)),
            _ => Err(Error::MalformedDescriptor(format!(
                "id '{id}' is not of the form groupId_artifactId_version"
            ))),
        }
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A declared edge from one artifact to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorDependency {
    pub artifact: ArtifactRef,
    pub dep_type: String,
}

impl DescriptorDependency {
    /// Whether this dependency participates in the .car closure walk.
    pub fn is_car(&self) -> bool {
        self.dep_type == CAR_TYPE
    }
}

/// Parsed contents of a `descriptor.xml` entry.
#[derive(Debug, Clone, Serialize)]
pub struct Descriptor {
    pub artifact: ArtifactRef,
    pub dependencies: Vec<DescriptorDependency>,
}

impl Descriptor {
    /// Parses descriptor XML text into the artifact identity and its ordered
    /// list of declared dependencies.
    ///
    /// Every `<dependency>` element must carry `groupId`, `artifactId`,
    /// `version` and `type` attributes; a missing attribute fails the whole
    /// parse rather than silently dropping the element. Dependencies of
    /// types other than `car` are returned as-is and filtered by the walker.
    pub fn parse(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|e| Error::MalformedDescriptor(format!("invalid XML: {e}")))?;

        let id_text = doc
            .descendants()
            .find(|n| n.has_tag_name("id"))
            .and_then(|n| n.text())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::MalformedDescriptor("missing <id> element".to_string()))?;
        let artifact = ArtifactRef::parse_descriptor_id(id_text)?;

        let mut dependencies = Vec::new();
        for node in doc.descendants().filter(|n| n.has_tag_name("dependency")) {
            let attr = |name: &str| {
                node.attribute(name)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        Error::MalformedDescriptor(format!(
                            "<dependency> element missing required attribute '{name}'"
                        ))
                    })
            };
            dependencies.push(DescriptorDependency {
                artifact: ArtifactRef {
                    group_id: attr("groupId")?,
                    artifact_id: attr("artifactId")?,
                    version: attr("version")?,
                },
                dep_type: attr("type")?,
            });
        }

        Ok(Self {
            artifact,
            dependencies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor_xml(id: &str, deps: &[&str]) -> String {
        let mut xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n<id>{id}</id>\n<dependencies>\n"
        );
        for dep in deps {
            xml.push_str(dep);
            xml.push('\n');
        }
        xml.push_str("</dependencies>\n</project>");
        xml
    }

    #[test]
    fn parses_identity_and_dependencies() {
        let xml = descriptor_xml(
            "com.example_orders_1.0.0",
            &[
                r#"<dependency groupId="com.example" artifactId="inventory" version="2.1.0" type="car"/>"#,
                r#"<dependency groupId="com.example" artifactId="shared-lib" version="1.0.0" type="jar"/>"#,
            ],
        );
        let descriptor = Descriptor::parse(&xml).unwrap();
        assert_eq!(
            descriptor.artifact,
            ArtifactRef::new("com.example", "orders", "1.0.0")
        );
        assert_eq!(descriptor.dependencies.len(), 2);
        assert!(descriptor.dependencies[0].is_car());
        assert!(!descriptor.dependencies[1].is_car());
        assert_eq!(descriptor.dependencies[1].dep_type, "jar");
    }

    #[test]
    fn id_splits_from_the_right() {
        // groupId keeps its dots, but any extra underscores belong to it too
        let parsed = ArtifactRef::parse_descriptor_id("com.example_extra_orders_1.0.0").unwrap();
        assert_eq!(parsed.group_id, "com.example_extra");
        assert_eq!(parsed.artifact_id, "orders");
        assert_eq!(parsed.version, "1.0.0");
    }

    #[test]
    fn id_with_too_few_segments_is_rejected() {
        assert!(matches!(
            ArtifactRef::parse_descriptor_id("orders_1.0.0"),
            Err(Error::MalformedDescriptor(_))
        ));
        assert!(ArtifactRef::parse_descriptor_id("orders").is_err());
        assert!(ArtifactRef::parse_descriptor_id("__").is_err());
    }

    #[test]
    fn missing_dependency_attribute_fails_whole_parse() {
        let xml = descriptor_xml(
            "com.example_orders_1.0.0",
            &[r#"<dependency groupId="com.example" artifactId="inventory" type="car"/>"#],
        );
        let err = Descriptor::parse(&xml).unwrap_err();
        assert!(matches!(err, Error::MalformedDescriptor(_)));
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn missing_id_element_is_rejected() {
        let err = Descriptor::parse("<project><dependencies/></project>").unwrap_err();
        assert!(matches!(err, Error::MalformedDescriptor(_)));
    }

    #[test]
    fn invalid_xml_is_rejected() {
        assert!(Descriptor::parse("<project>").is_err());
    }

    #[test]
    fn car_file_name_matches_staging_convention() {
        let r = ArtifactRef::new("com.example", "orders", "1.0.0");
        assert_eq!(r.car_file_name(), "orders-1.0.0.car");
        assert_eq!(r.descriptor_id(), "com.example_orders_1.0.0");
        assert_eq!(r.to_string(), "com.example:orders:1.0.0");
    }
}

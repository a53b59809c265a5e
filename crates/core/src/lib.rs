//! carpack-core - dependency-closure resolution for composite application archives
//!
//! This crate provides functionality to:
//! - Read and parse the `descriptor.xml` manifest inside a .car archive
//! - Walk the transitive `type="car"` dependency graph of a root artifact
//! - Stage dependency archives from a Maven-layout repository
//! - Accumulate the flat dependency ledger written to `artifacts.xml`
//! - Merge `config.properties` fragments contributed by bundled artifacts
pub mod archive;
pub mod descriptor;
pub mod error;
pub mod ledger;
pub mod locator;
pub mod properties;
pub mod walker;

// Re-export commonly used types
pub use descriptor::{ArtifactRef, Descriptor, DescriptorDependency};
pub use error::{Error, Result};
pub use ledger::{ArtifactDependency, ArtifactLedger};
pub use walker::resolve_dependent_capp_files;

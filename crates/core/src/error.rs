use std::io;
use std::path::PathBuf;

/// Errors that can occur during carpack operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot read archive {path}: {source}")]
    ArchiveRead {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("No descriptor.xml entry in {path}")]
    DescriptorNotFound { path: PathBuf },

    #[error("Malformed descriptor: {0}")]
    MalformedDescriptor(String),

    #[error("Malformed artifacts manifest {path}: {reason}")]
    MalformedManifest { path: PathBuf, reason: String },

    #[error("Root artifact archive not found at {path}")]
    RootArtifactMissing { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for carpack operations
pub type Result<T> = std::result::Result<T, Error>;

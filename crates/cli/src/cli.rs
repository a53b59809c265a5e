use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{bundle_command, inspect_command, merge_config_command, resolve_command};

/// Resolve and bundle composite application (.car) dependency closures
#[derive(Parser, Debug)]
#[command(name = "carpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Carpack {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the transitive .car dependency closure of a staged artifact
    #[command(visible_alias = "r")]
    Resolve {
        /// Artifact id of the root artifact (its .car must be in the staging directory)
        artifact_id: String,

        /// Version of the root artifact
        version: String,

        /// Staging directory holding already-copied dependency .car files
        #[arg(short, long, default_value = "target/dependency")]
        staging_dir: PathBuf,

        /// Root of the Maven-layout repository used as fallback source
        #[arg(short, long)]
        repo: PathBuf,

        /// Copy every resolved .car into this directory
        #[arg(long)]
        copy_to: Option<PathBuf>,

        /// Merge the artifacts.xml of every resolved .car and write the
        /// combined manifest to this path
        #[arg(long)]
        artifacts_xml: Option<PathBuf>,

        /// Emit a machine-readable JSON report
        #[arg(short, long)]
        json: bool,
    },
    /// Resolve a closure and materialize it into an archive directory
    ///
    /// Copies the closure into `<archive-dir>/dependencies`, merges the
    /// artifacts.xml and config.properties contributed by each bundled
    /// dependency, and writes the combined artifacts.xml.
    Bundle {
        /// Artifact id of the root artifact
        artifact_id: String,

        /// Version of the root artifact
        version: String,

        /// Staging directory holding already-copied dependency .car files
        #[arg(short, long, default_value = "target/dependency")]
        staging_dir: PathBuf,

        /// Root of the Maven-layout repository used as fallback source
        #[arg(short, long)]
        repo: PathBuf,

        /// Archive directory being assembled
        #[arg(short, long)]
        archive_dir: PathBuf,
    },
    /// Print the identity and declared dependencies of a .car file
    #[command(visible_alias = "i")]
    Inspect {
        /// Path to the .car file
        car_file: PathBuf,

        /// Emit a machine-readable JSON report
        #[arg(short, long)]
        json: bool,
    },
    /// Merge a config.properties file from one directory into another
    MergeConfig {
        /// Directory containing the source config.properties
        src_dir: PathBuf,

        /// Directory receiving the merged config.properties
        target_dir: PathBuf,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Resolve {
                artifact_id,
                version,
                staging_dir,
                repo,
                copy_to,
                artifacts_xml,
                json,
            } => resolve_command(
                &artifact_id,
                &version,
                &staging_dir,
                &repo,
                copy_to.as_deref(),
                artifacts_xml.as_deref(),
                json,
            ),
            Commands::Bundle {
                artifact_id,
                version,
                staging_dir,
                repo,
                archive_dir,
            } => bundle_command(&artifact_id, &version, &staging_dir, &repo, &archive_dir),
            Commands::Inspect { car_file, json } => inspect_command(&car_file, json),
            Commands::MergeConfig {
                src_dir,
                target_dir,
            } => merge_config_command(&src_dir, &target_dir),
        }
    }
}

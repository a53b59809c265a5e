//! Read access to .car archives
//!
//! A .car file is an ordinary zip archive whose root carries a
//! `descriptor.xml` manifest. Descriptor reads never touch the disk;
//! full extraction is only used when a dependency's contents have to be
//! materialized into the archive being assembled.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};

/// Name of the manifest entry every .car archive must carry at its root.
pub const DESCRIPTOR_ENTRY: &str = "descriptor.xml";

fn open_archive(car_file: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(car_file).map_err(|e| Error::ArchiveRead {
        path: car_file.to_path_buf(),
        source: ZipError::Io(e),
    })?;
    ZipArchive::new(file).map_err(|e| Error::ArchiveRead {
        path: car_file.to_path_buf(),
        source: e,
    })
}

/// Extracts the `descriptor.xml` entry of `car_file` as text, in memory.
///
/// Fails with [`Error::DescriptorNotFound`] when the entry is absent and
/// [`Error::ArchiveRead`] when the archive itself cannot be opened or read.
pub fn read_descriptor(car_file: &Path) -> Result<String> {
    let mut archive = open_archive(car_file)?;
    let mut entry = match archive.by_name(DESCRIPTOR_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(Error::DescriptorNotFound {
                path: car_file.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(Error::ArchiveRead {
                path: car_file.to_path_buf(),
                source: e,
            });
        }
    };
    let mut text = String::new();
    entry
        .read_to_string(&mut text)
        .map_err(|e| Error::ArchiveRead {
            path: car_file.to_path_buf(),
            source: ZipError::Io(e),
        })?;
    Ok(text)
}

/// Extracts every entry of `car_file` into `dest_dir`.
///
/// Parent directories are created as needed. Re-extraction overwrites
/// existing files of the same name. Entries with names that escape
/// `dest_dir` are skipped.
pub fn unzip(car_file: &Path, dest_dir: &Path) -> Result<()> {
    let mut archive = open_archive(car_file)?;
    debug!(
        "Extracting {} entries from {} into {}",
        archive.len(),
        car_file.display(),
        dest_dir.display()
    );
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| Error::ArchiveRead {
            path: car_file.to_path_buf(),
            source: e,
        })?;
        let Some(relative) = entry.enclosed_name() else {
            debug!("Skipping unsafe entry name '{}'", entry.name());
            continue;
        };
        let out_path = dest_dir.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out_file = File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;
    }
    Ok(())
}

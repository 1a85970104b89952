use crate::classify::SerialPattern;
use crate::error::SerialError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A regular file whose name starts with a serial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialFileEntry {
    pub source_path: PathBuf,
    pub serial_number: u64,
    pub remainder: String,
    pub extension: String,
    /// Filled in once the remap table is known
    pub final_serial: Option<i128>,
}

impl SerialFileEntry {
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// List the direct children of `folder` in file-name order and keep the
/// regular files whose names carry a serial prefix.
///
/// The listing order is fixed so that disambiguation suffixes come out the
/// same on every run over the same folder.
pub fn scan_folder(
    folder: &Path,
    pattern: &SerialPattern,
) -> Result<Vec<SerialFileEntry>, SerialError> {
    if !folder.exists() {
        return Err(SerialError::TargetFolderMissing(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(SerialError::NotADirectory(folder.to_path_buf()));
    }

    let root = folder
        .canonicalize()
        .unwrap_or_else(|_| folder.to_path_buf());

    let mut entries = Vec::new();
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| SerialError::ListFailed {
            path: root.clone(),
            source,
        })?;

        // Follows symlinks, so a link to a regular file counts as one
        if !entry.path().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            debug!(path = %entry.path().display(), "Skipping file name that is not valid UTF-8");
            continue;
        };

        let classification = pattern.classify(name);
        if let (true, Some(serial_number), Some(remainder)) = (
            classification.matched,
            classification.serial,
            classification.remainder,
        ) {
            entries.push(SerialFileEntry {
                source_path: entry.path().to_path_buf(),
                serial_number,
                remainder,
                extension: classification.extension,
                final_serial: None,
            });
        } else {
            debug!(name, "No serial prefix");
        }
    }

    Ok(entries)
}

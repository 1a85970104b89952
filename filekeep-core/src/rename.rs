use crate::config::SerialConfig;
use crate::scanner::SerialFileEntry;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Highest `(k)` suffix tried before giving up on a name
pub const MAX_DISAMBIGUATION: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFailure {
    pub file: PathBuf,
    pub error: String,
}

/// What happened to one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenameStep {
    Renamed(RenamedFile),
    Failed(RenameFailure),
}

/// Per-entry results in processing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameOutcome {
    pub steps: Vec<RenameStep>,
}

impl RenameOutcome {
    pub fn renamed(&self) -> impl Iterator<Item = &RenamedFile> {
        self.steps.iter().filter_map(|step| match step {
            RenameStep::Renamed(renamed) => Some(renamed),
            RenameStep::Failed(_) => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = &RenameFailure> {
        self.steps.iter().filter_map(|step| match step {
            RenameStep::Failed(failure) => Some(failure),
            RenameStep::Renamed(_) => None,
        })
    }
}

/// Zero-pad `serial` to `width` digits. Wider values are never truncated and
/// negative values keep the sign in front (`-05` for width 3).
pub fn format_serial(serial: i128, width: usize) -> String {
    format!("{serial:0width$}")
}

/// Target name for an entry minus its extension, before any `(k)` suffix
pub fn compose_stem(
    config: &SerialConfig,
    padded_serial: &str,
    entry: &SerialFileEntry,
) -> String {
    format!(
        "{}{}{}{}",
        config.prefix, padded_serial, config.connector, entry.remainder
    )
}

/// First free path in `dir` for the composed name, trying `stem(1)ext`,
/// `stem(2)ext`, ... once the plain name is taken.
///
/// Anything present counts as taken, including files renamed earlier in the
/// same run and dangling symlinks. The check is a snapshot; a file created
/// by someone else between the check and the rename is not detected.
pub fn next_free_path(dir: &Path, stem: &str, extension: &str) -> Result<PathBuf> {
    let candidate = dir.join(format!("{stem}{extension}"));
    if !entry_exists(&candidate) {
        return Ok(candidate);
    }

    for k in 1..=MAX_DISAMBIGUATION {
        let candidate = dir.join(format!("{stem}({k}){extension}"));
        if !entry_exists(&candidate) {
            return Ok(candidate);
        }
    }

    Err(anyhow!(
        "no free name for '{stem}{extension}' after {MAX_DISAMBIGUATION} attempts"
    ))
}

fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn rename_entry(entry: &SerialFileEntry, config: &SerialConfig) -> Result<PathBuf> {
    let final_serial = entry
        .final_serial
        .ok_or_else(|| anyhow!("no remapped serial assigned"))?;
    let dir = entry
        .source_path
        .parent()
        .ok_or_else(|| anyhow!("file has no parent directory"))?;

    let padded = format_serial(final_serial, config.pad_width);
    let stem = compose_stem(config, &padded, entry);
    let target = next_free_path(dir, &stem, &entry.extension)?;

    debug!(
        "Renaming {} -> {}",
        entry.source_path.display(),
        target.display()
    );
    fs::rename(&entry.source_path, &target).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            entry.source_path.display(),
            target.display()
        )
    })?;

    Ok(target)
}

/// Rename every entry in order. A failing entry is recorded and skipped;
/// nothing already renamed is rolled back.
pub fn execute_renames(entries: &[SerialFileEntry], config: &SerialConfig) -> RenameOutcome {
    let mut outcome = RenameOutcome::default();

    for entry in entries {
        match rename_entry(entry, config) {
            Ok(to) => outcome.steps.push(RenameStep::Renamed(RenamedFile {
                from: entry.source_path.clone(),
                to,
            })),
            Err(e) => {
                warn!("Rename of {} failed: {e:#}", entry.source_path.display());
                outcome.steps.push(RenameStep::Failed(RenameFailure {
                    file: entry.source_path.clone(),
                    error: format!("{e:#}"),
                }));
            },
        }
    }

    outcome
}

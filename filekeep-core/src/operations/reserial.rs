use crate::classify::SerialPattern;
use crate::config::SerialConfig;
use crate::error::SerialError;
use crate::output::ReserialResult;
use crate::remap::SerialRemapTable;
use crate::rename::{execute_renames, RenameOutcome};
use crate::scanner::scan_folder;
use tracing::{debug, info};

/// Serial renaming run - returns structured data
///
/// Errors only for problems found before any file is touched. Individual
/// rename failures end up in [`ReserialResult::outcome`].
pub fn reserial_operation(config: &SerialConfig) -> Result<ReserialResult, SerialError> {
    let folder = config
        .target_folder
        .clone()
        .ok_or_else(|| SerialError::InvalidConfig("no target folder given".to_string()))?;
    config.validate()?;

    let pattern = SerialPattern::new(&config.separators)?;
    let mut entries = scan_folder(&folder, &pattern)?;
    debug!(
        "Found {} serial files in {}",
        entries.len(),
        folder.display()
    );

    if entries.is_empty() {
        return Ok(ReserialResult {
            target_folder: folder,
            base_serial: config.base_serial,
            separators: config.separators.clone(),
            matched: 0,
            outcome: RenameOutcome::default(),
            table: None,
        });
    }

    let table = SerialRemapTable::build(
        entries.iter().map(|entry| entry.serial_number),
        config.base_serial,
    );
    for entry in &mut entries {
        entry.final_serial = table.get(entry.serial_number);
    }

    let outcome = execute_renames(&entries, config);
    info!(
        renamed = outcome.renamed().count(),
        failed = outcome.failed().count(),
        "Serial renaming finished"
    );

    Ok(ReserialResult {
        target_folder: folder,
        base_serial: config.base_serial,
        separators: config.separators.clone(),
        matched: entries.len(),
        outcome,
        table: Some(table),
    })
}

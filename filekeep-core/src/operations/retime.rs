use crate::error::TimestampError;
use crate::output::RetimeResult;
use crate::timestamp::{modify_file_times, TimeRequest, TimestampBackend};
use std::path::Path;

/// Timestamp edit - returns structured data
pub fn retime_operation(
    path: &Path,
    request: &TimeRequest,
    format: &str,
    backend: &dyn TimestampBackend,
) -> Result<RetimeResult, TimestampError> {
    let request = TimeRequest {
        created: given(request.created.as_deref()),
        modified: given(request.modified.as_deref()),
        accessed: given(request.accessed.as_deref()),
    };

    let outcome = modify_file_times(path, &request, format, backend)?;

    Ok(RetimeResult {
        path: path.to_path_buf(),
        created: request.created,
        modified: request.modified,
        accessed: request.accessed,
        backend: outcome.backend,
        warnings: outcome.warnings,
    })
}

fn given(value: Option<&str>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

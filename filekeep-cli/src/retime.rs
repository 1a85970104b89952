use anyhow::Result;
use filekeep_core::{retime_operation, select_backend, Config, OutputFormatter, TimeRequest};
use tracing::debug;

use crate::cli::{OutputFormat, RetimeCli};

pub fn handle_retime(cli: &RetimeCli) -> Result<()> {
    let config = match &cli.common.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let format = cli
        .format
        .clone()
        .unwrap_or_else(|| config.retime.time_format.clone());

    let request = TimeRequest {
        created: cli.created.clone(),
        modified: cli.modified.clone(),
        accessed: cli.accessed.clone(),
    };
    let backend = select_backend();
    debug!(
        file = %cli.file.display(),
        format = %format,
        backend = backend.name(),
        "Editing timestamps"
    );
    let result = retime_operation(&cli.file, &request, &format, backend.as_ref())?;

    if cli.common.output == OutputFormat::Json || !cli.common.quiet {
        let text = result.format(cli.common.output.into());
        if text.ends_with('\n') {
            print!("{text}");
        } else {
            println!("{text}");
        }
    }

    Ok(())
}

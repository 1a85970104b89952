use anyhow::{anyhow, Context, Result};
use filekeep_core::output::reserial_banner;
use filekeep_core::{reserial_operation, Config, OutputFormatter, SerialConfig, SerialError};
use tracing::debug;

use crate::cli::{OutputFormat, ReserialCli};

/// Merge the command line over the loaded config
pub fn resolve_config(cli: &ReserialCli, config: &Config) -> Result<SerialConfig> {
    let mut resolved = config.reserial.clone();

    if let Some(folder) = &cli.folder {
        resolved.target_folder = Some(folder.clone());
    }
    if let Some(width) = cli.pad_width {
        resolved.pad_width = usize::try_from(width).context("--pad-width is too large")?;
    }
    if let Some(connector) = &cli.connector {
        resolved.connector.clone_from(connector);
    }
    if let Some(prefix) = &cli.prefix {
        resolved.prefix.clone_from(prefix);
    }
    if let Some(base) = cli.base {
        resolved.base_serial = base;
    }
    if !cli.separators.is_empty() {
        resolved.separators.clone_from(&cli.separators);
    }

    if resolved.target_folder.is_none() {
        return Err(anyhow!(
            "no target folder given; pass FOLDER or set reserial.target_folder in the config"
        ));
    }

    Ok(resolved)
}

fn load_config(cli: &ReserialCli) -> Result<Config> {
    match &cli.common.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

pub fn handle_reserial(cli: &ReserialCli, use_color: bool) -> Result<()> {
    let config = load_config(cli)?;
    let serial_config = resolve_config(cli, &config)?;
    debug!(?serial_config, "Resolved renamer settings");
    let show_summary = cli.common.output == OutputFormat::Summary && !cli.common.quiet;

    if show_summary {
        if let Some(folder) = &serial_config.target_folder {
            print!("{}", reserial_banner(&serial_config, folder));
        }
    }

    let result = match reserial_operation(&serial_config) {
        Ok(result) => result,
        // Reported, but not a failed run: nothing was touched
        Err(e @ SerialError::TargetFolderMissing(_)) => {
            eprintln!("Error: {e}");
            return Ok(());
        },
        Err(e) => return Err(e).context("Serial renaming failed"),
    };

    match cli.common.output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !cli.common.quiet {
                print!("{}", result.render_summary(use_color));
            }
        },
    }

    Ok(())
}

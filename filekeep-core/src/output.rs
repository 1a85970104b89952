use crate::config::SerialConfig;
use crate::remap::SerialRemapTable;
use crate::rename::{RenameOutcome, RenameStep};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::Color as AnsiColor;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Characters of the original name shown on a success line
const SHORT_NAME_CHARS: usize = 8;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

/// Result of a serial renaming run
#[derive(Debug, Serialize, Deserialize)]
pub struct ReserialResult {
    pub target_folder: PathBuf,
    pub base_serial: i64,
    pub separators: Vec<char>,
    pub matched: usize,
    pub outcome: RenameOutcome,
    /// Absent when no file matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<SerialRemapTable>,
}

impl ReserialResult {
    /// Summary text, optionally with coloured success/failure markers
    pub fn render_summary(&self, use_color: bool) -> String {
        let mut output = String::new();

        if self.matched == 0 {
            writeln!(
                output,
                "No matching files found in {}",
                self.target_folder.display()
            )
            .unwrap();
            return output;
        }

        let (ok_mark, fail_mark) = if use_color {
            (
                AnsiColor::Green.paint("✓").to_string(),
                AnsiColor::Red.paint("✗").to_string(),
            )
        } else {
            ("✓".to_string(), "✗".to_string())
        };

        for step in &self.outcome.steps {
            match step {
                RenameStep::Renamed(renamed) => {
                    let short: String = file_name(&renamed.from)
                        .chars()
                        .take(SHORT_NAME_CHARS)
                        .collect();
                    writeln!(
                        output,
                        "{ok_mark} {short} -----> {}",
                        file_name(&renamed.to)
                    )
                    .unwrap();
                },
                RenameStep::Failed(failure) => {
                    writeln!(
                        output,
                        "{fail_mark} {}: {}",
                        file_name(&failure.file),
                        failure.error
                    )
                    .unwrap();
                },
            }
        }

        writeln!(
            output,
            "\nRenaming finished. Succeeded: {}, failed: {}",
            self.outcome.renamed().count(),
            self.outcome.failed().count()
        )
        .unwrap();
        writeln!(output, "Base serial: {}", self.base_serial).unwrap();
        writeln!(output, "Separators: {}", format_separators(&self.separators)).unwrap();

        if let Some(table) = &self.table {
            output.push_str(&render_serial_table(table, use_color));
            output.push('\n');
        }

        output
    }
}

impl OutputFormatter for ReserialResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "reserial",
            "target_folder": self.target_folder,
            "summary": {
                "matched": self.matched,
                "renamed": self.outcome.renamed().count(),
                "failed": self.outcome.failed().count(),
            },
            "steps": self.outcome.steps,
            "serials": self.table.as_ref().map(|t| json!({
                "base": t.base,
                "original": t.original,
                "reversed": t.reversed,
                "final": t.final_serials().iter().map(ToString::to_string).collect::<Vec<_>>(),
            })),
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        self.render_summary(false)
    }
}

/// Original, reversed and final serials side by side, one row per distinct
/// serial
pub fn render_serial_table(table: &SerialRemapTable, use_color: bool) -> String {
    let mut rendered = Table::new();
    rendered.set_content_arrangement(ContentArrangement::Disabled);

    if use_color {
        rendered.enforce_styling();
        rendered.set_header(vec![
            Cell::new("Original unique serials").fg(Color::Cyan),
            Cell::new("Reversed").fg(Color::Cyan),
            Cell::new("Final mapping").fg(Color::Cyan),
        ]);
    } else {
        rendered.set_header(vec!["Original unique serials", "Reversed", "Final mapping"]);
    }

    for ((original, reversed), final_serial) in table
        .original
        .iter()
        .zip(&table.reversed)
        .zip(table.final_serials())
    {
        rendered.add_row(vec![
            original.to_string(),
            reversed.to_string(),
            final_serial.to_string(),
        ]);
    }

    rendered.to_string()
}

/// Startup banner listing the effective renamer settings
pub fn reserial_banner(config: &SerialConfig, folder: &Path) -> String {
    let mut output = String::from("===== Serial renamer =====\n");
    writeln!(output, "Target folder: {}", folder.display()).unwrap();
    writeln!(output, "Serial padding: {} digits", config.pad_width).unwrap();
    writeln!(output, "Connector: {:?}", config.connector).unwrap();
    writeln!(output, "Prefix: {:?}", config.prefix).unwrap();
    writeln!(output, "Base serial: {}", config.base_serial).unwrap();
    writeln!(output, "Separators: {}", format_separators(&config.separators)).unwrap();
    output.push_str("==========================\n");
    output
}

fn format_separators(separators: &[char]) -> String {
    let quoted: Vec<String> = separators.iter().map(|c| format!("{c:?}")).collect();
    format!("[{}]", quoted.join(", "))
}

fn describe_time(value: Option<&String>, ignored: bool, defaults_to_now: bool) -> String {
    match value {
        Some(_) if ignored => "ignored".to_string(),
        Some(v) => v.clone(),
        None if defaults_to_now => "set to current time".to_string(),
        None => "unchanged".to_string(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Result of a timestamp edit
#[derive(Debug, Serialize, Deserialize)]
pub struct RetimeResult {
    pub path: PathBuf,
    pub created: Option<String>,
    pub modified: Option<String>,
    pub accessed: Option<String>,
    pub backend: String,
    pub warnings: Vec<String>,
}

impl OutputFormatter for RetimeResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "retime",
            "path": self.path,
            "backend": self.backend,
            "created": self.created,
            "modified": self.modified,
            "accessed": self.accessed,
            "warnings": self.warnings,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let limited = self.backend == "limited";
        let mut output = String::new();

        for warning in &self.warnings {
            writeln!(output, "⚠️ Warning: {warning}").unwrap();
        }

        output.push_str("✅ File timestamps updated\n");
        writeln!(output, "📄 File: {}", self.path.display()).unwrap();
        writeln!(
            output,
            "🗓️ Created: {}",
            describe_time(self.created.as_ref(), limited, false)
        )
        .unwrap();
        writeln!(
            output,
            "🔄 Modified: {}",
            describe_time(self.modified.as_ref(), false, limited)
        )
        .unwrap();
        writeln!(
            output,
            "👀 Accessed: {}",
            describe_time(self.accessed.as_ref(), false, limited)
        )
        .unwrap();

        output
    }
}

use clap::Parser;
use std::path::PathBuf;

use super::types::OutputFormat;

/// Reverse the leading serial numbers of the files in a folder
///
/// Every file whose name starts with digits followed by a separator is
/// renamed to <prefix><padded new serial><connector><rest of name>. Distinct
/// serials are sorted, reversed and shifted by the base serial; files that
/// shared a serial keep sharing one.
#[derive(Parser, Debug)]
#[command(name = "reserial")]
#[command(author, version, about)]
pub struct ReserialCli {
    /// Folder whose files are renamed (falls back to reserial.target_folder in the config)
    #[arg(value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    /// Zero-pad new serials to this many digits
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..=64))]
    pub pad_width: Option<u64>,

    /// Text inserted between the new serial and the rest of the name
    #[arg(long, value_name = "TEXT")]
    pub connector: Option<String>,

    /// Text prepended to every new file name
    #[arg(long, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Constant added to every reversed serial (may be negative)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub base: Option<i64>,

    /// Separator character allowed after the leading serial; repeat for several
    #[arg(long = "separator", value_name = "CHAR")]
    pub separators: Vec<char>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Overwrite a file's creation, modification and access times
///
/// Times are read in the local time zone. On Windows, times that are not
/// given keep their current value. Elsewhere the creation time cannot be
/// changed, and modification/access times that are not given become the
/// current time.
#[derive(Parser, Debug)]
#[command(name = "retime")]
#[command(author, version, about)]
pub struct RetimeCli {
    /// File whose timestamps are changed
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// New creation time (Windows only)
    #[arg(short = 'c', long, value_name = "TIME")]
    pub created: Option<String>,

    /// New modification time
    #[arg(short = 'm', long, value_name = "TIME")]
    pub modified: Option<String>,

    /// New access time
    #[arg(short = 'a', long, value_name = "TIME")]
    pub accessed: Option<String>,

    /// chrono strftime format of the time arguments [default: "%Y-%m-%d %H:%M:%S"]
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments shared by both tools
#[derive(clap::Args, Debug, Clone)]
pub struct CommonArgs {
    /// Read settings from this TOML file instead of .filekeep/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,

    /// Print nothing on success
    #[arg(short, long)]
    pub quiet: bool,

    /// Log more detail to stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

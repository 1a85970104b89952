#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod classify;
pub mod config;
pub mod error;
pub mod operations;
pub mod output;
pub mod remap;
pub mod rename;
pub mod scanner;
pub mod timestamp;

pub use classify::{split_extension, Classification, SerialPattern};
pub use config::{Config, SerialConfig, TimeConfig, DEFAULT_TIME_FORMAT};
pub use error::{SerialError, TimestampError};
pub use operations::{reserial_operation, retime_operation};
pub use output::{OutputFormat, OutputFormatter, ReserialResult, RetimeResult};
pub use remap::SerialRemapTable;
pub use rename::{
    execute_renames, format_serial, RenameFailure, RenameOutcome, RenameStep, RenamedFile,
};
pub use scanner::{scan_folder, SerialFileEntry};
pub use timestamp::{
    modify_file_times, parse_time, select_backend, FullBackend, LimitedBackend, TimeRequest,
    TimestampBackend, TimestampOutcome, TimestampSpec,
};

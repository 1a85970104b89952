pub mod args;
pub mod types;

pub use args::{ReserialCli, RetimeCli};
pub use types::OutputFormat;

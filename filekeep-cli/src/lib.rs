pub mod cli;
pub mod logging;
pub mod reserial;
pub mod retime;

pub use cli::{OutputFormat, ReserialCli, RetimeCli};

//! High-level operations that correspond to the command-line tools
//!
//! These tie the core pieces together and return structured results,
//! leaving argument parsing and printing to the CLI crate.

pub mod reserial;
pub mod retime;

pub use reserial::reserial_operation;
pub use retime::retime_operation;

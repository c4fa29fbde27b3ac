//! Logger setup for the gadget binaries.
//!
//! Everything logs through the `log` facade; this module only decides which
//! filter `env_logger` runs with.

mod init;

pub use init::{init_logging, LoggingConfig};

//! Logger bootstrap for binaries and examples embedding the engine.

mod init;

pub use init::{init_logging, LoggingConfig};

//! Configuration for the terrain renderer.
//!
//! Settings persist to disk as RON files and can be overridden from the
//! command line via clap. The debug section carries the explicit
//! tile-bounds visualization toggle that tile construction receives,
//! so the core stays testable without environment manipulation.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, LodConfig};
pub use error::ConfigError;

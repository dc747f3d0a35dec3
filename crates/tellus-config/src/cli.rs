//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terrain renderer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "tellus", about = "Tellus terrain renderer")]
pub struct CliArgs {
    /// Attach wireframe + label debug geometry to every surface tile.
    #[arg(long)]
    pub show_tile_bounds: Option<bool>,

    /// Zoom factor biasing the child subdivision distance test.
    #[arg(long)]
    pub zoom_factor: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(show) = args.show_tile_bounds {
            self.debug.show_tile_bounds = show;
        }
        if let Some(zoom) = args.zoom_factor {
            self.lod.zoom_factor = zoom;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            show_tile_bounds: Some(true),
            zoom_factor: None,
            log_level: Some("debug".to_string()),
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert!(config.debug.show_tile_bounds);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.lod.zoom_factor, 1.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs {
            show_tile_bounds: None,
            zoom_factor: None,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }
}

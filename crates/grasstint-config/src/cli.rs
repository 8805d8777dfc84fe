//! Command-line argument parsing for grasstint hosts.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// grasstint command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "grasstint", about = "Resolve and apply the home-site grass color")]
pub struct CliArgs {
    /// Site to activate (overrides `last_site`).
    #[arg(long)]
    pub site: Option<String>,

    /// Home body name.
    #[arg(long)]
    pub body: Option<String>,

    /// Color map image for the home body.
    #[arg(long)]
    pub color_map: Option<PathBuf>,

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
        if let Some(ref site) = args.site {
            self.sites.last_site = site.clone();
        }
        if let Some(ref body) = args.body {
            self.home_body = body.clone();
        }
        if let Some(ref path) = args.color_map {
            self.color_map.path = Some(path.clone());
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
            site: Some("Woomerang".to_string()),
            body: None,
            color_map: Some(PathBuf::from("kerbin.png")),
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.sites.last_site, "Woomerang");
        assert_eq!(config.color_map.path, Some(PathBuf::from("kerbin.png")));
        // Non-overridden fields retain defaults
        assert_eq!(config.home_body, "Kerbin");
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs {
            site: None,
            body: None,
            color_map: None,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["grasstint", "--body", "Duna", "--log-level", "debug"]);
        assert_eq!(args.body.as_deref(), Some("Duna"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.config.is_none());
    }
}

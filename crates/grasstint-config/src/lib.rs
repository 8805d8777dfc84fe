//! Configuration system for grasstint.
//!
//! Provides the site records the tint resolver reads, plus the tunables of the
//! tinting pipeline. Settings persist to disk as RON files and support CLI
//! overrides via clap and forward/backward compatible serialization.

mod cli;
mod config;
mod error;
mod site;

pub use cli::CliArgs;
pub use config::{
    ColorMapConfig, ColorMapNode, Config, DebugConfig, MaterialDecl, SceneConfig, TintConfig,
};
pub use error::{ConfigError, ValueError};
pub use site::{Site, SiteNode, SiteRegistry};

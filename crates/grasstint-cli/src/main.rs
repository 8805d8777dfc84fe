//! grasstint — resolve the home-site grass color from config and color map.
//!
//! Loads `config.ron`, builds a headless scene (color map bound to the home
//! body, grass materials, editor scenery), resolves the active site's ground
//! color, tints the grass materials and runs the editor hook. With `--bake`
//! the resolved color is written back as an explicit `grassColor` override.
//!
//! Run with: `cargo run -p grasstint-cli -- --site KSC`

mod host;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use grasstint_config::{CliArgs, Config};
use grasstint_core::ColorResolver;
use tracing::{error, info};

/// CLI arguments for the grasstint binary.
#[derive(Parser, Debug)]
#[command(name = "grasstint", about = "Resolve and apply the home-site grass color")]
struct ToolArgs {
    #[command(flatten)]
    common: CliArgs,

    /// Write the resolved color back to the active site as `grassColor`.
    #[arg(long)]
    bake: bool,
}

fn main() -> ExitCode {
    let args = ToolArgs::parse();

    let config_dir = args
        .common
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let existed = config_dir.join("config.ron").exists();
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("grasstint: {e}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args.common);

    grasstint_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );

    info!("{}", host::config_origin(&config_dir, existed));
    info!(
        "Home body: {} | Active site: {}",
        config.home_body, config.sites.last_site
    );

    let mut scene = host::build_scene(&config, &config_dir);
    let resolver = ColorResolver::from_config(&config.tint);

    let Some(color) = resolver.ground_color(&scene, &config) else {
        info!("No grass color for site {}", config.sites.last_site);
        return ExitCode::SUCCESS;
    };

    println!("{}", host::format_color(color));

    let report = host::tint_scene(&mut scene, &config, color);
    info!(
        "Tinted {} materials matching {:?}; editor terrain {}",
        report.tinted.len(),
        config.tint.shader_filter,
        if report.editor_fixed { "recolored" } else { "unchanged" }
    );

    if args.bake {
        if !host::bake_color(&mut config, color) {
            error!("Site {} is not defined; nothing to bake", config.sites.last_site);
            return ExitCode::FAILURE;
        }
        if let Err(e) = config.save(&config_dir) {
            error!("Failed to save baked color: {}", e);
            return ExitCode::FAILURE;
        }
        info!("Baked {} into {}", color, config_dir.join("config.ron").display());
    }

    ExitCode::SUCCESS
}

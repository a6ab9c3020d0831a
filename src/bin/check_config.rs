use std::path::PathBuf;

use anyhow::{Context, Result};
use canvas_markup::Config;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "check_config")]
#[command(version, about = "Validate a canvas-markup config file and print the effective settings")]
struct Cli {
    /// Config file to check (defaults to ~/.config/canvas-markup/config.toml)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // A missing default file yields the built-in defaults; an explicit path must exist.
    let config = match cli.path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    let rendered = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{rendered}");
    Ok(())
}

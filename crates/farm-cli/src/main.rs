//! buildfarm CLI
//!
//! Plans from-source builds of a ROS distribution: resolves dependency
//! closures from rosdistro metadata and writes the rosdep table, Makefile
//! and Dockerfile driving the build.

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use config::{FarmConfig, Overrides};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug)?;

    let config = FarmConfig::load(cli.config.as_deref())?.apply(Overrides {
        cache_dir: cli.cache_dir,
        distribution: cli.distribution,
        os_distribution: cli.os_distribution,
    });
    tracing::debug!("{config:?}");

    match cli.command {
        Commands::Generate { targets, output } => {
            commands::run_generate(&config, &targets, &output)
        }
        Commands::Resolve { packages, json } => commands::run_resolve(&config, &packages, json),
    }
}

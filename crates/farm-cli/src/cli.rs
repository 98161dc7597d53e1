//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// buildfarm - Generate build environments for ROS distributions from source
#[derive(Parser, Debug)]
#[command(name = "buildfarm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug messages
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, env = "BUILDFARM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Metadata cache directory
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// ROS distribution to build
    #[arg(long, global = true)]
    pub distribution: Option<String>,

    /// OS distribution the packages are built for
    #[arg(long, global = true)]
    pub os_distribution: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write rosdep.yaml, Makefile and Dockerfile for building targets
    Generate {
        /// Target packages to build
        #[arg(long, num_args = 1.., default_values_t = [String::from("desktop")])]
        targets: Vec<String>,

        /// Directory the files are written to
        #[arg(short, long, default_value = "docker")]
        output: PathBuf,
    },

    /// Print the classified dependency closure of packages
    Resolve {
        /// Packages to resolve
        #[arg(required = true)]
        packages: Vec<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

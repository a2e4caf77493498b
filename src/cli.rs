// src/cli.rs
//! CLI definitions for Pantry
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(author = "Pantry Contributors")]
#[command(version)]
#[command(about = "Recipe evaluator for packaging native libraries", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where to build and for which configuration
#[derive(Args, Debug, Clone)]
pub struct CookArgs {
    /// Path to the recipe file
    pub recipe: String,

    /// Source checkout the recipe builds from
    #[arg(short, long, default_value = ".")]
    pub checkout: String,

    /// Out-of-source build directory (default: <checkout>/build)
    #[arg(long)]
    pub build_dir: Option<String>,

    /// Profile file with [settings] and [options] tables
    #[arg(long)]
    pub profile: Option<String>,

    /// Setting override, e.g. -s build_type=Debug
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Option override, e.g. -o shared=True
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Number of parallel build jobs (default: all cores)
    #[arg(short, long)]
    pub jobs: Option<u32>,

    /// cmake executable
    #[arg(long, default_value = "cmake")]
    pub cmake: String,

    /// git executable
    #[arg(long, default_value = "git")]
    pub git: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse and validate a recipe, then show what it declares
    Inspect {
        /// Path to the recipe file
        recipe: String,
    },

    /// Resolve the package version for a checkout
    Version {
        /// Path to the recipe file
        recipe: String,

        /// Source checkout to describe
        #[arg(short, long, default_value = ".")]
        checkout: String,

        /// git executable
        #[arg(long, default_value = "git")]
        git: String,
    },

    /// Configure and compile without packaging
    Build {
        #[command(flatten)]
        args: CookArgs,
    },

    /// Package an already built tree
    Package {
        #[command(flatten)]
        args: CookArgs,

        /// Package root to copy files into
        #[arg(long)]
        output: String,
    },

    /// Resolve the version, build and package in one go
    Create {
        #[command(flatten)]
        args: CookArgs,

        /// Package root to copy files into
        #[arg(long)]
        output: String,
    },

    /// Show the link information consumers get
    Info {
        /// Path to the recipe file
        recipe: String,

        /// Option override, e.g. -o shared=True
        #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

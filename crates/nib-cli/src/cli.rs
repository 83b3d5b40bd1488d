//! CLI argument definitions for nib.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "nib",
    version,
    about = "Ahead-of-time native image builder for JVM applications",
    long_about = "nib locates the GraalVM native-image compiler on this machine, assembles \
                  its command line from the project's nib.toml, and runs it -- installing \
                  the missing compiler component via `gu` when it can."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a native image from the project's nib.toml
    Build {
        /// Pass agent-collected configuration hints to the compiler
        #[arg(long)]
        agent: bool,
        /// Output directory (default: build/native/<image-name>)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Java runtime installation to resolve the toolchain from
        #[arg(long, env = "JAVA_HOME")]
        java_home: Option<PathBuf>,
    },

    /// Resolve and print the native-image executable without building
    Which {
        /// Java runtime installation to resolve the toolchain from
        #[arg(long, env = "JAVA_HOME")]
        java_home: Option<PathBuf>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}

mod build;
mod which;

use miette::Result;

use crate::cli::{Cli, Command};

pub fn dispatch(args: Cli) -> Result<()> {
    match args.command {
        Command::Build {
            agent,
            output_dir,
            java_home,
        } => build::exec(agent, output_dir, java_home),
        Command::Which { java_home } => which::exec(java_home),
    }
}

//! Subprocess invocation with working-directory preparation.

use std::path::Path;

use nib_util::errors::NibError;
use nib_util::fs::ensure_dir;
use nib_util::process::{CommandLine, ProcessRunner};

/// Run an assembled command in `workdir`, creating the directory first.
///
/// Inability to create the working directory is fatal and no subprocess is
/// spawned. The raw exit code is returned unmodified; classification is the
/// orchestrator's job, and child output passes straight through.
pub fn run(
    cmd: &CommandLine,
    workdir: &Path,
    runner: &dyn ProcessRunner,
) -> Result<i32, NibError> {
    ensure_dir(workdir).map_err(|e| NibError::Resource {
        message: format!(
            "could not create working directory {}: {e}",
            workdir.display()
        ),
    })?;

    Ok(runner.run(cmd)?)
}

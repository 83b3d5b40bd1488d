use std::path::PathBuf;

use miette::Result;

use nib_image::build::ImageBuilder;
use nib_toolchain::probe::FsProber;
use nib_util::errors::NibError;
use nib_util::process::SystemRunner;

use crate::manifest;

pub fn exec(agent: bool, output_dir: Option<PathBuf>, java_home: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(NibError::Io)?;
    let (project_dir, manifest) = manifest::load(&cwd)?;
    tracing::debug!("Loaded manifest from {}", project_dir.display());

    let mut options = manifest.image;
    options.java_home = java_home;

    let out = output_dir
        .unwrap_or_else(|| project_dir.join("build").join("native").join(&options.name));

    // Snapshot the configuration; everything past this point reads the
    // frozen copy.
    let options = options.finalize();

    ImageBuilder::new(&FsProber, &SystemRunner).build(&options, agent, &out)?;
    Ok(())
}

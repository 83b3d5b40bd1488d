//! `nib.toml` discovery and parsing.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use nib_image::options::ImageOptions;
use nib_util::errors::NibError;

pub const MANIFEST_NAME: &str = "nib.toml";

/// The parsed representation of a `nib.toml` file.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub image: ImageOptions,
}

/// Find and parse the manifest by walking up from `start_dir`.
///
/// Returns the project directory (the one containing `nib.toml`) together
/// with the parsed manifest.
pub fn load(start_dir: &Path) -> Result<(PathBuf, Manifest), NibError> {
    let project_dir = nib_util::fs::find_ancestor_with(start_dir, MANIFEST_NAME).ok_or_else(
        || NibError::Manifest {
            message: format!("No {MANIFEST_NAME} found in this directory or any parent"),
        },
    )?;

    let text = std::fs::read_to_string(project_dir.join(MANIFEST_NAME))?;
    let manifest: Manifest = toml::from_str(&text).map_err(|e| NibError::Manifest {
        message: e.to_string(),
    })?;

    Ok((project_dir, manifest))
}

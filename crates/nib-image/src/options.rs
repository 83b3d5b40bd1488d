//! The native-image build configuration model.

use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::PathBuf;

use serde::Deserialize;

/// Native image build configuration, as supplied by the caller.
///
/// Mutable while being assembled (typically deserialized from the `[image]`
/// section of `nib.toml`, then adjusted from CLI flags); [`finalize`] freezes
/// it into the snapshot form the command-line builder accepts.
///
/// [`finalize`]: ImageOptions::finalize
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageOptions {
    /// Name of the produced image.
    pub name: String,

    /// Fully qualified main class.
    #[serde(default)]
    pub main_class: Option<String>,

    /// Classpath entries, joined with the platform separator at build time.
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Extra native-image arguments, passed through verbatim and never
    /// interpreted.
    #[serde(default)]
    pub build_args: Vec<String>,

    /// System properties baked into the image as `-D<key>=<value>`.
    ///
    /// Held in an ordered map so argument assembly stays deterministic.
    #[serde(default)]
    pub system_properties: BTreeMap<String, String>,

    #[serde(default)]
    pub verbose: bool,

    /// Emit debug info in the image.
    #[serde(default)]
    pub debug: bool,

    /// Allow native-image to produce a fallback image. Off means
    /// `--no-fallback`.
    #[serde(default = "default_fallback")]
    pub fallback: bool,

    /// Installation directory of the Java runtime selected for the build.
    /// Not part of the manifest; supplied by the caller (CLI flag or
    /// `JAVA_HOME`).
    #[serde(skip)]
    pub java_home: Option<PathBuf>,
}

fn default_fallback() -> bool {
    true
}

impl ImageOptions {
    /// Create options for an image with the given name and all defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            main_class: None,
            classpath: Vec::new(),
            build_args: Vec::new(),
            system_properties: BTreeMap::new(),
            verbose: false,
            debug: false,
            fallback: true,
            java_home: None,
        }
    }

    /// Freeze the configuration for the remainder of one build invocation.
    pub fn finalize(self) -> FinalizedOptions {
        FinalizedOptions(self)
    }
}

/// An immutable snapshot of [`ImageOptions`].
///
/// The command-line builder only accepts this type, so assembling arguments
/// from a configuration that is still being mutated does not compile.
#[derive(Debug, Clone)]
pub struct FinalizedOptions(ImageOptions);

impl Deref for FinalizedOptions {
    type Target = ImageOptions;

    fn deref(&self) -> &ImageOptions {
        &self.0
    }
}

//! Ordered discovery of the native-image executable.
//!
//! The search walks a fixed chain of named candidate sources and stops at
//! the first hit. `GRAALVM_HOME` is the one exception to silent fallback:
//! when it is set, it is authoritative, and an installation under it that
//! lacks native-image is a configuration error rather than a miss.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use nib_util::errors::NibError;

use crate::platform;
use crate::probe::PathProber;

/// Environment variable naming a GraalVM installation root.
pub const GRAALVM_HOME_VAR: &str = "GRAALVM_HOME";

/// Inputs to one resolution pass.
///
/// Environment values are snapshotted here at resolution time and never
/// cached across invocations.
#[derive(Debug, Clone, Default)]
pub struct LocateContext {
    /// Installation directory of the Java runtime selected for the build.
    pub java_home: Option<PathBuf>,
    /// The process search path (`PATH`).
    pub search_path: Option<OsString>,
    /// Value of `GRAALVM_HOME`, if set.
    pub graalvm_home: Option<PathBuf>,
}

impl LocateContext {
    /// Snapshot `PATH` and `GRAALVM_HOME` from the process environment.
    pub fn from_env(java_home: Option<PathBuf>) -> Self {
        Self {
            java_home,
            search_path: env::var_os("PATH"),
            graalvm_home: env::var_os(GRAALVM_HOME_VAR).map(PathBuf::from),
        }
    }
}

/// The ordered sources a native-image binary may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// `<java-home>/bin/` of the runtime selected for the build.
    JavaRuntime,
    /// Directories on the process search path.
    SearchPath,
    /// `<GRAALVM_HOME>/bin/`.
    HomeVariable,
}

impl Candidate {
    /// Human-readable source label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::JavaRuntime => "the build's Java runtime",
            Self::SearchPath => "PATH",
            Self::HomeVariable => "GRAALVM_HOME",
        }
    }
}

/// Fixed evaluation order; never reordered by configuration.
const SEARCH_ORDER: [Candidate; 3] = [
    Candidate::JavaRuntime,
    Candidate::SearchPath,
    Candidate::HomeVariable,
];

/// A confirmed-present native-image executable and the source it came from.
///
/// Only ever constructed after an existence check succeeds.
#[derive(Debug, Clone)]
pub struct ResolvedExecutable {
    pub path: PathBuf,
    pub candidate: Candidate,
}

/// Terminal outcome of one resolution pass.
#[derive(Debug, Clone)]
pub enum Located {
    Found(ResolvedExecutable),
    /// Nothing found anywhere. `install_root` is the runtime's `bin/`
    /// directory when a runtime home was known -- the only place the
    /// auto-installer is allowed to try.
    NotFound { install_root: Option<PathBuf> },
}

/// Walk the candidate chain and return the first native-image hit.
///
/// Existence checks are filesystem-presence only; no permission or version
/// probing, and no side effects.
pub fn locate(ctx: &LocateContext, prober: &dyn PathProber) -> Result<Located, NibError> {
    for candidate in SEARCH_ORDER {
        // Once the runtime root has missed, GRAALVM_HOME is validated
        // before any further fallback: it is explicit user intent, and
        // set-but-lacking-the-binary fails the pass even when a PATH
        // entry would have matched. A runtime-root hit never consults it.
        if candidate == Candidate::SearchPath {
            if let Some(home) = &ctx.graalvm_home {
                let exe = home.join("bin").join(platform::native_image_exe());
                if !prober.exists(&exe) {
                    return Err(NibError::Configuration {
                        message: format!(
                            "GRAALVM_HOME is set to {} but {} is not installed under it",
                            home.display(),
                            platform::native_image_exe()
                        ),
                    });
                }
            }
        }

        if let Some(path) = probe_candidate(candidate, ctx, prober) {
            tracing::debug!("Found {} via {}", path.display(), candidate.label());
            return Ok(Located::Found(ResolvedExecutable { path, candidate }));
        }
        tracing::debug!("No native-image via {}", candidate.label());
    }

    Ok(Located::NotFound {
        install_root: ctx.java_home.as_ref().map(|home| home.join("bin")),
    })
}

fn probe_candidate(
    candidate: Candidate,
    ctx: &LocateContext,
    prober: &dyn PathProber,
) -> Option<PathBuf> {
    match candidate {
        Candidate::JavaRuntime => ctx
            .java_home
            .as_ref()
            .map(|home| home.join("bin").join(platform::native_image_exe()))
            .filter(|exe| prober.exists(exe)),
        Candidate::SearchPath => {
            let path_var = ctx.search_path.as_ref()?;
            env::split_paths(path_var)
                .map(|dir| dir.join(platform::native_image_exe()))
                .find(|exe| prober.exists(exe))
        }
        Candidate::HomeVariable => ctx
            .graalvm_home
            .as_ref()
            .map(|home| home.join("bin").join(platform::native_image_exe()))
            .filter(|exe| prober.exists(exe)),
    }
}

//! Best-effort auto-install of native-image via the bundled `gu` installer.

use std::path::{Path, PathBuf};

use nib_util::errors::NibError;
use nib_util::process::{CommandLine, ProcessRunner};

use crate::platform;
use crate::probe::PathProber;

/// Component name passed to `gu install`.
pub const NATIVE_IMAGE_COMPONENT: &str = "native-image";

/// Outcome of a single auto-install attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// `gu` exited zero. The caller must re-run the existence check; a
    /// clean installer exit is not taken as proof the binary is there.
    Installed,
    /// No `gu` alongside the expected compiler location; nothing was
    /// spawned. The runtime at that root is probably not a GraalVM
    /// distribution.
    InstallerMissing { gu: PathBuf },
    /// `gu` ran and exited non-zero.
    InstallerFailed { code: i32 },
}

/// Try to provision native-image by running `gu install native-image` out
/// of the given `bin/` directory. Exactly one attempt; callers never retry.
///
/// Note that `gu` is looked up next to where the compiler was *expected*,
/// before the compiler's own presence is ever confirmed. A `gu` belonging
/// to an unrelated runtime found this way is trusted; that is a documented
/// assumption of the recovery path, not a verified property.
pub fn try_install(
    bin_dir: &Path,
    prober: &dyn PathProber,
    runner: &dyn ProcessRunner,
) -> Result<InstallOutcome, NibError> {
    let gu = bin_dir.join(platform::gu_exe());
    if !prober.exists(&gu) {
        return Ok(InstallOutcome::InstallerMissing { gu });
    }

    tracing::info!("Running {} install {}", gu.display(), NATIVE_IMAGE_COMPONENT);
    let cmd = CommandLine::new(&gu).args(["install", NATIVE_IMAGE_COMPONENT]);
    let code = runner.run(&cmd)?;

    if code == 0 {
        Ok(InstallOutcome::Installed)
    } else {
        tracing::warn!("gu exited with status {code}");
        Ok(InstallOutcome::InstallerFailed { code })
    }
}

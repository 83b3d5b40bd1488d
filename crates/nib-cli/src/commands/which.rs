use std::path::PathBuf;

use miette::Result;

use nib_toolchain::locator::{locate, LocateContext, Located};
use nib_toolchain::probe::FsProber;
use nib_util::errors::NibError;

/// Resolution only: never attempts an install.
pub fn exec(java_home: Option<PathBuf>) -> Result<()> {
    let ctx = LocateContext::from_env(java_home);
    match locate(&ctx, &FsProber)? {
        Located::Found(exe) => {
            println!("{} (via {})", exe.path.display(), exe.candidate.label());
            Ok(())
        }
        Located::NotFound { .. } => Err(NibError::Toolchain {
            message: "GraalVM native-image is missing from your system".to_string(),
        }
        .into()),
    }
}

//! The build orchestrator: resolve -> (auto-install -> re-check) ->
//! assemble command -> invoke -> classify.
//!
//! Each state is visited at most once per build pass; the single `gu`
//! install attempt inside resolution is the only retry anywhere.

use std::path::{Path, PathBuf};

use nib_toolchain::installer::{self, InstallOutcome};
use nib_toolchain::locator::{self, LocateContext, Located, ResolvedExecutable};
use nib_toolchain::platform;
use nib_toolchain::probe::PathProber;
use nib_util::errors::NibError;
use nib_util::fs::ensure_dir;
use nib_util::process::ProcessRunner;
use nib_util::progress::{status, status_info, status_warn};

use crate::cmdline::CommandLineBuilder;
use crate::invoke;
use crate::options::FinalizedOptions;

/// Record of a successful native-image invocation.
#[derive(Debug, Clone)]
pub struct BuiltImage {
    /// Path of the produced executable inside the output directory.
    pub image_path: PathBuf,
    /// The compiler binary that was invoked.
    pub compiler: PathBuf,
}

/// Composes the locator, the auto-installer, command assembly, and process
/// invocation behind a single entry point.
pub struct ImageBuilder<'a> {
    prober: &'a dyn PathProber,
    runner: &'a dyn ProcessRunner,
}

impl<'a> ImageBuilder<'a> {
    pub fn new(prober: &'a dyn PathProber, runner: &'a dyn ProcessRunner) -> Self {
        Self { prober, runner }
    }

    /// Run one full build pass against the current process environment.
    pub fn build(
        &self,
        options: &FinalizedOptions,
        agent_enabled: bool,
        output_dir: &Path,
    ) -> Result<BuiltImage, NibError> {
        let ctx = LocateContext::from_env(options.java_home.clone());
        self.build_with_context(&ctx, options, agent_enabled, output_dir)
    }

    /// Like [`build`](Self::build) but with an explicit environment
    /// snapshot, so the whole pass can run against test doubles.
    pub fn build_with_context(
        &self,
        ctx: &LocateContext,
        options: &FinalizedOptions,
        agent_enabled: bool,
        output_dir: &Path,
    ) -> Result<BuiltImage, NibError> {
        status_info("Resolving", "native-image");
        let compiler = self.resolve(ctx)?;
        tracing::debug!("Using executable path: {}", compiler.path.display());
        status("Compiling", &options.name);

        let supplier = Box::new(|| {
            ensure_dir(output_dir).map_err(|e| NibError::Resource {
                message: format!(
                    "could not create output directory {}: {e}",
                    output_dir.display()
                ),
            })?;
            Ok(output_dir.to_path_buf())
        });
        let cmd = CommandLineBuilder::new(options, agent_enabled, &options.name, supplier)
            .build(&compiler, output_dir)?;

        let code = invoke::run(&cmd, output_dir, self.runner)?;
        if code != 0 {
            return Err(NibError::Compilation {
                message: format!("native-image exited with status {code}"),
            });
        }

        let image_path = output_dir.join(format!(
            "{}{}",
            options.name,
            platform::executable_extension()
        ));
        status("Finished", &format!("image written to {}", image_path.display()));

        Ok(BuiltImage {
            image_path,
            compiler: compiler.path,
        })
    }

    /// Resolve the compiler to a terminal state: a confirmed-present path,
    /// or an error after every fallback and the one install attempt.
    pub fn resolve(&self, ctx: &LocateContext) -> Result<ResolvedExecutable, NibError> {
        match locator::locate(ctx, self.prober)? {
            Located::Found(exe) => Ok(exe),
            Located::NotFound {
                install_root: Some(bin),
            } => {
                status_warn(
                    "Installing",
                    "native-image was not found; trying `gu install native-image`",
                );
                self.install_and_recheck(ctx, &bin)
            }
            Located::NotFound { install_root: None } => Err(NibError::Toolchain {
                message: "GraalVM native-image is missing from your system".to_string(),
            }),
        }
    }

    fn install_and_recheck(
        &self,
        ctx: &LocateContext,
        bin: &Path,
    ) -> Result<ResolvedExecutable, NibError> {
        match installer::try_install(bin, self.prober, self.runner)? {
            // A clean installer exit is re-verified, never assumed.
            InstallOutcome::Installed => match locator::locate(ctx, self.prober)? {
                Located::Found(exe) => Ok(exe),
                Located::NotFound { .. } => Err(NibError::Toolchain {
                    message: "`gu` reported success but native-image is still missing"
                        .to_string(),
                }),
            },
            InstallOutcome::InstallerMissing { gu } => Err(NibError::Toolchain {
                message: format!(
                    "'{}' was not found; the JDK at that location is probably not a GraalVM distribution",
                    gu.display()
                ),
            }),
            InstallOutcome::InstallerFailed { code } => Err(NibError::Installer {
                message: format!("`gu install native-image` exited with status {code}"),
            }),
        }
    }
}

//! Deterministic native-image argument assembly.

use std::path::{Path, PathBuf};

use nib_toolchain::locator::ResolvedExecutable;
use nib_util::errors::NibError;
use nib_util::process::CommandLine;

use crate::options::FinalizedOptions;

/// Deferred computation of the output directory path.
///
/// Creating the output directory is a side effect of the same invocation,
/// so the path must not be read before that step has run. The builder holds
/// the computation and forces it only while assembling the final argument
/// list, immediately before the spawn.
pub type OutputPathSupplier<'a> = Box<dyn FnOnce() -> Result<PathBuf, NibError> + 'a>;

/// Maps a finalized options snapshot into the native-image argument list.
pub struct CommandLineBuilder<'a> {
    options: &'a FinalizedOptions,
    agent_enabled: bool,
    image_name: &'a str,
    output_path: OutputPathSupplier<'a>,
}

impl<'a> CommandLineBuilder<'a> {
    pub fn new(
        options: &'a FinalizedOptions,
        agent_enabled: bool,
        image_name: &'a str,
        output_path: OutputPathSupplier<'a>,
    ) -> Self {
        Self {
            options,
            agent_enabled,
            image_name,
            output_path,
        }
    }

    /// Assemble the full command line for a resolved executable.
    ///
    /// Deterministic: identical options and an identically-supplied output
    /// path yield a byte-identical argument sequence. Consumes the builder
    /// because the output-path computation runs at most once.
    pub fn build(
        self,
        executable: &ResolvedExecutable,
        workdir: &Path,
    ) -> Result<CommandLine, NibError> {
        let mut args: Vec<String> = Vec::new();

        if !self.options.classpath.is_empty() {
            args.push("-cp".into());
            args.push(join_classpath(&self.options.classpath));
        }
        for (key, value) in &self.options.system_properties {
            args.push(format!("-D{key}={value}"));
        }
        if self.options.verbose {
            args.push("--verbose".into());
        }
        if !self.options.fallback {
            args.push("--no-fallback".into());
        }
        if self.options.debug {
            args.push("-H:GenerateDebugInfo=1".into());
        }
        if self.agent_enabled {
            args.push("--allow-incomplete-classpath".into());
        }
        args.extend(self.options.build_args.iter().cloned());

        // Forced last: by this point the directory-creating side effect
        // captured in the supplier has run.
        let output = (self.output_path)()?;
        args.push(format!("-H:Path={}", output.display()));
        args.push(format!("-H:Name={}", self.image_name));
        if let Some(main) = &self.options.main_class {
            args.push(format!("-H:Class={main}"));
        }

        Ok(CommandLine::new(&executable.path).args(args).cwd(workdir))
    }
}

fn join_classpath(entries: &[PathBuf]) -> String {
    let sep = if cfg!(windows) { ";" } else { ":" };
    entries
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(sep)
}

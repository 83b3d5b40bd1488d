use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all nib operations.
#[derive(Debug, Error, Diagnostic)]
pub enum NibError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. nib.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your nib.toml for syntax errors"))]
    Manifest { message: String },

    /// GRAALVM_HOME points at an installation that lacks native-image.
    ///
    /// This is explicit user intent, so it is never papered over by the
    /// fallback chain or the auto-installer.
    #[error("Configuration error: {message}")]
    #[diagnostic(help(
        "Install native-image into the GRAALVM_HOME installation with `gu install native-image`, \
         or unset GRAALVM_HOME to fall back to the build's Java runtime"
    ))]
    Configuration { message: String },

    /// No usable native-image executable could be resolved.
    #[error("Toolchain error: {message}")]
    #[diagnostic(help(
        "Set the GRAALVM_HOME environment variable or install GraalVM with native-image \
         in a standard location recognized by the build's Java runtime selection"
    ))]
    Toolchain { message: String },

    /// The `gu` component installer ran but reported failure.
    #[error("Installer error: {message}")]
    #[diagnostic(help("Run `gu install native-image` manually to see the full installer output"))]
    Installer { message: String },

    /// native-image ran but exited with a non-zero status.
    #[error("Native image build failed: {message}")]
    Compilation { message: String },

    /// An output or working directory could not be prepared.
    #[error("Resource error: {message}")]
    #[diagnostic(help("Check filesystem permissions for the build output directory"))]
    Resource { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type NibResult<T> = miette::Result<T>;

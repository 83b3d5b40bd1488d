//! Platform-adjusted names of the GraalVM toolchain binaries.
//!
//! The suffix is applied here, once, so call sites never hardcode it.

/// File name of the native-image launcher inside `<root>/bin/`.
pub fn native_image_exe() -> &'static str {
    if cfg!(windows) {
        "native-image.cmd"
    } else {
        "native-image"
    }
}

/// File name of the `gu` component installer inside `<root>/bin/`.
pub fn gu_exe() -> &'static str {
    if cfg!(windows) {
        "gu.cmd"
    } else {
        "gu"
    }
}

/// Extension of executables produced by native-image on this platform.
pub fn executable_extension() -> &'static str {
    if cfg!(windows) {
        ".exe"
    } else {
        ""
    }
}

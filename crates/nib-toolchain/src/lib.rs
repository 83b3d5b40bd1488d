//! GraalVM toolchain resolution: ordered discovery of the `native-image`
//! compiler and best-effort auto-install of the missing component via the
//! `gu` installer bundled with GraalVM distributions.

pub mod installer;
pub mod locator;
pub mod platform;
pub mod probe;

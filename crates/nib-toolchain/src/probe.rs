use std::path::Path;

/// Capability seam for filesystem presence checks.
///
/// Resolution only ever asks "does this path exist" -- no permission or
/// version probing -- so the seam is a single method, and tests can model
/// an entire fake installation layout as a set of paths.
pub trait PathProber {
    fn exists(&self, path: &Path) -> bool;
}

/// Probes the real filesystem.
pub struct FsProber;

impl PathProber for FsProber {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

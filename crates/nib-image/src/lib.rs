//! Native image build core: the finalized options snapshot, deterministic
//! command-line assembly, subprocess invocation, and the orchestrator that
//! ties resolution, auto-install, and invocation together.

pub mod build;
pub mod cmdline;
pub mod invoke;
pub mod options;

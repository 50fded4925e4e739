//! External generator invocation for docbuilder.
//!
//! This crate provides a [`ProcessRunner`] trait so the build orchestration
//! never spawns processes directly. This enables:
//!
//! - **Unit testing** builds without an installed generator
//! - **Configurable executables** resolved on `PATH` or given as a path
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ProcessRunner`] trait with a single `run()` method
//! - [`SystemRunner`] implementation backed by `std::process`
//! - [`MockRunner`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use docbuilder_exec::{ProcessRunner, SystemRunner};
//!
//! let runner = SystemRunner::resolve("mkdocs")?;
//! let output = runner.run(Path::new("documentation"), &["build", "--clean"])?;
//! if !output.success() {
//!     for line in &output.lines {
//!         eprintln!("{line}");
//!     }
//! }
//! ```

#[cfg(any(test, feature = "mock"))]
mod mock;
mod runner;
mod system;

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockRunner, RecordedCall};
pub use runner::{ExecError, ProcessOutput, ProcessRunner};
pub use system::SystemRunner;

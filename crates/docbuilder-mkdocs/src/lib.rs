//! `mkdocs.yml` generation and MkDocs build orchestration.
//!
//! [`MkDocsBuilder`] owns the output root and the record. A build prepares
//! the root and docs directories, finalizes the record, writes
//! `mkdocs.yml`, and then runs `build --clean` through a
//! [`ProcessRunner`](docbuilder_exec::ProcessRunner).

mod builder;

pub use builder::{BuildError, MkDocsBuilder};

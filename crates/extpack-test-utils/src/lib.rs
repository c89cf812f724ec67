//! Shared test utilities for the extpack workspace.
//!
//! This crate provides standardised project fixtures to eliminate
//! duplication across crate test suites. It is a dev-dependency only and is
//! never published.
//!
//! # Modules
//!
//! - [`fixtures`]: canned file contents (raw script, config templates, manifest)
//! - [`project`]: [`TestProject`](project::TestProject) builder for extension projects on disk

pub mod fixtures;
pub mod project;

pub use project::TestProject;

//! Build and sync pipeline for a bookmarklet-based browser extension
//!
//! This crate turns a raw bookmarklet script into an installable extension
//! and keeps personal working copies in step with the project:
//!
//! - **Script normalization**: strip the bookmarklet wrapper, extract the version
//! - **Personal configs**: materialize, back up, restore and fill in `config.js`
//! - **Tree sync**: copy files and replace directories between roots
//! - **Packaging**: zip the extension directory, minus personal files
//! - **Workflows**: local build, personal sync, setup and smart sync
//!
//! # Architecture
//!
//! `extpack-core` sits above the filesystem layer and below the CLI:
//!
//! ```text
//!        extpack-cli
//!             |
//!        extpack-core
//!             |
//!   +---------+---------+
//!   |         |         |
//! extpack-fs  zip    walkdir
//! ```
//!
//! # Example
//!
//! ```ignore
//! use extpack_core::LocalBuild;
//! use extpack_fs::NormalizedPath;
//!
//! fn build() -> extpack_core::Result<()> {
//!     let report = LocalBuild::new(NormalizedPath::new("."))?.run()?;
//!     println!("built {}", report.version);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod layout;
pub mod manifest;
pub mod package;
pub mod personal;
pub mod preserve;
pub mod script;
pub mod sync;
pub mod workflow;

pub use error::{Error, Result};
pub use layout::{LAYOUT_FILE, ProjectLayout};
pub use manifest::BuildManifest;
pub use package::{ExclusionSet, PackageReport, Packager, list_entries};
pub use personal::{AppliedFields, ConfigBlob, ConfigStore, Materialized, PersonalFields, PersonalSettings};
pub use preserve::{PreservedFiles, RestoreOutcome};
pub use script::{RawScript, extract_version, normalize};
pub use sync::{SyncAction, SyncFileSet, SyncReport, TreeSync};
pub use workflow::{
    BuildReport, ConfigOutcome, LocalBuild, PersonalSync, PersonalSyncOptions, PersonalSyncReport,
    Setup, SetupOptions, SetupReport, SmartSync, SmartSyncReport, Stage,
};

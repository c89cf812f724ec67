//! Tree synchronization between a project root and another root
//!
//! This module provides:
//! - **file_set**: the validated list of files and directories to sync
//! - **tree_sync**: copy-overwrite for files, replace-not-merge for directories
//! - **report**: what a sync run did

mod file_set;
mod report;
mod tree_sync;

pub use file_set::SyncFileSet;
pub use report::{SyncAction, SyncReport};
pub use tree_sync::TreeSync;

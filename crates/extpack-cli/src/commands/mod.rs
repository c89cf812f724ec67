//! Command implementations for extpack-cli

pub mod build;
pub mod list;
pub mod setup;
pub mod sync;

pub use build::run_build;
pub use list::run_list;
pub use setup::{SetupArgs, run_setup};
pub use sync::{SyncToFolderArgs, run_sync_smart, run_sync_to_folder};

use colored::Colorize;
use extpack_core::{SyncAction, SyncReport};

/// Print non-fatal warnings collected by a workflow.
pub(crate) fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("{} {}", "WARN".yellow().bold(), warning);
    }
}

/// Print the actions of a sync, one per line.
pub(crate) fn print_sync_report(report: &SyncReport) {
    for action in &report.actions {
        let marker = match action {
            SyncAction::RestoredConfig { .. } | SyncAction::CreatedConfig { .. } => "*".cyan(),
            SyncAction::RemovedProjectConfig { .. } => "-".yellow(),
            _ => "+".green(),
        };
        println!("   {} {}", marker, action);
    }
    if !report.skipped.is_empty() {
        println!(
            "   {} not in project: {}",
            "~".dimmed(),
            report.skipped.join(", ").dimmed()
        );
    }
}

//! Local build command

use std::path::Path;

use colored::Colorize;
use extpack_core::{BuildReport, LocalBuild};
use extpack_fs::NormalizedPath;

use super::print_warnings;
use crate::error::Result;

/// Run the build command
pub fn run_build(root: &Path) -> Result<()> {
    println!("{} Building extension...", "=>".blue().bold());

    let report = LocalBuild::new(NormalizedPath::new(root))?.run()?;
    print_build_report(&report);
    Ok(())
}

pub(crate) fn print_build_report(report: &BuildReport) {
    match &report.previous_version {
        Some(previous) if previous != &report.version => println!(
            "   {} version {} -> {}",
            "+".green(),
            previous.dimmed(),
            report.version.cyan()
        ),
        _ => println!("   {} version {}", "+".green(), report.version.cyan()),
    }
    println!("   {} {}", "+".green(), report.script_path);
    println!(
        "   {} {} ({} files)",
        "+".green(),
        report.archive.archive_path,
        report.archive.entries.len()
    );
    if !report.archive.excluded.is_empty() {
        println!(
            "   {} left out: {}",
            "-".dimmed(),
            report.archive.excluded.join(", ").dimmed()
        );
    }
    tracing::debug!(checksum = %report.archive.checksum, "archive checksum");

    print_warnings(&report.warnings);
    println!("{} Build complete.", "OK".green().bold());
}

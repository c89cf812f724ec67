//! Personal folder and smart sync commands

use std::path::{Path, PathBuf};

use colored::Colorize;
use extpack_core::{PersonalSync, PersonalSyncOptions, SmartSync};
use extpack_fs::NormalizedPath;

use super::build::print_build_report;
use super::{print_sync_report, print_warnings};
use crate::error::{CliError, Result};
use crate::interactive;

/// Flags given to `extpack sync-to-folder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncToFolderArgs {
    pub yes: bool,
    pub no_init_configs: bool,
    pub build: bool,
}

/// Run the sync-to-folder command
pub fn run_sync_to_folder(root: &Path, target: Option<PathBuf>, args: SyncToFolderArgs) -> Result<()> {
    let target = match target {
        Some(target) => target,
        None => interactive::prompt_target_folder()?,
    };
    let target = if target.is_absolute() {
        target
    } else {
        std::env::current_dir()?.join(target)
    };

    if !target.is_dir() {
        if !(args.yes || interactive::confirm_create_folder(&target)?) {
            return Err(CliError::user(format!(
                "{} does not exist. Create it or pass --yes.",
                target.display()
            )));
        }
        std::fs::create_dir_all(&target)?;
        println!("   {} created {}", "+".green(), target.display());
    }

    println!(
        "{} Syncing project to {}...",
        "=>".blue().bold(),
        target.display().to_string().cyan()
    );

    let report = PersonalSync::new(NormalizedPath::new(root), NormalizedPath::new(&target))
        .with_options(PersonalSyncOptions {
            materialize_missing_configs: !args.no_init_configs,
            rebuild: args.build,
        })
        .run()?;

    print_sync_report(&report.sync);
    print_warnings(report.warnings());
    if let Some(build) = &report.build {
        print_build_report(build);
    }
    println!("{} Sync complete. Personal configs were kept.", "OK".green().bold());
    Ok(())
}

/// Run the sync-smart command
pub fn run_sync_smart(root: &Path) -> Result<()> {
    println!("{} Syncing from config.js settings...", "=>".blue().bold());

    let report = SmartSync::new(NormalizedPath::new(root))?.run()?;

    match (&report.personal_folder, &report.personal) {
        (Some(folder), Some(personal)) => {
            println!("{} Personal folder {}", "=>".blue().bold(), folder.as_str().cyan());
            print_sync_report(&personal.sync);
        }
        _ => println!("   {} personal sync skipped", "~".dimmed()),
    }

    println!(
        "{} Addon folder {}",
        "=>".blue().bold(),
        report.addon_folder.as_str().cyan()
    );
    print_sync_report(&report.publish);

    print_warnings(&report.warnings);
    println!("{} Smart sync complete.", "OK".green().bold());
    Ok(())
}

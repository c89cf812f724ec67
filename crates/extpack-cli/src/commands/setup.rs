//! First-time setup command

use std::path::Path;

use colored::Colorize;
use extpack_core::{ConfigOutcome, Setup, SetupOptions};
use extpack_fs::NormalizedPath;

use super::build::print_build_report;
use super::print_warnings;
use crate::error::Result;
use crate::interactive;

/// Flags given to `extpack setup`.
#[derive(Debug, Clone, Default)]
pub struct SetupArgs {
    pub name: Option<String>,
    pub position: Option<String>,
    pub expertise: Option<String>,
    pub overwrite: bool,
    pub no_build: bool,
}

/// Run the setup command
///
/// Requirements are checked before anything is asked, so a broken project
/// fails without prompting.
pub fn run_setup(root: &Path, args: SetupArgs) -> Result<()> {
    println!("{} Setting up extension...", "=>".blue().bold());

    let setup = Setup::new(NormalizedPath::new(root))?;
    setup.check_requirements()?;

    let overwrite = if setup.config_exists() && !args.overwrite {
        interactive::confirm_overwrite(&setup.config_path().to_native())?
    } else {
        args.overwrite
    };

    let fields = if setup.config_exists() && !overwrite {
        Default::default()
    } else {
        interactive::prompt_personal_fields(args.name, args.position, args.expertise)?
    };

    let report = setup.run(&SetupOptions {
        fields,
        overwrite,
        skip_build: args.no_build,
    })?;

    for notice in &report.notices {
        println!("{} {}", "NOTE".cyan().bold(), notice);
    }
    match report.config {
        ConfigOutcome::Written(applied) if applied.is_complete() => {
            println!("   {} {}", "+".green(), report.config_path);
        }
        ConfigOutcome::Written(_) => {
            println!(
                "   {} {} {}",
                "+".green(),
                report.config_path,
                "(incomplete)".yellow()
            );
        }
        ConfigOutcome::Kept => {
            println!("   {} {} kept", "=".dimmed(), report.config_path);
        }
    }
    print_warnings(&report.warnings);

    if let Some(build) = &report.build {
        print_build_report(build);
    }

    println!("{} Setup complete.", "OK".green().bold());
    if report.build.is_some() {
        println!();
        println!(
            "Load the extension from {} in your browser.",
            format!("{}/", setup.layout().addon_dir).cyan()
        );
    }
    Ok(())
}

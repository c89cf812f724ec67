//! extpack CLI
//!
//! The command-line interface for building, packaging and syncing the
//! bookmarklet extension.

mod cli;
mod commands;
mod error;
mod interactive;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::{SetupArgs, SyncToFolderArgs};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("{}: tracing subscriber already set", "warning".yellow().bold());
        }
        tracing::debug!("Verbose mode enabled");
    }

    let root = match cli.project {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(cmd) => execute_command(root, cmd),
        None => {
            // No command provided - show help hint
            println!("{} bookmarklet extension builder", "extpack".green().bold());
            println!();
            println!("Run {} for available commands.", "extpack --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(root: PathBuf, cmd: Commands) -> Result<()> {
    tracing::debug!(root = %root.display(), ?cmd, "executing command");
    match cmd {
        Commands::Build => commands::run_build(&root),
        Commands::Setup {
            name,
            position,
            expertise,
            overwrite,
            no_build,
        } => commands::run_setup(
            &root,
            SetupArgs {
                name,
                position,
                expertise,
                overwrite,
                no_build,
            },
        ),
        Commands::SyncToFolder {
            path,
            yes,
            no_init_configs,
            build,
        } => commands::run_sync_to_folder(
            &root,
            path,
            SyncToFolderArgs {
                yes,
                no_init_configs,
                build,
            },
        ),
        Commands::SyncSmart => commands::run_sync_smart(&root),
        Commands::List { archive } => commands::run_list(&root, &archive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extpack_test_utils::TestProject;

    #[test]
    fn test_build_with_temp_project() {
        let project = TestProject::complete("1.0");
        project.with_personal_config("Ana Lima", "Recruiter", "Data");

        let result = commands::run_build(project.root());
        assert!(result.is_ok());
        project.assert_file_exists("linkedin-addon/linkedin-addon-local.zip");
    }

    #[test]
    fn test_build_failure_is_an_error() {
        let project = TestProject::complete("1.0");
        project.remove("config.template.js");

        let result = commands::run_build(project.root());
        assert!(result.is_err());
    }

    #[test]
    fn test_setup_with_flags_does_not_prompt() {
        let project = TestProject::complete("1.0");

        let result = commands::run_setup(
            project.root(),
            SetupArgs {
                name: Some("Ana Lima".into()),
                position: Some("Recruiter".into()),
                expertise: Some("Data".into()),
                overwrite: false,
                no_build: true,
            },
        );
        assert!(result.is_ok());
        project.assert_file_contains("config.js", "Ana Lima");
    }

    #[test]
    fn test_list_missing_archive_is_an_error() {
        let project = TestProject::new();
        let result = commands::run_list(project.root(), std::path::Path::new("nope.zip"));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }
}

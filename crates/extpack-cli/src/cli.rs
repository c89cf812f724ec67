//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// extpack - Build, package and sync a bookmarklet browser extension
#[derive(Parser, Debug)]
#[command(name = "extpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long = "project", global = true, value_name = "DIR", env = "EXTPACK_PROJECT")]
    pub project: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build the extension locally
    ///
    /// Copies config.js into the extension, regenerates script.js from the
    /// raw script, stamps its version into manifest.json and writes the
    /// archive. config.js is never packaged.
    Build,

    /// First-time setup: create config.js and run a build
    ///
    /// Prompts for any personal field not given as a flag.
    ///
    /// Examples:
    ///   extpack setup
    ///   extpack setup --name "Ana Lima" --position Recruiter --expertise Data
    Setup {
        /// Full name
        #[arg(long)]
        name: Option<String>,

        /// Current position or job title
        #[arg(long)]
        position: Option<String>,

        /// Area of expertise or specialization
        #[arg(long)]
        expertise: Option<String>,

        /// Replace an existing config.js
        #[arg(long)]
        overwrite: bool,

        /// Do not build after writing the config
        #[arg(long)]
        no_build: bool,
    },

    /// Sync the project into a personal folder
    ///
    /// Personal config.js files in the target are kept.
    SyncToFolder {
        /// Target folder (prompted for when omitted)
        path: Option<PathBuf>,

        /// Create a missing target without asking
        #[arg(short, long)]
        yes: bool,

        /// Do not create missing configs from templates
        #[arg(long)]
        no_init_configs: bool,

        /// Build the extension inside the personal folder afterwards
        #[arg(long)]
        build: bool,
    },

    /// Sync using the folders configured in config.js
    SyncSmart,

    /// List the entries of a built archive
    List {
        /// Archive to inspect
        archive: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_command() {
        let cli = Cli::parse_from(["extpack"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(cli.project.is_none());
    }

    #[test]
    fn parse_build_command() {
        let cli = Cli::parse_from(["extpack", "build"]);
        assert!(matches!(cli.command, Some(Commands::Build)));
    }

    #[test]
    fn parse_global_flags_after_command() {
        let cli = Cli::parse_from(["extpack", "build", "-v", "-C", "/tmp/project"]);
        assert!(cli.verbose);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    fn parse_setup_with_fields() {
        let cli = Cli::parse_from([
            "extpack",
            "setup",
            "--name",
            "Ana Lima",
            "--position",
            "Recruiter",
            "--overwrite",
        ]);
        match cli.command {
            Some(Commands::Setup {
                name,
                position,
                expertise,
                overwrite,
                no_build,
            }) => {
                assert_eq!(name.as_deref(), Some("Ana Lima"));
                assert_eq!(position.as_deref(), Some("Recruiter"));
                assert_eq!(expertise, None);
                assert!(overwrite);
                assert!(!no_build);
            }
            _ => panic!("Expected Setup command"),
        }
    }

    #[test]
    fn parse_sync_to_folder() {
        let cli = Cli::parse_from(["extpack", "sync-to-folder", "../mine", "--yes"]);
        assert_eq!(
            cli.command,
            Some(Commands::SyncToFolder {
                path: Some(PathBuf::from("../mine")),
                yes: true,
                no_init_configs: false,
                build: false,
            })
        );
    }

    #[test]
    fn parse_sync_to_folder_without_path() {
        let cli = Cli::parse_from(["extpack", "sync-to-folder", "--no-init-configs"]);
        assert!(matches!(
            cli.command,
            Some(Commands::SyncToFolder {
                path: None,
                yes: false,
                no_init_configs: true,
                build: false
            })
        ));
    }

    #[test]
    fn parse_sync_smart() {
        let cli = Cli::parse_from(["extpack", "sync-smart"]);
        assert!(matches!(cli.command, Some(Commands::SyncSmart)));
    }

    #[test]
    fn parse_list_requires_archive() {
        assert!(Cli::try_parse_from(["extpack", "list"]).is_err());
        let cli = Cli::parse_from(["extpack", "list", "addon.zip"]);
        assert!(matches!(cli.command, Some(Commands::List { .. })));
    }
}

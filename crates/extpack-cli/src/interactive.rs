//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based input. When stdin is not a terminal
//! nothing is prompted: missing answers stay empty and confirmations take
//! their conservative default.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use colored::Colorize;
use dialoguer::{Confirm, Input};
use extpack_core::PersonalFields;

use crate::error::{CliError, Result};

/// Whether prompts can be shown.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Fill in every field not already given, prompting for each one.
pub fn prompt_personal_fields(
    name: Option<String>,
    position: Option<String>,
    expertise: Option<String>,
) -> Result<PersonalFields> {
    let interactive = is_interactive();
    if interactive && (name.is_none() || position.is_none() || expertise.is_none()) {
        println!();
        println!("{}", "Personal details (leave blank to fill in later):".bold());
    }

    let ask = |given: Option<String>, prompt: &str| -> Result<String> {
        match given {
            Some(value) => Ok(value),
            None if interactive => Ok(Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?),
            None => Ok(String::new()),
        }
    };

    let fields = PersonalFields::new(
        ask(name, "Full name")?,
        ask(position, "Current position or job title")?,
        ask(expertise, "Area of expertise or specialization")?,
    );
    Ok(fields)
}

/// Ask whether an existing config should be replaced. Defaults to no.
pub fn confirm_overwrite(path: &Path) -> Result<bool> {
    if !is_interactive() {
        return Ok(false);
    }
    Ok(Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite it?", path.display()))
        .default(false)
        .interact()?)
}

/// Ask for the personal folder to sync into.
pub fn prompt_target_folder() -> Result<PathBuf> {
    if !is_interactive() {
        return Err(CliError::user(
            "No target folder given. Pass it as an argument: extpack sync-to-folder <PATH>",
        ));
    }
    let folder: String = Input::new()
        .with_prompt("Personal folder to sync into")
        .interact_text()?;
    let folder = folder.trim();
    if folder.is_empty() {
        return Err(CliError::user("Sync cancelled: no target folder given."));
    }
    Ok(PathBuf::from(folder))
}

/// Ask whether a missing target folder should be created. Defaults to no.
pub fn confirm_create_folder(path: &Path) -> Result<bool> {
    if !is_interactive() {
        return Ok(false);
    }
    Ok(Confirm::new()
        .with_prompt(format!("{} does not exist. Create it?", path.display()))
        .default(false)
        .interact()?)
}

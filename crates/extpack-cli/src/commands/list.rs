//! Archive listing command

use std::path::Path;

use colored::Colorize;
use extpack_core::list_entries;
use extpack_fs::NormalizedPath;

use crate::error::Result;

/// Run the list command
///
/// Relative archive paths are taken from the project root.
pub fn run_list(root: &Path, archive: &Path) -> Result<()> {
    let archive = if archive.is_absolute() {
        archive.to_path_buf()
    } else {
        root.join(archive)
    };

    let entries = list_entries(&NormalizedPath::new(&archive))?;
    println!(
        "{} {} ({} entries)",
        "=>".blue().bold(),
        archive.display().to_string().cyan(),
        entries.len()
    );
    for entry in &entries {
        println!("   {}", entry);
    }
    Ok(())
}

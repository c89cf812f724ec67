//! Tests for copy-overwrite and replace-not-merge tree sync

use std::fs;
use std::path::Path;

use extpack_core::{Error, SyncAction, SyncFileSet, TreeSync};
use extpack_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn tree_sync(source: &TempDir, dest: &TempDir) -> TreeSync {
    TreeSync::new(
        NormalizedPath::new(source.path()),
        NormalizedPath::new(dest.path()),
    )
}

#[test]
fn test_files_overwrite_unconditionally() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(source.path(), "README.md", "new");
    write(dest.path(), "README.md", "old and longer");

    let set = SyncFileSet::new(["README.md"], Vec::<String>::new()).unwrap();
    let report = tree_sync(&source, &dest).run(&set).unwrap();

    assert_eq!(fs::read_to_string(dest.path().join("README.md")).unwrap(), "new");
    assert_eq!(report.copied_files(), vec!["README.md"]);
}

#[test]
fn test_directories_are_replaced_not_merged() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(source.path(), "addon/manifest.json", "{}");
    write(source.path(), "addon/firefox/manifest.json", "{}");
    write(dest.path(), "addon/leftover.js", "stale");

    let set = SyncFileSet::new(Vec::<String>::new(), ["addon"]).unwrap();
    let report = tree_sync(&source, &dest).run(&set).unwrap();

    assert!(!dest.path().join("addon/leftover.js").exists());
    assert!(dest.path().join("addon/firefox/manifest.json").is_file());
    assert_eq!(
        report.actions,
        vec![SyncAction::ReplacedDirectory {
            path: "addon".to_string(),
            files: 2,
        }]
    );
}

#[test]
fn test_entries_missing_at_source_are_skipped() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(dest.path(), "docs/keep.md", "mine");

    let set = SyncFileSet::new(["README.md"], ["docs"]).unwrap();
    let report = tree_sync(&source, &dest).run(&set).unwrap();

    assert!(report.actions.is_empty());
    assert_eq!(report.skipped, vec!["README.md", "docs"]);
    // An absent source directory never deletes the destination copy
    assert!(dest.path().join("docs/keep.md").is_file());
}

#[test]
fn test_same_root_is_refused() {
    let root = TempDir::new().unwrap();
    write(root.path(), "README.md", "x");

    let sync = TreeSync::new(
        NormalizedPath::new(root.path()),
        NormalizedPath::new(root.path().join(".")),
    );
    let set = SyncFileSet::new(["README.md"], Vec::<String>::new()).unwrap();

    assert!(matches!(sync.run(&set), Err(Error::OverlappingRoots { .. })));
}

#[test]
fn test_file_set_rejects_escaping_entries() {
    assert!(SyncFileSet::new(["../outside.js"], Vec::<String>::new()).is_err());
    assert!(SyncFileSet::new(Vec::<String>::new(), ["/abs"]).is_err());
}

//! Full-lifecycle scenarios against the fixture project in
//! `test-fixtures/projects/linkedin-connect`.
//!
//! Each test copies the fixture into a fresh temporary directory and drives
//! the workflows the way a user would: setup, build, sync, edit, re-sync.

use std::fs;
use std::path::{Path, PathBuf};

use extpack_core::{
    LocalBuild, PersonalFields, PersonalSync, Setup, SetupOptions, SmartSync, list_entries,
};
use extpack_fs::{NormalizedPath, io};
use extpack_test_utils::fixtures::SCRIPT_NAME;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/projects/linkedin-connect")
}

/// A fresh copy of the fixture project, as after a clone.
fn clone_fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    io::copy_tree(
        &NormalizedPath::new(fixture_root()),
        &NormalizedPath::new(temp.path()),
    )
    .unwrap();
    temp
}

fn root(temp: &TempDir) -> NormalizedPath {
    NormalizedPath::new(temp.path())
}

fn setup(temp: &TempDir) {
    Setup::new(root(temp))
        .unwrap()
        .run(&SetupOptions {
            fields: PersonalFields::new("Ana Lima", "Tech Recruiter", "Data Engineering"),
            ..SetupOptions::default()
        })
        .unwrap();
}

fn read(dir: &Path, relative: &str) -> String {
    fs::read_to_string(dir.join(relative)).unwrap()
}

#[test]
fn fresh_clone_setup_then_build() {
    let project = clone_fixture();

    let report = Setup::new(root(&project))
        .unwrap()
        .run(&SetupOptions {
            fields: PersonalFields::new("Ana Lima", "Tech Recruiter", "Data Engineering"),
            ..SetupOptions::default()
        })
        .unwrap();
    let build = report.build.expect("setup builds by default");

    assert_eq!(build.version, "1.7");
    assert_eq!(build.previous_version.as_deref(), Some("1.0"));
    assert!(build.warnings.is_empty(), "warnings: {:?}", build.warnings);

    // The personal config reached the unpacked extension but not the archive
    assert!(read(project.path(), "linkedin-addon/config.js").contains("Ana Lima"));
    let archive = NormalizedPath::new(project.path().join("linkedin-addon/linkedin-addon-local.zip"));
    let entries = list_entries(&archive).unwrap();
    assert!(!entries.iter().any(|e| e.rsplit('/').next() == Some("config.js")));
    assert!(entries.contains(&"script.js".to_string()));

    let manifest: serde_json::Value =
        serde_json::from_str(&read(project.path(), "linkedin-addon/manifest.json")).unwrap();
    assert_eq!(manifest["version"], "1.7");
    assert_eq!(
        manifest["description"],
        "Adds a personal note to LinkedIn connection requests"
    );

    let script = read(project.path(), "linkedin-addon/script.js");
    assert!(script.starts_with("const SCRIPT_VERSION = \"1.7\";"));
    assert!(!script.contains("javascript:"));
}

#[test]
fn rebuilding_unchanged_project_is_stable() {
    let project = clone_fixture();
    setup(&project);

    let first = LocalBuild::new(root(&project)).unwrap().run().unwrap();
    let second = LocalBuild::new(root(&project)).unwrap().run().unwrap();

    assert_eq!(first.archive.entries, second.archive.entries);
    assert_eq!(first.archive.checksum, second.archive.checksum);
}

#[test]
fn personal_copy_survives_resync() {
    let project = clone_fixture();
    setup(&project);
    let personal = TempDir::new().unwrap();
    let sync = || {
        PersonalSync::new(root(&project), NormalizedPath::new(personal.path()))
            .run()
            .unwrap()
    };

    sync();
    // The user personalizes their copy
    fs::write(personal.path().join("config.js"), "personal top-level").unwrap();
    fs::write(personal.path().join("linkedin-addon/config.js"), "personal nested").unwrap();

    // The project moves on
    let script = read(project.path(), SCRIPT_NAME).replace("\"1.7\"", "\"1.8\"");
    fs::write(project.path().join(SCRIPT_NAME), script).unwrap();
    LocalBuild::new(root(&project)).unwrap().run().unwrap();

    let report = sync();

    assert_eq!(read(personal.path(), "config.js"), "personal top-level");
    assert_eq!(read(personal.path(), "linkedin-addon/config.js"), "personal nested");
    assert!(read(personal.path(), SCRIPT_NAME).contains("\"1.8\""));
    assert!(read(personal.path(), "linkedin-addon/manifest.json").contains("\"1.8\""));
    assert!(report.warnings().is_empty(), "warnings: {:?}", report.warnings());
}

#[test]
fn first_sync_into_empty_folder_materializes_templates() {
    let project = clone_fixture();
    setup(&project);
    let personal = TempDir::new().unwrap();

    let report = PersonalSync::new(root(&project), NormalizedPath::new(personal.path()))
        .run()
        .unwrap();

    // Never the project owner's details
    assert!(!read(personal.path(), "config.js").contains("Ana Lima"));
    assert!(read(personal.path(), "config.js").contains("Your Full Name Here"));
    assert!(!read(personal.path(), "linkedin-addon/config.js").contains("Ana Lima"));
    assert!(!report.warnings().is_empty());
}

#[test]
fn smart_sync_follows_configured_folders() {
    let project = clone_fixture();
    setup(&project);
    let outside = TempDir::new().unwrap();
    let personal = outside.path().join("MeuLinkedIn");
    let addon = outside.path().join("addon-public");

    let config = read(project.path(), "config.js")
        .replace(
            "PERSONAL_FOLDER: \"\"",
            &format!("PERSONAL_FOLDER: \"{}\"", personal.to_string_lossy().replace('\\', "/")),
        )
        .replace(
            "ADDON_SYNC_FOLDER: \"\"",
            &format!("ADDON_SYNC_FOLDER: \"{}\"", addon.to_string_lossy().replace('\\', "/")),
        );
    fs::write(project.path().join("config.js"), config).unwrap();

    let report = SmartSync::new(root(&project)).unwrap().run().unwrap();

    assert!(report.personal.is_some());
    assert!(personal.join(SCRIPT_NAME).is_file());
    assert!(personal.join("config.js").is_file());
    assert!(addon.join("manifest.json").is_file());
    assert!(addon.join("firefox/manifest.json").is_file());
    assert!(!addon.join("config.js").exists());
    assert!(read(&addon, "script.js").starts_with("const SCRIPT_VERSION = \"1.7\";"));
}

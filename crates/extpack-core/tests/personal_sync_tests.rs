//! Tests for syncing a project into a personal folder

use std::fs;

use extpack_core::{
    Error, PersonalSync, PersonalSyncOptions, ProjectLayout, Stage, SyncAction, TreeSync,
};
use extpack_fs::NormalizedPath;
use extpack_test_utils::TestProject;
use extpack_test_utils::fixtures::{self, SCRIPT_NAME};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn sync(project: &TestProject, personal: &TempDir) -> extpack_core::Result<extpack_core::PersonalSyncReport> {
    PersonalSync::new(
        NormalizedPath::new(project.root()),
        NormalizedPath::new(personal.path()),
    )
    .run()
}

#[test]
fn test_sync_preserves_personal_configs() {
    // Both the top-level and the nested personal config survive untouched
    let project = TestProject::complete("1.5");
    project.with_file("config.js", "project top-level");
    project.with_addon_file("config.js", "project nested");

    let personal = TempDir::new().unwrap();
    fs::write(personal.path().join("config.js"), "MY top-level").unwrap();
    fs::create_dir_all(personal.path().join("linkedin-addon")).unwrap();
    fs::write(personal.path().join("linkedin-addon/config.js"), "MY nested").unwrap();

    let report = sync(&project, &personal).unwrap();

    assert_eq!(
        fs::read_to_string(personal.path().join("config.js")).unwrap(),
        "MY top-level"
    );
    assert_eq!(
        fs::read_to_string(personal.path().join("linkedin-addon/config.js")).unwrap(),
        "MY nested"
    );
    assert_eq!(
        fs::read_to_string(personal.path().join(SCRIPT_NAME)).unwrap(),
        fixtures::raw_script("1.5")
    );
    assert!(personal.path().join("linkedin-addon/manifest.json").is_file());
    assert!(report.sync.actions.contains(&SyncAction::RestoredConfig {
        path: "linkedin-addon/config.js".to_string()
    }));
    assert!(report.warnings().is_empty(), "unexpected warnings: {:?}", report.warnings());
}

#[test]
fn test_sync_replaces_directories() {
    // Stale files under a synced directory do not survive
    let project = TestProject::complete("1.0");
    let personal = TempDir::new().unwrap();
    fs::create_dir_all(personal.path().join("linkedin-addon/old")).unwrap();
    fs::write(personal.path().join("linkedin-addon/old/stale.js"), "stale").unwrap();
    fs::write(personal.path().join("notes.txt"), "mine").unwrap();

    let report = sync(&project, &personal).unwrap();

    assert!(!personal.path().join("linkedin-addon/old").exists());
    // Files outside the sync set are not touched
    assert!(personal.path().join("notes.txt").is_file());
    assert_eq!(report.sync.replaced_directories(), vec!["linkedin-addon"]);
}

#[test]
fn test_first_sync_materializes_configs_with_warning() {
    let project = TestProject::complete("1.0");
    project.with_personal_config("Project Owner", "Lead", "Hiring");
    project.with_addon_file("config.js", "project nested");
    let personal = TempDir::new().unwrap();

    let report = sync(&project, &personal).unwrap();

    // The project's own configs never leak into the personal copy
    assert_eq!(
        fs::read_to_string(personal.path().join("config.js")).unwrap(),
        fixtures::CONFIG_TEMPLATE
    );
    assert_eq!(
        fs::read_to_string(personal.path().join("linkedin-addon/config.js")).unwrap(),
        fixtures::CONFIG_TEMPLATE
    );
    assert!(report.sync.actions.contains(&SyncAction::RemovedProjectConfig {
        path: "linkedin-addon/config.js".to_string()
    }));
    assert!(report.sync.actions.contains(&SyncAction::CreatedConfig {
        path: "config.js".to_string()
    }));
    assert_eq!(report.warnings().len(), 2, "warnings: {:?}", report.warnings());
    assert_eq!(
        report.stages,
        vec![
            Stage::LoadPeerConfig,
            Stage::BackupPersonalConfigs,
            Stage::SyncFiles,
            Stage::SyncDirectories,
            Stage::RestorePersonalConfigs,
            Stage::MaterializeMissingConfigs,
            Stage::Done,
        ]
    );
    assert!(report.build.is_none());
}

#[test]
fn test_master_template_is_used_when_root_template_missing() {
    let project = TestProject::complete("1.0");
    project.remove("config.template.js");
    let personal = TempDir::new().unwrap();

    sync(&project, &personal).unwrap();

    assert_eq!(
        fs::read_to_string(personal.path().join("config.js")).unwrap(),
        fixtures::MASTER_TEMPLATE
    );
}

#[test]
fn test_materialization_can_be_disabled() {
    let project = TestProject::complete("1.0");
    let personal = TempDir::new().unwrap();

    let report = PersonalSync::new(
        NormalizedPath::new(project.root()),
        NormalizedPath::new(personal.path()),
    )
    .with_options(PersonalSyncOptions {
        materialize_missing_configs: false,
        ..PersonalSyncOptions::default()
    })
    .run()
    .unwrap();

    assert!(!personal.path().join("config.js").exists());
    assert!(!report.stages.contains(&Stage::MaterializeMissingConfigs));
}

#[test]
fn test_restored_config_wins_over_template() {
    // A config restored from backup is never replaced by a template
    let project = TestProject::complete("1.0");
    let personal = TempDir::new().unwrap();
    fs::write(personal.path().join("config.js"), "kept").unwrap();

    let report = sync(&project, &personal).unwrap();

    assert_eq!(
        fs::read_to_string(personal.path().join("config.js")).unwrap(),
        "kept"
    );
    assert!(!report.sync.actions.contains(&SyncAction::CreatedConfig {
        path: "config.js".to_string()
    }));
}

#[test]
fn test_rebuild_builds_the_personal_copy() {
    let project = TestProject::complete("1.9");
    let personal = TempDir::new().unwrap();
    fs::write(
        personal.path().join("config.js"),
        fixtures::personal_config("Ana Lima", "Recruiter", "Data"),
    )
    .unwrap();

    let report = PersonalSync::new(
        NormalizedPath::new(project.root()),
        NormalizedPath::new(personal.path()),
    )
    .with_options(PersonalSyncOptions {
        rebuild: true,
        ..PersonalSyncOptions::default()
    })
    .run()
    .unwrap();

    let build = report.build.expect("rebuild requested");
    assert_eq!(build.version, "1.9");
    assert_eq!(report.stages, PersonalSync::STAGES.to_vec());
    // The personal config, not the project's, went into the personal extension
    assert!(
        fs::read_to_string(personal.path().join("linkedin-addon/config.js"))
            .unwrap()
            .contains("Ana Lima")
    );
    assert!(personal.path().join("linkedin-addon/linkedin-addon-local.zip").is_file());
}

#[test]
fn test_failed_file_sync_still_restores_configs() {
    let project = TestProject::complete("1.0");
    let personal = TempDir::new().unwrap();
    let top = fixtures::personal_config("Alice", "Recruiter", "Data");
    let nested = fixtures::personal_config("Alice", "Recruiter", "Nested");
    fs::write(personal.path().join("config.js"), &top).unwrap();
    fs::create_dir_all(personal.path().join("linkedin-addon")).unwrap();
    fs::write(personal.path().join("linkedin-addon/config.js"), &nested).unwrap();
    // A directory where a project file should land makes the copy fail
    fs::create_dir_all(personal.path().join("README.md")).unwrap();

    let err = sync(&project, &personal).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::SyncFiles));
    assert_eq!(
        fs::read(personal.path().join("config.js")).unwrap(),
        top.as_bytes()
    );
    assert_eq!(
        fs::read(personal.path().join("linkedin-addon/config.js")).unwrap(),
        nested.as_bytes()
    );
}

#[test]
fn test_missing_personal_folder_fails_at_first_stage() {
    let project = TestProject::complete("1.0");
    let personal = TempDir::new().unwrap();
    let missing = personal.path().join("nope");

    let err = PersonalSync::new(
        NormalizedPath::new(project.root()),
        NormalizedPath::new(&missing),
    )
    .run()
    .unwrap_err();

    assert_eq!(err.stage(), Some(Stage::LoadPeerConfig));
    assert!(!missing.exists());
}

#[test]
fn test_sync_into_itself_is_refused() {
    let project = TestProject::complete("1.0");

    let err = PersonalSync::new(
        NormalizedPath::new(project.root()),
        NormalizedPath::new(project.root()),
    )
    .run()
    .unwrap_err();

    assert!(matches!(err.root_cause(), Error::OverlappingRoots { .. }));
    project.assert_file_exists("linkedin-addon/manifest.json");
}

#[test]
fn test_sync_into_synced_subdirectory_is_refused() {
    let project = TestProject::complete("1.0");
    let inside = NormalizedPath::new(project.path("linkedin-addon"));
    let layout = ProjectLayout::default();

    let tree = TreeSync::new(NormalizedPath::new(project.root()), inside);
    let err = tree.check_roots(&layout.sync_file_set().unwrap()).unwrap_err();

    assert!(matches!(err, Error::OverlappingRoots { .. }));
}

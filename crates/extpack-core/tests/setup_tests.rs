//! Tests for the setup workflow

use extpack_core::{ConfigOutcome, Error, PersonalFields, Setup, SetupOptions, Stage};
use extpack_fs::NormalizedPath;
use extpack_test_utils::TestProject;
use extpack_test_utils::fixtures;
use pretty_assertions::assert_eq;

fn setup(project: &TestProject) -> Setup {
    Setup::new(NormalizedPath::new(project.root())).unwrap()
}

fn answers() -> SetupOptions {
    SetupOptions {
        fields: PersonalFields::new("Ana Lima", "Tech Recruiter", "Data Engineering"),
        ..SetupOptions::default()
    }
}

#[test]
fn test_fresh_setup_writes_config_and_builds() {
    let project = TestProject::complete("1.4");

    let report = setup(&project).run(&answers()).unwrap();

    assert!(matches!(report.config, ConfigOutcome::Written(applied) if applied.is_complete()));
    project.assert_file_contains("config.js", "MY_NAME: \"Ana Lima\"");
    project.assert_file_contains("config.js", "POS_SEARCH: \"Data Engineering\"");
    // The build copied the new config into the extension
    project.assert_file_contains("linkedin-addon/config.js", "Ana Lima");

    let build = report.build.expect("build ran");
    assert_eq!(build.version, "1.4");
    assert!(build.warnings.is_empty(), "build warnings: {:?}", build.warnings);
    assert_eq!(report.stages, Setup::STAGES.to_vec());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_all_missing_requirements_are_reported_together() {
    let project = TestProject::complete("1.4");
    project.remove("linkedin-addon/icon.png");
    project.remove("linkedin-addon/background.js");

    let err = setup(&project).run(&answers()).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::CheckRequirements));
    let Error::MissingRequiredFiles { paths } = err.root_cause() else {
        panic!("expected MissingRequiredFiles, got {err:?}");
    };
    assert_eq!(paths.len(), 2);
    project.assert_file_not_exists("config.js");
}

#[test]
fn test_existing_config_is_kept_with_notice() {
    let project = TestProject::complete("1.4");
    project.with_personal_config("Existing", "Person", "Stuff");
    let before = project.read("config.js");

    let report = setup(&project).run(&answers()).unwrap();

    assert_eq!(report.config, ConfigOutcome::Kept);
    assert_eq!(project.read("config.js"), before);
    assert_eq!(report.notices.len(), 1);
    assert!(report.notices[0].contains("already exists"));
}

#[test]
fn test_overwrite_replaces_existing_config() {
    let project = TestProject::complete("1.4");
    project.with_personal_config("Existing", "Person", "Stuff");

    let options = SetupOptions {
        overwrite: true,
        ..answers()
    };
    setup(&project).run(&options).unwrap();

    project.assert_file_contains("config.js", "Ana Lima");
    assert!(!project.read("config.js").contains("Existing"));
}

#[test]
fn test_partial_answers_apply_per_field_with_warning() {
    let project = TestProject::complete("1.4");
    let options = SetupOptions {
        fields: PersonalFields::new("Ana Lima", "", "  "),
        skip_build: true,
        ..SetupOptions::default()
    };

    let report = setup(&project).run(&options).unwrap();

    let ConfigOutcome::Written(applied) = report.config else {
        panic!("config should have been written");
    };
    assert!(applied.name);
    assert!(!applied.position);
    assert!(!applied.expertise);
    project.assert_file_contains("config.js", "Ana Lima");
    project.assert_file_contains("config.js", "Your Current Position or Job Title");
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_skip_build_leaves_extension_untouched() {
    let project = TestProject::complete("1.4");
    let options = SetupOptions {
        skip_build: true,
        ..answers()
    };

    let report = setup(&project).run(&options).unwrap();

    assert!(report.build.is_none());
    assert!(!report.stages.contains(&Stage::Build));
    project.assert_file_not_exists("linkedin-addon/script.js");
}

#[test]
fn test_addon_template_is_used_without_root_template() {
    let project = TestProject::complete("1.4");
    project.remove("config.template.js");
    project.with_addon_file("config.template.js", &fixtures::personal_config(
        "Your Full Name Here",
        "Your Current Position or Job Title",
        "Your Area of Expertise or Specialization",
    ));

    setup(&project)
        .run(&SetupOptions {
            skip_build: true,
            ..answers()
        })
        .unwrap();

    project.assert_file_contains("config.js", "MY_POSITION: \"Tech Recruiter\"");
    assert!(!project.read("config.js").contains("PERSONAL_FOLDER"));
}

#[test]
fn test_build_failure_reports_inner_stage() {
    let project = TestProject::complete("1.4");
    project.with_file(fixtures::SCRIPT_NAME, fixtures::UNVERSIONED_SCRIPT);

    let err = setup(&project).run(&answers()).unwrap_err();

    // The config was written before the build failed
    project.assert_file_contains("config.js", "Ana Lima");
    assert_eq!(err.stage(), Some(Stage::ExtractVersion));
}

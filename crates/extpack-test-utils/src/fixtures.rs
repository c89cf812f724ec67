//! Canned file contents for extension projects.

/// Default name of the raw bookmarklet script.
pub const SCRIPT_NAME: &str = "Adiciona Recrutadores Avançado.js";

/// Default extension directory.
pub const ADDON_DIR: &str = "linkedin-addon";

/// Body every [`raw_script`] carries after the version line.
pub const SCRIPT_BODY: &str = "console.log(\"connect\");";

/// A bookmarklet declaring `version`.
pub fn raw_script(version: &str) -> String {
    format!(
        "javascript:(function () {{\nconst SCRIPT_VERSION = \"{version}\";\n{SCRIPT_BODY}\n}})();\n"
    )
}

/// What [`raw_script`] normalizes to.
pub fn normalized_script(version: &str) -> String {
    format!("const SCRIPT_VERSION = \"{version}\";\n{SCRIPT_BODY}")
}

/// A bookmarklet with no version declaration.
pub const UNVERSIONED_SCRIPT: &str = "javascript:(function () {\nconsole.log(\"connect\");\n})();\n";

/// Config template with the English placeholders and no folder settings.
pub const CONFIG_TEMPLATE: &str = r#"const LINKEDIN_CONFIG = {
  MY_NAME: "Your Full Name Here",
  MY_POSITION: "Your Current Position or Job Title",
  POS_SEARCH: "Your Area of Expertise or Specialization",
  PERSONAL_FOLDER: "",
  ADDON_SYNC_FOLDER: "",
  AUTO_CREATE_FOLDERS: true,
};
"#;

/// Master template carrying its own (Portuguese) placeholders.
pub const MASTER_TEMPLATE: &str = r#"const LINKEDIN_CONFIG = {
  MY_NAME: "Seu Nome Completo Aqui",
  MY_POSITION: "Seu Cargo ou Posição Atual",
  POS_SEARCH: "Sua Área de Especialização",
  PERSONAL_FOLDER: "",
  ADDON_SYNC_FOLDER: "",
  AUTO_CREATE_FOLDERS: true,
};
"#;

/// A filled-in personal config.
pub fn personal_config(name: &str, position: &str, expertise: &str) -> String {
    format!(
        "const LINKEDIN_CONFIG = {{\n  MY_NAME: \"{name}\",\n  MY_POSITION: \"{position}\",\n  POS_SEARCH: \"{expertise}\",\n}};\n"
    )
}

/// A personal config with folder settings.
pub fn config_with_folders(personal: &str, addon: &str, auto_create: bool) -> String {
    format!(
        "const LINKEDIN_CONFIG = {{\n  MY_NAME: \"Ana\",\n  MY_POSITION: \"Recruiter\",\n  POS_SEARCH: \"Data\",\n  PERSONAL_FOLDER: \"{personal}\",\n  ADDON_SYNC_FOLDER: \"{addon}\",\n  AUTO_CREATE_FOLDERS: {auto_create},\n}};\n"
    )
}

/// Extension manifest at `version`.
pub fn manifest(version: &str) -> String {
    format!(
        "{{\n  \"manifest_version\": 2,\n  \"name\": \"LinkedIn Connect\",\n  \"version\": \"{version}\",\n  \"background\": {{\n    \"scripts\": [\"background.js\"]\n  }}\n}}\n"
    )
}

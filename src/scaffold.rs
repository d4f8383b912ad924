//! Config directory management.
//! Bootstraps the directory with the bundled templates, creates new
//! template files and registers them, and records model credentials.

use crate::config::{
    Config, ConfigStore, FileConfigStore, OutputConvention, ProjectRecord, TemplateRecord,
};
use crate::constants::{DEFAULT_PROJECT, DEFAULT_TOOL};
use crate::error::Result;
use crate::renderer::TemplateRenderer;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// Templates shipped with the binary: name, output convention, content.
pub const BUNDLED_TEMPLATES: [(&str, OutputConvention, &str); 2] = [
    (
        "typescript_template",
        OutputConvention::TypeScript,
        include_str!("../templates/typescript_template.md"),
    ),
    (
        "javascript_template",
        OutputConvention::JavaScript,
        include_str!("../templates/javascript_template.md"),
    ),
];

const TEMPLATE_SKELETON: &str = r#"---
name: {{ name }}
tool: {{ tool }}
project: {{ project }}
---

# {{ name }}

<!-- Write the prompt below. ${entityName} and ${propertiesText} are replaced for every entity. -->
"#;

/// Files touched by [`bootstrap`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub config_created: bool,
    pub templates_copied: Vec<PathBuf>,
}

fn default_config(store: &FileConfigStore) -> Config {
    let mut project = ProjectRecord::new(DEFAULT_PROJECT);
    project.templates = BUNDLED_TEMPLATES
        .iter()
        .map(|(name, convention, _)| TemplateRecord {
            file: Some(store.template_path(name).display().to_string()),
            output: Some(*convention),
            ..TemplateRecord::new(*name, DEFAULT_TOOL)
        })
        .collect();
    Config { projects: vec![project] }
}

/// Creates the config directory, a default `config.json` and the bundled
/// templates. Files that already exist are left alone, so running it twice
/// is harmless.
pub fn bootstrap(store: &FileConfigStore) -> Result<BootstrapReport> {
    let mut report = BootstrapReport::default();
    fs::create_dir_all(store.templates_dir())?;

    if !store.config_path().exists() {
        store.save(&default_config(store))?;
        info!("Created {}", store.config_path().display());
        report.config_created = true;
    }

    for (name, _, content) in BUNDLED_TEMPLATES {
        let path = store.template_path(name);
        if path.exists() {
            debug!("Template '{}' already present", path.display());
            continue;
        }
        fs::write(&path, content)?;
        info!("Copied template {}", path.display());
        report.templates_copied.push(path);
    }

    Ok(report)
}

fn load_or_default(store: &FileConfigStore) -> Result<Config> {
    if store.config_path().exists() {
        store.load()
    } else {
        Ok(Config::default())
    }
}

/// Result of [`create_template`].
#[derive(Debug, PartialEq, Eq)]
pub struct CreatedTemplate {
    pub path: PathBuf,
    /// False when the file already existed
    pub file_created: bool,
    /// False when the project already listed the template
    pub registered: bool,
}

/// Writes a skeleton template named `name` and registers it in `project`,
/// creating the project if needed.
pub fn create_template(
    engine: &dyn TemplateRenderer,
    store: &FileConfigStore,
    name: &str,
    tool: &str,
    project: &str,
) -> Result<CreatedTemplate> {
    let path = store.template_path(name);
    let file_created = if path.exists() {
        info!("Template already exists: {}", path.display());
        false
    } else {
        let context = serde_json::json!({ "name": name, "tool": tool, "project": project });
        let content = engine.render(TEMPLATE_SKELETON, &context)?;
        fs::create_dir_all(store.templates_dir())?;
        fs::write(&path, content)?;
        true
    };

    let mut config = load_or_default(store)?;
    let project_record = config.project_mut_or_insert(project);
    let registered = project_record.template(name).is_none();
    if registered {
        project_record.templates.push(TemplateRecord {
            file: Some(path.display().to_string()),
            project: Some(project.to_string()),
            ..TemplateRecord::new(name, tool)
        });
        store.save(&config)?;
    } else {
        debug!("Template '{}' already registered in project '{}'", name, project);
    }

    Ok(CreatedTemplate { path, file_created, registered })
}

/// Sets the model and API key of `project`, creating the project if needed.
pub fn set_model(store: &FileConfigStore, project: &str, model: &str, api_key: &str) -> Result<()> {
    let mut config = load_or_default(store)?;
    let record = config.project_mut_or_insert(project);
    record.model_name = model.to_string();
    record.model = None;
    record.api_key = api_key.to_string();
    store.save(&config)
}

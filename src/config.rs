//! Configuration handling for testgen.
//! This module defines the project and template records stored in
//! `config.json` and the [`ConfigStore`] handle through which the rest of
//! the crate reads them.

use crate::constants::{
    APP_DIR, CONFIG_DIR_ENV, CONFIG_FILE, DEFAULT_MODEL, TEMPLATES_DIR, TEMPLATE_EXTENSION,
};
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Naming convention of generated test files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputConvention {
    TypeScript,
    JavaScript,
}

/// Markers looked up in a template name when its record has no explicit
/// `output`. First match wins.
const NAME_MARKERS: &[(&str, OutputConvention)] = &[
    ("typescript", OutputConvention::TypeScript),
    ("javascript", OutputConvention::JavaScript),
];

impl OutputConvention {
    /// File extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputConvention::TypeScript => "test.ts",
            OutputConvention::JavaScript => "test.js",
        }
    }

    /// Infers the convention from a template name, defaulting to TypeScript.
    pub fn from_template_name(template_name: &str) -> Self {
        let lowered = template_name.to_lowercase();
        NAME_MARKERS
            .iter()
            .find(|(marker, _)| lowered.contains(marker))
            .map(|(_, convention)| *convention)
            .unwrap_or(OutputConvention::TypeScript)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    pub tool: String,
    /// Path recorded when the template was created. Informational only: the
    /// template content is always read from the path derived from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConvention>,
}

impl TemplateRecord {
    pub fn new<S: Into<String>>(name: S, tool: S) -> Self {
        Self { name: name.into(), tool: tool.into(), file: None, project: None, output: None }
    }

    /// The explicit output convention, or the one inferred from the name.
    pub fn convention(&self) -> OutputConvention {
        self.output.unwrap_or_else(|| OutputConvention::from_template_name(&self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    /// Provider selector (`gemini`, `openai`) or a concrete model id
    #[serde(rename = "modelName", default = "default_model_name")]
    pub model_name: String,
    /// Explicit model id, overriding the provider default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub templates: Vec<TemplateRecord>,
}

fn default_model_name() -> String {
    DEFAULT_MODEL.to_string()
}

impl ProjectRecord {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            model_name: default_model_name(),
            model: None,
            api_key: String::new(),
            templates: Vec::new(),
        }
    }

    pub fn template(&self, name: &str) -> Option<&TemplateRecord> {
        self.templates.iter().find(|t| t.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

impl Config {
    pub fn project(&self, name: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Returns the named project, appending a fresh record if it is missing.
    pub fn project_mut_or_insert(&mut self, name: &str) -> &mut ProjectRecord {
        let index = match self.projects.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                debug!("Creating project '{}'", name);
                self.projects.push(ProjectRecord::new(name));
                self.projects.len() - 1
            }
        };
        &mut self.projects[index]
    }
}

/// Read access to the configuration and template contents.
///
/// Passed explicitly to the resolver so generation never reaches into a
/// process-wide location on its own.
pub trait ConfigStore {
    /// Loads the whole configuration.
    fn load(&self) -> Result<Config>;

    /// Reads the content of the template named `template_name`.
    ///
    /// # Errors
    /// * `Error::TemplateFileMissing` if the backing file does not exist
    fn read_template(&self, template_name: &str) -> Result<String>;
}

/// [`ConfigStore`] backed by a config directory on disk:
/// `<root>/config.json` and `<root>/templates/<name>.md`.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    root: PathBuf,
}

impl FileConfigStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at [`default_config_dir`].
    pub fn from_default_location() -> Result<Self> {
        Ok(Self::new(default_config_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    pub fn template_path(&self, template_name: &str) -> PathBuf {
        self.templates_dir().join(format!("{}.{}", template_name, TEMPLATE_EXTENSION))
    }

    /// Writes the configuration as pretty-printed JSON, creating the
    /// directory if needed.
    pub fn save(&self, config: &Config) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let content = serde_json::to_string_pretty(config)?;
        debug!("Saving configuration to {}", self.config_path().display());
        fs::write(self.config_path(), content)?;
        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Config> {
        let config_path = self.config_path();
        if !config_path.exists() {
            return Err(Error::ConfigError(format!(
                "no configuration found at '{}', run 'testgen init' first",
                config_path.display()
            )));
        }

        debug!("Loading configuration from {}", config_path.display());
        let content = fs::read_to_string(&config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::ConfigError(format!("invalid configuration '{}': {}", config_path.display(), e))
        })
    }

    fn read_template(&self, template_name: &str) -> Result<String> {
        let path = self.template_path(template_name);
        if !path.is_file() {
            return Err(Error::TemplateFileMissing {
                template: template_name.to_string(),
                path: path.display().to_string(),
            });
        }
        Ok(fs::read_to_string(path)?)
    }
}

/// Location of the config directory.
///
/// `$TESTGEN_CONFIG_DIR` wins; otherwise `%APPDATA%\testgen` on Windows and
/// `$HOME/.config/testgen` elsewhere.
pub fn default_config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let (var, base) = if cfg!(windows) { ("APPDATA", None) } else { ("HOME", Some(".config")) };
    let home = std::env::var(var).map_err(|_| {
        Error::ConfigError(format!("cannot locate the config directory: ${} is not set", var))
    })?;

    let mut dir = PathBuf::from(home);
    if let Some(base) = base {
        dir.push(base);
    }
    dir.push(APP_DIR);
    Ok(dir)
}

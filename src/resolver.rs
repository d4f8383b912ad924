//! Prompt template resolution.
//! Looks up a template record in a project, loads its content through the
//! [`ConfigStore`] and fills in the `${entityName}` / `${propertiesText}`
//! placeholders.

use crate::config::{ConfigStore, OutputConvention, TemplateRecord};
use crate::constants::SUPPORTED_TOOLS;
use crate::error::{Error, Result};
use log::debug;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(entityName|propertiesText)\}").expect("placeholder pattern is valid")
});

/// Replaces every placeholder in `template` in a single pass.
///
/// Substituted values are inserted verbatim and never scanned again, so an
/// entity name containing `${propertiesText}` stays as written.
pub fn substitute(template: &str, entity_name: &str, properties_text: &str) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "entityName" => entity_name.to_string(),
            _ => properties_text.to_string(),
        })
        .into_owned()
}

/// Resolves prompt templates against an injected configuration store.
pub struct TemplateResolver<'a> {
    store: &'a dyn ConfigStore,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(store: &'a dyn ConfigStore) -> Self {
        Self { store }
    }

    /// Finds the template record `template_name` in project `project_name`.
    ///
    /// # Errors
    /// * `Error::ProjectNotFound` / `Error::TemplateNotFound` on a missing record
    /// * any error raised while loading the configuration
    pub fn lookup(&self, project_name: &str, template_name: &str) -> Result<TemplateRecord> {
        let config = self.store.load()?;
        let project = config
            .project(project_name)
            .ok_or_else(|| Error::ProjectNotFound { project: project_name.to_string() })?;

        project.template(template_name).cloned().ok_or_else(|| Error::TemplateNotFound {
            template: template_name.to_string(),
            project: project_name.to_string(),
        })
    }

    /// Builds the prompt for one entity.
    ///
    /// # Errors
    /// * everything [`lookup`](Self::lookup) returns
    /// * `Error::UnsupportedTool` if the record's `tool` is not one the
    ///   generator runs
    /// * `Error::TemplateFileMissing` if the template has no backing file
    pub fn resolve(
        &self,
        project_name: &str,
        template_name: &str,
        entity_name: &str,
        properties_text: &str,
    ) -> Result<String> {
        let record = self.lookup(project_name, template_name)?;
        if !SUPPORTED_TOOLS.contains(&record.tool.as_str()) {
            return Err(Error::UnsupportedTool { template: record.name, tool: record.tool });
        }
        let content = self.store.read_template(&record.name)?;
        debug!("Rendering template '{}' for entity '{}'", record.name, entity_name);
        Ok(substitute(&content, entity_name, properties_text))
    }

    /// Output convention for a run. Never fails: when the record cannot be
    /// found the convention is inferred from the template name, leaving the
    /// lookup error to surface per entity.
    pub fn convention(&self, project_name: &str, template_name: &str) -> OutputConvention {
        match self.lookup(project_name, template_name) {
            Ok(record) => record.convention(),
            Err(e) => {
                debug!("Inferring output convention from name, lookup failed: {}", e);
                OutputConvention::from_template_name(template_name)
            }
        }
    }
}

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use testgen::completion::CompletionModel;
use testgen::config::{Config, ConfigStore, ProjectRecord, TemplateRecord};
use testgen::error::{Error, Result};

pub const ORDERS_METADATA: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<edmx:Edmx Version="4.0" xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx">
  <edmx:DataServices>
    <Schema Namespace="MyService" xmlns="http://docs.oasis-open.org/odata/ns/edm">
      <EntityContainer Name="EntityContainer">
        <EntitySet Name="Orders" EntityType="MyService.Order"/>
      </EntityContainer>
      <EntityType Name="Order">
        <Key><PropertyRef Name="id"/></Key>
        <Property Name="id" Type="Edm.Guid" Nullable="false"/>
        <Property Name="total" Type="Edm.Decimal" MaxLength="10"/>
      </EntityType>
      <EntityType Name="Customer">
        <Property Name="name" Type="Edm.String" MaxLength="40"/>
      </EntityType>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>
"#;

/// In-memory configuration: a fixed config, template contents keyed by name.
pub struct MemoryStore {
    pub config: Config,
    pub templates: HashMap<String, String>,
    pub loads: Cell<usize>,
}

impl MemoryStore {
    pub fn new(config: Config) -> Self {
        Self { config, templates: HashMap::new(), loads: Cell::new(0) }
    }

    pub fn with_template(mut self, name: &str, content: &str) -> Self {
        self.templates.insert(name.to_string(), content.to_string());
        self
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Config> {
        self.loads.set(self.loads.get() + 1);
        Ok(self.config.clone())
    }

    fn read_template(&self, template_name: &str) -> Result<String> {
        self.templates.get(template_name).cloned().ok_or_else(|| Error::TemplateFileMissing {
            template: template_name.to_string(),
            path: format!("memory://{}", template_name),
        })
    }
}

pub fn config_with_templates(project: &str, templates: &[&str]) -> Config {
    let mut record = ProjectRecord::new(project);
    record.templates = templates
        .iter()
        .map(|name| TemplateRecord::new(*name, "odata_test_generator"))
        .collect();
    Config { projects: vec![record] }
}

/// Completion stub that counts calls and records prompts.
pub struct StubModel {
    pub response: serde_json::Value,
    pub calls: Cell<usize>,
    pub prompts: RefCell<Vec<String>>,
}

impl StubModel {
    pub fn new(response: serde_json::Value) -> Self {
        Self { response, calls: Cell::new(0), prompts: RefCell::new(Vec::new()) }
    }
}

impl CompletionModel for StubModel {
    fn invoke(&self, prompt: &str) -> Result<serde_json::Value> {
        self.calls.set(self.calls.get() + 1);
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.response.clone())
    }
}

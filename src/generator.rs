//! Test generation orchestration.
//! Parses the metadata document once, then walks its entities in order:
//! pick the output path, honor the overwrite policy, build the prompt, call
//! the model and write the result.

use crate::completion::CompletionModel;
use crate::config::OutputConvention;
use crate::constants::INPUT_EXTENSION;
use crate::error::{Error, Result};
use crate::extract::extract;
use crate::metadata::{self, EntityDescriptor};
use crate::resolver::TemplateResolver;
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments of a single generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub input: PathBuf,
    pub template: String,
    pub project: String,
    /// Overwrite existing output files
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Written,
    SkippedExists,
    Failed,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Written => write!(f, "Written"),
            OutcomeStatus::SkippedExists => write!(f, "Skipped (exists)"),
            OutcomeStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// What happened to one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub entity_name: String,
    pub output_path: PathBuf,
    pub status: OutcomeStatus,
    pub error_message: Option<String>,
}

/// Aggregate of a whole run, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub written_paths: Vec<PathBuf>,
    pub skipped_paths: Vec<PathBuf>,
    pub outcomes: Vec<GenerationOutcome>,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: Vec<GenerationOutcome>) -> Self {
        let mut summary = RunSummary::default();
        for outcome in &outcomes {
            match outcome.status {
                OutcomeStatus::Written => {
                    summary.written += 1;
                    summary.written_paths.push(outcome.output_path.clone());
                }
                OutcomeStatus::SkippedExists => {
                    summary.skipped += 1;
                    summary.skipped_paths.push(outcome.output_path.clone());
                }
                OutcomeStatus::Failed => summary.failed += 1,
            }
        }
        summary.outcomes = outcomes;
        summary
    }
}

/// Checks that the metadata input exists and carries the `.xml` extension.
pub fn validate_input<P: AsRef<Path>>(input: P) -> Result<PathBuf> {
    let input = input.as_ref();
    if !input.is_file() {
        return Err(Error::InputNotFound { path: input.display().to_string() });
    }

    let has_extension = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION));
    if !has_extension {
        return Err(Error::InvalidInputExtension {
            path: input.display().to_string(),
            expected: INPUT_EXTENSION,
        });
    }

    Ok(input.to_path_buf())
}

/// `<dir>/<stem>_<entity>.<ext>` next to the input file.
///
/// # Examples
/// ```
/// use testgen::config::OutputConvention;
/// use testgen::generator::output_path_for;
/// use std::path::{Path, PathBuf};
///
/// let path = output_path_for(Path::new("odata/service.xml"), "Order", OutputConvention::TypeScript);
/// assert_eq!(path, PathBuf::from("odata/service_Order.test.ts"));
/// ```
pub fn output_path_for(input: &Path, entity_name: &str, convention: OutputConvention) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    input.with_file_name(format!("{}_{}.{}", stem, entity_name, convention.extension()))
}

/// Rejects entity names that would escape `<stem>_<entity>.<ext>`.
pub fn validate_entity_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(Error::InvalidEntityName { name: name.to_string() });
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content).map_err(Error::IoError)
}

/// Drives a generation run.
pub struct Generator<'a> {
    resolver: TemplateResolver<'a>,
    model: &'a dyn CompletionModel,
}

impl<'a> Generator<'a> {
    pub fn new(resolver: TemplateResolver<'a>, model: &'a dyn CompletionModel) -> Self {
        Self { resolver, model }
    }

    /// Runs the whole pipeline for `request`.
    ///
    /// # Errors
    /// Only run-fatal conditions are returned: a missing or non-XML input,
    /// an unreadable or malformed document, or a document without entities.
    /// Everything that goes wrong for a single entity is recorded in its
    /// [`GenerationOutcome`] instead.
    pub fn run(&self, request: &GenerationRequest) -> Result<RunSummary> {
        let input = validate_input(&request.input)?;
        let document = fs::read_to_string(&input)?;
        let entities = metadata::parse(&document)?;
        info!("Found {} entities in '{}'", entities.len(), input.display());

        let convention = self.resolver.convention(&request.project, &request.template);
        debug!("Output convention for template '{}': {:?}", request.template, convention);

        let outcomes = entities
            .iter()
            .map(|entity| self.process_entity(entity, &input, convention, request))
            .collect();

        Ok(RunSummary::from_outcomes(outcomes))
    }

    fn process_entity(
        &self,
        entity: &EntityDescriptor,
        input: &Path,
        convention: OutputConvention,
        request: &GenerationRequest,
    ) -> GenerationOutcome {
        let output_path = output_path_for(input, &entity.name, convention);
        let outcome = |status: OutcomeStatus, error_message: Option<String>| GenerationOutcome {
            entity_name: entity.name.clone(),
            output_path: output_path.clone(),
            status,
            error_message,
        };

        if let Err(e) = validate_entity_name(&entity.name) {
            let message = format!("Failed to generate tests for entity '{}': {}", entity.name, e);
            warn!("{}", message);
            return outcome(OutcomeStatus::Failed, Some(message));
        }

        if output_path.exists() && !request.force {
            debug!("Skipping '{}': '{}' already exists", entity.name, output_path.display());
            return outcome(OutcomeStatus::SkippedExists, None);
        }

        match self.generate_entity(entity, &output_path, request) {
            Ok(()) => outcome(OutcomeStatus::Written, None),
            Err(e) => {
                let message = format!("Failed to generate tests for entity '{}': {}", entity.name, e);
                warn!("{}", message);
                outcome(OutcomeStatus::Failed, Some(message))
            }
        }
    }

    fn generate_entity(
        &self,
        entity: &EntityDescriptor,
        output_path: &Path,
        request: &GenerationRequest,
    ) -> Result<()> {
        let properties_text = metadata::properties_text(entity)?;
        let prompt = self.resolver.resolve(
            &request.project,
            &request.template,
            &entity.name,
            &properties_text,
        )?;

        let response = self.model.invoke(&prompt)?;
        let generated = extract(&response);
        if generated.trim().is_empty() {
            return Err(Error::EmptyGeneration { entity: entity.name.clone() });
        }

        debug!("Writing file: {}", output_path.display());
        write_file(output_path, &generated)
    }
}

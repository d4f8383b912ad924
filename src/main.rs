//! testgen's main application entry point.
//! Handles command-line argument parsing and dispatches to the subcommands.

use testgen::{
    cli::{get_args, Args, Command},
    completion::model_from_project,
    config::{ConfigStore, FileConfigStore},
    error::{default_error_handler, Error, Result},
    generator::{GenerationRequest, Generator, OutcomeStatus},
    logger::init_logger,
    renderer::MiniJinjaRenderer,
    resolver::TemplateResolver,
    scaffold::{bootstrap, create_template, set_model},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Runs `generate`: builds the model client for the project, then the
/// generation pipeline, and prints one line per entity.
fn generate(store: &FileConfigStore, request: GenerationRequest) -> Result<()> {
    let config = store.load()?;
    let project = config
        .project(&request.project)
        .ok_or_else(|| Error::ProjectNotFound { project: request.project.clone() })?;
    let model = model_from_project(project)?;

    let generator = Generator::new(TemplateResolver::new(store), &*model);
    let summary = generator.run(&request)?;

    for outcome in &summary.outcomes {
        match outcome.status {
            OutcomeStatus::Failed => println!(
                "{}: '{}' ({})",
                outcome.status,
                outcome.output_path.display(),
                outcome.error_message.as_deref().unwrap_or("unknown error")
            ),
            _ => println!("{}: '{}'", outcome.status, outcome.output_path.display()),
        }
    }

    println!(
        "Generation completed: {} written, {} skipped, {} failed.",
        summary.written, summary.skipped, summary.failed
    );
    if summary.skipped > 0 {
        println!("Use --force to overwrite existing test files.");
    }
    if summary.written > 0 {
        println!("Always review generated tests before relying on them.");
    }
    Ok(())
}

/// Main application logic execution.
fn run(args: Args) -> Result<()> {
    let store = FileConfigStore::from_default_location()?;
    log::debug!("Using config directory {}", store.root().display());

    match args.command {
        Command::Generate { input, project, template, force } => {
            generate(&store, GenerationRequest { input, template, project, force })
        }
        Command::Config { model, api_key, project } => {
            set_model(&store, &project, &model, &api_key)?;
            println!("Configuration saved for project '{}'.", project);
            Ok(())
        }
        Command::CreateTemplate { name, tool, project } => {
            let engine = MiniJinjaRenderer::new();
            let created = create_template(&engine, &store, &name, &tool, &project)?;
            if created.file_created {
                println!("Template created: '{}'", created.path.display());
            } else {
                println!("Template already exists: '{}'", created.path.display());
            }
            if created.registered {
                println!("Template registered in project '{}'.", project);
            } else {
                println!("Template is already registered in project '{}'.", project);
            }
            Ok(())
        }
        Command::Init => {
            let report = bootstrap(&store)?;
            if report.config_created {
                println!("Created: '{}'", store.config_path().display());
            }
            for path in &report.templates_copied {
                println!("Copied: '{}'", path.display());
            }
            println!("Configuration directory ready in {}.", store.root().display());
            Ok(())
        }
        Command::ShowConfig => {
            let config = store.load()?;
            println!("{}", store.config_path().display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

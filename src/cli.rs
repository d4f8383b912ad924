//! Command-line interface implementation for testgen.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::{DEFAULT_PROJECT, DEFAULT_TEMPLATE};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for testgen.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "testgen: generate entity tests from OData metadata with a language model",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Generate one test file per entity declared in a metadata document
    Generate {
        /// Path to the metadata document (.xml)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Project whose model and templates are used
        #[arg(short, long, default_value = DEFAULT_PROJECT)]
        project: String,

        /// Template used to build the prompt for each entity
        #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
        template: String,

        /// Overwrite test files that already exist
        #[arg(short, long)]
        force: bool,
    },

    /// Store the model and API key of a project
    Config {
        /// Provider (gemini, openai) or concrete model id
        #[arg(short, long)]
        model: String,

        #[arg(short, long)]
        api_key: String,

        #[arg(short, long, default_value = DEFAULT_PROJECT)]
        project: String,
    },

    /// Create a template file and register it in a project
    CreateTemplate {
        #[arg(short, long)]
        name: String,

        /// Generator the template targets, e.g. odata_test_generator
        #[arg(short, long)]
        tool: String,

        #[arg(short, long, default_value = DEFAULT_PROJECT)]
        project: String,
    },

    /// Create the config directory with the default configuration and templates
    Init,

    /// Print the location and content of the configuration file
    ShowConfig,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

//! Common constants used throughout the testgen application.

/// Configuration file name inside the config directory
pub const CONFIG_FILE: &str = "config.json";

/// Directory (relative to the config directory) holding template files
pub const TEMPLATES_DIR: &str = "templates";

/// Extension of template files
pub const TEMPLATE_EXTENSION: &str = "md";

/// Required extension of metadata input files
pub const INPUT_EXTENSION: &str = "xml";

/// Environment variable overriding the config directory location
pub const CONFIG_DIR_ENV: &str = "TESTGEN_CONFIG_DIR";

/// Name of the config directory under the platform config root
pub const APP_DIR: &str = "testgen";

pub const DEFAULT_PROJECT: &str = "default";
pub const DEFAULT_TEMPLATE: &str = "typescript_template";
pub const DEFAULT_MODEL: &str = "gemini";
pub const DEFAULT_TOOL: &str = "odata_test_generator";

/// Values of a template's `tool` field the generator can run
pub const SUPPORTED_TOOLS: &[&str] = &[DEFAULT_TOOL];

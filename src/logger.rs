//! Logger setup shared by all subcommands.

/// Initializes `env_logger`. `RUST_LOG` still overrides the chosen level.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

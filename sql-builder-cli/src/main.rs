use anyhow::Result;
use clap::Parser;

use sql_builder::cli::commands::{amend, defaults, mapping, refresh};
use sql_builder::cli::{Cli, Commands};
use sql_builder::config::Config;

fn main() -> Result<()> {
    // Load .env so SQL_BUILDER_CONFIG can be set per directory
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Refresh(args) => refresh::handle_refresh_command(args, &config),
        Commands::Mapping(args) => mapping::handle_mapping_command(args),
        Commands::Amend(args) => amend::handle_amend_command(args),
        Commands::Defaults => defaults::handle_defaults_command(&config),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

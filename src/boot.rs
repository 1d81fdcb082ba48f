use std::{env, str::FromStr as _};

use clap::Parser as _;
use config_rs::Config as ConfigRs;
use tracing::{debug, trace};

use crate::{
    cli::{Cli, Commands},
    commands::{db, db_reset, generate_secret, migrate, serve, version},
    config::Config,
    environment::Environment,
    setup_tracing::setup_tracing_for_command,
};

const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

/// Application entry point: parse the CLI, load configuration for the
/// selected environment and dispatch the command.
pub async fn boot() {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Version)) {
        version::print_version_info();
        return;
    }

    let environment = set_environment();

    let app_config = read_config(&environment);

    // Set up tracing with appropriate level based on command
    setup_tracing_for_command(&cli.command, &app_config.tracing.log_level);

    debug!("Environment set to: {:?}", environment);
    trace!("Configuration loaded: {:?}", app_config);

    handle_command(environment, app_config, cli).await;
}

#[must_use]
pub fn set_environment() -> Environment {
    env::var(ENVIRONMENT_VARIABLE)
        .ok()
        .and_then(|s| Environment::from_str(&s).ok())
        .unwrap_or_default()
}

pub fn read_config(environment: &Environment) -> Config {
    let config_file_name = format!("config/{environment}");

    trace!("Reading configuration from: {}", config_file_name);

    ConfigRs::builder()
        .add_source(config_rs::File::with_name(&config_file_name))
        .add_source(config_rs::Environment::with_prefix("APP"))
        .build()
        .unwrap()
        .try_deserialize()
        .expect("Failed to deserialize configuration")
}

pub async fn handle_command(environment: Environment, config: Config, cli: Cli) {
    match cli.command {
        Some(Commands::Migrate { action }) => {
            migrate::handle_migrate_command(&config, action).await;
        }
        Some(Commands::Db { action }) => match action {
            Some(crate::cli::DbAction::Console) | None => {
                db::handle_db_console_command(&config);
            }
            Some(crate::cli::DbAction::Reset) => {
                db_reset::handle_db_reset_command(&config).await;
            }
        },
        Some(Commands::GenerateJwtSecret) => {
            generate_secret::handle_generate_secret_command();
        }
        Some(Commands::Version) => {
            version::print_version_info();
        }
        Some(Commands::Serve) | None => {
            serve::handle_serve_command(environment, config).await;
        }
    }
}

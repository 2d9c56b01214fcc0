use crate::cli::args::{Cli, Commands, InputArgs};
use crate::logger::{parse_level, setup_logger};
use crate::model::Config;
use crate::orchestrator::{self, ImportError, ImportInput, ImportRequest};
use log::{debug, error, info, warn, LevelFilter};

pub fn handle(cli: Cli) {
    let loaded = Config::load(cli.config.as_deref(), cli.env.as_deref());

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        loaded
            .as_ref()
            .map(|c| parse_level(&c.logging.level))
            .unwrap_or(LevelFilter::Info)
    };
    setup_logger(level);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    for skipped in &config.skipped_overlays {
        warn!("Config overlay not applied: {}", skipped);
    }
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Resolve { input } => {
            info!("Running RESOLVE command");
            let request = build_request(input, &config).unwrap_or_else(|e| fail("Resolve", e));
            if let Err(e) = orchestrator::run_resolve(&request) {
                fail("Resolve", e);
            }
        }

        Commands::Plan { input, model_name } => {
            info!("Running PLAN command");
            let request = build_request(input, &config).unwrap_or_else(|e| fail("Plan", e));
            let model_name = model_name.or(config.import.model_name.clone());
            if let Err(e) = orchestrator::run_plan(&request, model_name.as_deref()) {
                fail("Plan", e);
            }
        }

        Commands::Schema => orchestrator::run_schema(),

        Commands::Dialects => orchestrator::run_dialects(),

        Commands::Config { output, environment } => {
            info!("Running CONFIG command");
            debug!("Output path: {}", output);

            match Config::generate_default_config(&output) {
                Ok(()) => {
                    info!("Generated default configuration file: {}", output);
                    if let Some(env_name) = environment {
                        let env_path = format!("config/{}.toml", env_name);
                        match std::fs::create_dir_all("config") {
                            Ok(()) => match Config::generate_default_config(&env_path) {
                                Ok(()) => info!("Generated environment configuration file: {}", env_path),
                                Err(e) => error!("Failed to create environment config: {}", e),
                            },
                            Err(e) => error!("Failed to create config directory: {}", e),
                        }
                    }
                }
                Err(e) => {
                    error!("Failed to generate configuration file: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Command-line values win over the config file. A property file from the
/// config is only used when no field values were given.
fn build_request(input: InputArgs, config: &Config) -> Result<ImportRequest, ImportError> {
    let dialect = input.dialect.unwrap_or_else(|| config.import.dialect.clone());

    let input = match (input.properties, input.fields.is_empty()) {
        (Some(_), false) => return Err(ImportError::ConflictingInput),
        (Some(path), true) => ImportInput::PropertiesFile(path),
        (None, false) => ImportInput::Fields(input.fields),
        (None, true) => match &config.import.properties_file {
            Some(path) => ImportInput::PropertiesFile(path.clone()),
            None => ImportInput::Fields(Vec::new()),
        },
    };

    debug!("Dialect: {}", dialect);
    Ok(ImportRequest { dialect, input })
}

fn fail(command: &str, e: ImportError) -> ! {
    error!("{} command failed: {}", command, e);
    std::process::exit(1);
}

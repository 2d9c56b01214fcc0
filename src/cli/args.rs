use clap::{Args, Parser, Subcommand};

/// CLI entry point for dbimport
#[derive(Parser, Debug)]
#[command(
    name = "dbimport",
    version,
    about = "Resolve database import connection parameters"
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Environment (loads config/{env}.toml)
    #[arg(long, global = true)]
    pub env: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where import parameters come from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Property file (import.database.* keys)
    #[arg(long)]
    pub properties: Option<String>,

    /// Parameter value by schema key, e.g. --set database_host=db1
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub fields: Vec<(String, String)>,

    /// Database dialect name or alias
    #[arg(long)]
    pub dialect: Option<String>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Ok((key.trim().to_string(), value.to_string()))
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve parameters into a connection config
    Resolve {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show the model and URL each database would be imported as
    Plan {
        #[command(flatten)]
        input: InputArgs,

        /// Model name for a single-database import
        #[arg(long)]
        model_name: Option<String>,
    },

    /// List the import parameters
    Schema,

    /// List the supported dialects
    Dialects,

    /// Generate configuration file
    Config {
        /// Output path for config file
        #[arg(long, default_value = "dbimport.toml")]
        output: String,

        /// Also create config/{name}.toml
        #[arg(long)]
        environment: Option<String>,
    },
}

///! Quotaboard CLI
///!
///! Command-line interface for Kubernetes resource quotas

mod api;
mod commands;
mod config;
mod logging;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::process::ExitCode;

use crate::config::Config;
use crate::logging::LoggingConfig;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// API server address [default: from config, else http://localhost:8006]
    #[arg(short, long, global = true)]
    server: Option<String>,

    /// Cluster to query [default: from config, else main]
    #[arg(short, long, global = true)]
    cluster: Option<String>,

    /// Output format (table, json, yaml, csv)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage resource quotas
    Quotas {
        #[command(subcommand)]
        command: QuotaCommands,
    },
    /// Show or change CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum QuotaCommands {
    /// List resource quotas
    List {
        /// Namespace to list; repeat for several, omit for all
        #[arg(short, long)]
        namespace: Vec<String>,
        /// Column id to hide (name, namespace, cluster, requests, limits, age)
        #[arg(long)]
        hide: Vec<String>,
    },
    /// Create a resource quota
    Create {
        /// Quota name
        name: String,
        /// Target namespace
        #[arg(short, long)]
        namespace: String,
        /// Hard limit as RESOURCE=QUANTITY; repeat for several
        #[arg(long, required = true)]
        hard: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Set a configuration key and save it
    Set {
        /// Key (default_server, default_cluster, default_output, log_dir, log_rotation)
        key: String,
        /// New value; an empty log_dir disables file logging
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let guard = LoggingConfig {
        level: LoggingConfig::level_for_verbosity(cli.verbose).to_string(),
        file_path: config.log_dir.clone(),
        rotation: config.log_rotation,
    }
    .init()?;

    let result = run(cli, config).await;

    let code = match &result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "command failed");
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    };

    // Flush buffered file logs before the process exits
    drop(guard);
    Ok(code)
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let server = cli.server.unwrap_or_else(|| config.default_server.clone());
    let cluster = cli.cluster.unwrap_or_else(|| config.default_cluster.clone());
    let format: OutputFormat = cli.output.as_deref().unwrap_or(&config.default_output).parse()?;

    match cli.command {
        Commands::Quotas { command } => {
            tracing::debug!(server = %server, cluster = %cluster, "resolved connection settings");
            let api = api::ApiClient::new(&server);
            commands::quota::handle_quota_command(command, &api, &cluster, format).await
        }
        Commands::Config { command } => commands::config::handle_config_command(command, config, format),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "quotaboard", &mut std::io::stdout());
            Ok(())
        }
    }
}

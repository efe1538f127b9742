///! Configuration commands

use crate::config::Config;
use crate::output::{self, OutputFormat};
use crate::ConfigCommands;
use anyhow::Result;
use std::path::Path;

/// Render the configuration; the table format prints the TOML file body
pub fn render_config(config: &Config, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Table | OutputFormat::Csv => toml::to_string_pretty(config)?,
        OutputFormat::Json => serde_json::to_string_pretty(config)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(config)?,
    })
}

/// Set one key and write the result to `path`
pub fn set_and_save(mut config: Config, key: &str, value: &str, path: &Path) -> Result<Config> {
    config.set(key, value)?;
    config.save_to(path)?;
    Ok(config)
}

pub fn handle_config_command(command: ConfigCommands, config: Config, format: OutputFormat) -> Result<()> {
    match command {
        ConfigCommands::Show => print!("{}", render_config(&config, format)?),

        ConfigCommands::Set { key, value } => {
            let path = Config::path()?;
            set_and_save(config, &key, &value, &path)?;
            output::print_saved(&key, &value, &path);
        }
    }

    Ok(())
}

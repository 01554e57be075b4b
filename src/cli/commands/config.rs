use colored::Colorize;

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::Result;

/// Handle the config command
pub fn config(
    config: &mut Config,
    paths: &Paths,
    args: &ConfigArgs,
    format: OutputFormat,
) -> Result<String> {
    match &args.command {
        ConfigCommands::Show => config_show(config, paths, format),
        ConfigCommands::Set { key, value } => config_set(config, paths, key, value, format),
        ConfigCommands::Path => config_path(paths, format),
    }
}

/// Show current configuration
fn config_show(config: &Config, paths: &Paths, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("{}\n", "Configuration".bold()));
            output.push_str(&"─".repeat(40));
            output.push('\n');

            output.push_str(&format!("\n{}\n", "[mirror]".cyan()));
            output.push_str(&format!("  url = {}\n", config.mirror.url));

            output.push_str(&format!("\n{}\n", "[display]".cyan()));
            output.push_str(&format!("  show_count = {}\n", config.display.show_count));
            output.push_str(&format!("  cache_size = {}\n", config.display.cache_size));

            output.push_str(&format!("\n{}\n", "[cache]".cyan()));
            let path = match &config.cache.path {
                Some(path) => path.display().to_string(),
                None => format!(
                    "{} {}",
                    paths.cache_file.display(),
                    "(default)".dimmed()
                ),
            };
            output.push_str(&format!("  path = {}\n", path));

            Ok(output.trim_end().to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
    }
}

/// Set a configuration value
fn config_set(
    config: &mut Config,
    paths: &Paths,
    key: &str,
    value: &str,
    format: OutputFormat,
) -> Result<String> {
    config.set(key, value)?;
    config.save_to(paths)?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Set {} = {}", "✓".green(), key, value)),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "key": key,
                "value": value
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Show configuration file path
fn config_path(paths: &Paths, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut output = String::new();
            output.push_str(&format!("Config file: {}\n", paths.config_file.display()));
            output.push_str(&format!(
                "Exists: {}",
                if paths.config_exists() {
                    "yes".green()
                } else {
                    "no".yellow()
                }
            ));
            Ok(output)
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "path": paths.config_file.display().to_string(),
                "exists": paths.config_exists()
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

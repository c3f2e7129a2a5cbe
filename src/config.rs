//! Configuration handling for kiln templates.
//! Locates the template's configuration file and loads the instruction script
//! from it. JSON and YAML are both accepted.

use crate::error::{Error, Result};
use crate::instruction::Instruction;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Supported configuration file names, in lookup order.
pub const CONFIG_FILES: [&str; 3] = ["kiln.yaml", "kiln.yml", "kiln.json"];

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// Loads configuration from a template directory, trying every name in
/// [`CONFIG_FILES`].
///
/// # Errors
/// * `Error::ConfigError` if no configuration file exists or it cannot be parsed
pub fn get_config<P: AsRef<Path>>(template_dir: P) -> Result<Config> {
    let template_dir = template_dir.as_ref();
    for file in CONFIG_FILES {
        let config_path = template_dir.join(file);
        if config_path.is_file() {
            debug!("Loading configuration from '{}'.", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            return parse_config(&content, file.ends_with(".json"));
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found in '{}' (tried: {})",
        template_dir.display(),
        CONFIG_FILES.join(", ")
    )))
}

/// Parses configuration content as JSON or YAML.
pub fn parse_config(content: &str, is_json: bool) -> Result<Config> {
    if is_json {
        serde_json::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid JSON configuration: {e}")))
    } else {
        serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid YAML configuration: {e}")))
    }
}

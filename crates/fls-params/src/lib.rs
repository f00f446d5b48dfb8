//! fls-params: simulation configuration schema, domains and the editable
//! parameter model.

pub mod domain;
pub mod error;
pub mod model;
pub mod schema;
pub mod validate;

pub use error::{ConfigFileError, ConfigFileResult, ParamError, ParamResult};
pub use model::ParameterModel;
pub use schema::*;
pub use validate::validate_config;

pub fn load_yaml(path: &std::path::Path) -> ConfigFileResult<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn to_yaml_string(config: &SimulationConfig) -> ConfigFileResult<String> {
    validate_config(config)?;
    Ok(serde_yaml::to_string(config)?)
}

pub fn save_yaml(path: &std::path::Path, config: &SimulationConfig) -> ConfigFileResult<()> {
    let content = to_yaml_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ConfigFileResult<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn save_json(path: &std::path::Path, config: &SimulationConfig) -> ConfigFileResult<()> {
    validate_config(config)?;
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a config file, picking the format from the extension.
pub fn load_config(path: &std::path::Path) -> ConfigFileResult<SimulationConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

/// Save a config file, picking the format from the extension.
pub fn save_config(path: &std::path::Path, config: &SimulationConfig) -> ConfigFileResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => save_json(path, config),
        _ => save_yaml(path, config),
    }
}

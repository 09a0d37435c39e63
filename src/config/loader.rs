use super::{user_config_path, ConfigError, UserConfig};
use std::path::Path;
use tracing::{debug, warn};

/// Load the user configuration from `~/.linkshelf/config.toml`.
///
/// Returns `Ok(UserConfig::default())` if the file does not exist.
pub fn load_user_config() -> Result<UserConfig, ConfigError> {
    let Some(path) = user_config_path() else {
        warn!("Could not determine user config directory; using defaults");
        return Ok(UserConfig::default());
    };
    load_config_from(&path)
}

/// Load a configuration file, treating a missing file as all defaults.
pub fn load_config_from(path: &Path) -> Result<UserConfig, ConfigError> {
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(UserConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: UserConfig = toml::from_str(&content).map_err(Box::new)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

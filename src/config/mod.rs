mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/taxa-rank/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("taxa-rank"))
}

/// Get the default config file path (~/.config/taxa-rank/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/taxa-rank/config.yaml) and falls back to an empty config when
///   that file does not exist, so paths can come from the command line alone.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        log::debug!(
            "No config file at {}, using command-line settings only",
            config_path.display()
        );
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    let base = config_path.parent().unwrap_or(Path::new("."));
    Ok(config.resolve_paths(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(dir.path().join("config.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "coefficients: effects.csv\nmodel: model.json\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.coefficients, Some(dir.path().join("effects.csv")));
        assert_eq!(config.model, Some(dir.path().join("model.json")));
    }

    #[test]
    fn test_invalid_yaml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "attribution: [1, 2\n").unwrap();
        assert!(load_config(Some(path)).is_err());
    }
}

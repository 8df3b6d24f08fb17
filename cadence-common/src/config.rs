//! Configuration file resolution and TOML loading

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "CADENCE_CONFIG";

/// Configuration file resolution, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. Per-user config file (`<config dir>/cadence/config.toml`), if it exists
///
/// Returns `None` when no source names a file; callers then fall back to
/// built-in defaults. Paths from the first two sources are returned even if
/// the file does not exist, so a typo surfaces as a load error instead of
/// silently running with defaults.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Per-user config file
    default_config_file().filter(|path| path.exists())
}

/// Get the per-user configuration file path for the platform
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cadence").join("config.toml"))
}

/// Read and deserialize a TOML file
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(format!("Config file not found: {}", path.display()))
        } else {
            Error::Io(e)
        }
    })?;

    let value = toml::from_str::<T>(&content)?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serial_test::serial;
    use std::io::Write;

    const TEST_ENV_VAR: &str = "CADENCE_TEST_CONFIG";

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
        #[serde(default)]
        count: u32,
    }

    #[test]
    #[serial]
    fn test_cli_argument_wins() {
        std::env::set_var(TEST_ENV_VAR, "/tmp/from-env.toml");
        let resolved = resolve_config_path(Some(Path::new("/tmp/from-cli.toml")), TEST_ENV_VAR);
        assert_eq!(resolved, Some(PathBuf::from("/tmp/from-cli.toml")));
        std::env::remove_var(TEST_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_env_var_used_without_cli_argument() {
        std::env::set_var(TEST_ENV_VAR, "/tmp/from-env.toml");
        let resolved = resolve_config_path(None, TEST_ENV_VAR);
        assert_eq!(resolved, Some(PathBuf::from("/tmp/from-env.toml")));
        std::env::remove_var(TEST_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_blank_env_var_ignored() {
        std::env::set_var(TEST_ENV_VAR, "  ");
        let resolved = resolve_config_path(None, TEST_ENV_VAR);
        // Falls through to the per-user file, which only counts if present
        if let Some(path) = resolved {
            assert!(path.exists());
        }
        std::env::remove_var(TEST_ENV_VAR);
    }

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"cadence\"").unwrap();

        let sample: Sample = load_toml(file.path()).unwrap();
        assert_eq!(sample.name, "cadence");
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn test_load_toml_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Sample> = load_toml(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_load_toml_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = ").unwrap();

        let result: Result<Sample> = load_toml(file.path());
        assert!(matches!(result, Err(Error::Toml(_))));
    }
}

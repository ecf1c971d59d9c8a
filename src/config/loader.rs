// file: src/config/loader.rs
// version: 2.0.0
// guid: 9ef6822a-70c0-4820-a0de-cc1334c5d027

//! Configuration file loading and environment variable substitution

use super::Config;
use crate::error::WorkbenchError;
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Default location: `<config_dir>/workbench/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("workbench").join("config.yaml"))
    }

    /// Load the configuration
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used if present and built-in defaults otherwise.
    pub fn load(&self, explicit: Option<&Path>) -> Result<Config> {
        match explicit {
            Some(path) => self.load_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => self.load_file(&path),
                _ => {
                    debug!("No configuration file found, using built-in defaults");
                    Ok(Config::default())
                }
            },
        }
    }

    /// Load configuration from a YAML file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Config> {
        let content = fs::read_to_string(&path).map_err(|e| {
            WorkbenchError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}", path.as_ref().display());
        self.parse(&content)
    }

    /// Parse configuration text
    pub fn parse(&self, content: &str) -> Result<Config> {
        let expanded = self.expand_env_vars(content)?;

        // An empty document deserializes to unit, not to a map
        let mut config: Config = if expanded.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&expanded)?
        };

        config.expand_paths();
        config.validate()?;

        Ok(config)
    }

    /// Expand environment variables in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            WorkbenchError::ConfigError(format!("Invalid regex pattern: {}", e))
        })?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            if let Some(value) = self.env_vars.get(var_name) {
                result = result.replace(placeholder, value);
            } else if !missing_vars.iter().any(|m| m == var_name) {
                missing_vars.push(var_name.to_string());
            }
        }

        if !missing_vars.is_empty() {
            return Err(WorkbenchError::ConfigError(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Architecture;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_document_gives_defaults() {
        let loader = ConfigLoader::new();
        let config = loader.parse("").unwrap();

        assert_eq!(config.qemu.default_arch, Architecture::X64);
        assert_eq!(config.qemu.disk_size_mb, 64);
    }

    #[test]
    fn test_parse_partial_sections() {
        let loader = ConfigLoader::new();
        let config = loader
            .parse(
                r#"
qemu:
  default_arch: AARCH64
  profiles:
    AARCH64:
      code: /opt/aavmf/CODE.fd
toolbox:
  shell: /bin/zsh
"#,
            )
            .unwrap();

        assert_eq!(config.qemu.default_arch, Architecture::Aarch64);
        let profile = config.qemu.profile(Architecture::Aarch64);
        assert_eq!(profile.code, PathBuf::from("/opt/aavmf/CODE.fd"));
        assert_eq!(profile.qemu, "qemu-system-aarch64");
        assert_eq!(config.toolbox.shell, "/bin/zsh");
        assert_eq!(config.toolbox.basic_packages.len(), 5);
    }

    #[test]
    fn test_env_var_substitution() {
        let mut loader = ConfigLoader::new();
        loader.set_env_var("WB_TEST_FIRMWARE".to_string(), "/srv/fw".to_string());

        let config = loader
            .parse("qemu:\n  profiles:\n    X64:\n      vars: ${WB_TEST_FIRMWARE}/VARS.fd\n")
            .unwrap();

        assert_eq!(
            config.qemu.profile(Architecture::X64).vars,
            PathBuf::from("/srv/fw/VARS.fd")
        );
    }

    #[test]
    fn test_missing_env_var_is_reported_once() {
        let loader = ConfigLoader::new();
        let err = loader
            .parse("beagle:\n  kernel_url: ${WB_UNSET_12345}\n  uboot_url: ${WB_UNSET_12345}\n")
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Configuration error: Missing environment variables: WB_UNSET_12345"
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let loader = ConfigLoader::new();
        assert!(loader.parse("qemu:\n  disk_size: 64\n").is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let loader = ConfigLoader::new();
        assert!(loader.parse("qemu:\n  disk_size_mb: 8\n").is_err());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new();

        let result = loader.load(Some(temp_dir.path().join("nope.yaml").as_path()));

        assert!(matches!(result, Err(WorkbenchError::ConfigError(_))));
    }

    #[test]
    fn test_load_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "beagleplay:\n  pulse_ms: 50\n").unwrap();

        let config = ConfigLoader::new().load(Some(path.as_path())).unwrap();

        assert_eq!(config.beagleplay.pulse_ms, 50);
        assert_eq!(config.beagleplay.reset_line, "CC1352P7_RSTN");
    }
}

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use filesum_core::{DigestAlgorithm, DigestFormat, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub digest: DigestConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Default algorithm selection and output format, overridable per run
/// from the command line
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DigestConfig {
    pub algorithms: Vec<String>,
    pub format: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub color_enabled: bool,
    pub progress_enabled: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            algorithms: vec!["md5".to_string(), "sha1".to_string(), "sha256".to_string()],
            format: "hex-lower".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color_enabled: true,
            progress_enabled: true,
        }
    }
}

impl DigestConfig {
    pub fn algorithms(&self) -> Result<Vec<DigestAlgorithm>> {
        self.algorithms
            .iter()
            .map(|name| {
                name.parse::<DigestAlgorithm>()
                    .with_context(|| format!("unknown algorithm in config: {name}"))
            })
            .collect()
    }

    pub fn format(&self) -> Result<DigestFormat> {
        self.format
            .parse::<DigestFormat>()
            .with_context(|| format!("unknown format in config: {}", self.format))
    }
}

/// Layered configuration: defaults, then the TOML file, then
/// FILESUM_-prefixed environment variables.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Use a specific config file (for testing)
    #[allow(dead_code)]
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("filesum/config.toml");
        }

        #[cfg(target_os = "windows")]
        {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("filesum\\config.toml")
        }

        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/filesum/config.toml")
        }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed("FILESUM_").split("__"));

        figment.extract().context("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(
            config.digest.algorithms().unwrap(),
            vec![
                DigestAlgorithm::Md5,
                DigestAlgorithm::Sha1,
                DigestAlgorithm::Sha256,
            ]
        );
        assert_eq!(config.digest.format().unwrap(), DigestFormat::HexLower);
        assert!(config.output.progress_enabled);
        assert_eq!(config.pipeline.chunk_size, PipelineConfig::default().chunk_size);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[digest]
algorithms = ["crc32", "sha512"]
format = "base64"

[pipeline]
chunk_size = 4096
"#,
        )
        .unwrap();

        let config = ConfigManager::with_path(path).load().unwrap();

        assert_eq!(
            config.digest.algorithms().unwrap(),
            vec![DigestAlgorithm::Crc32, DigestAlgorithm::Sha512]
        );
        assert_eq!(config.digest.format().unwrap(), DigestFormat::Base64);
        assert_eq!(config.pipeline.chunk_size, 4096);
        // Untouched sections keep their defaults
        assert!(config.output.color_enabled);
    }

    #[test]
    fn test_bad_algorithm_reported() {
        let config = DigestConfig {
            algorithms: vec!["whirlpool".to_string()],
            format: "hex-lower".to_string(),
        };
        let err = config.algorithms().unwrap_err();
        assert!(err.to_string().contains("whirlpool"));
    }
}

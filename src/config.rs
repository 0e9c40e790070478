use crate::engine::EngineConfig;
use crate::error::ConfigError;
use crate::profit::KATHA_TO_HECTARE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Advisor settings, read from a TOML file. Every field has a default so an
/// empty file (or no file at all) is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Crop table to use instead of the built-in one.
    pub knowledge_base: Option<PathBuf>,
    pub conversion_factor: f64,
    pub area_unit: String,
    pub top_n: usize,
    pub log_level: String,
    pub export_dir: PathBuf,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            knowledge_base: None,
            conversion_factor: KATHA_TO_HECTARE,
            area_unit: "Katha".to_string(),
            top_n: 2,
            log_level: "info".to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl AdvisorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: AdvisorConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        AdvisorConfig::from_toml_str(&s)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            conversion_factor: self.conversion_factor,
            top_n: self.top_n,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.conversion_factor.is_finite() || self.conversion_factor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "conversion_factor must be positive, got {}",
                self.conversion_factor
            )));
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AdvisorConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, AdvisorConfig::default());
        assert_eq!(cfg.engine_config(), EngineConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = AdvisorConfig::from_toml_str(
            r#"
            knowledge_base = "data/bihar.toml"
            conversion_factor = 0.4047
            area_unit = "Acre"
            top_n = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.knowledge_base, Some(PathBuf::from("data/bihar.toml")));
        assert_eq!(cfg.area_unit, "Acre");
        assert_eq!(cfg.engine_config().top_n, 3);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AdvisorConfig::from_toml_str("conversion_factor = -1.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AdvisorConfig::from_toml_str("top_n = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AdvisorConfig::from_toml_str("top_n = \"two\""),
            Err(ConfigError::Parse(_))
        ));
    }
}

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpanlensError};

/// Presentation constants consumed by the layout crate. The classifier
/// thresholds are the upper bounds of the first four duration buckets; the
/// fifth bucket takes everything above the last threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub classifier_thresholds: [f64; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier_thresholds: [0.2, 0.4, 0.6, 0.8],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        let config_path = config_file_path();
        if let Some(file_overrides) = load_file_overrides(&config_path)? {
            apply_overrides(&mut cfg, file_overrides, "config file")?;
        }
        let env_overrides = load_env_overrides();
        apply_overrides(&mut cfg, env_overrides, "environment")?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        apply_overrides(&mut cfg, load_env_overrides(), "environment")?;
        Ok(cfg)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigOverrides {
    classifier_thresholds: Option<Vec<f64>>,
}

fn config_file_path() -> PathBuf {
    if let Ok(path) = env::var("SPANLENS_CONFIG") {
        return PathBuf::from(path);
    }

    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(home).join(".config"));
    config_home.join("spanlens/config.toml")
}

fn load_file_overrides(path: &PathBuf) -> Result<Option<ConfigOverrides>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| SpanlensError::Config(format!("failed reading {}: {e}", path.display())))?;
    let parsed: ConfigOverrides = toml::from_str(&raw)
        .map_err(|e| SpanlensError::Config(format!("failed parsing {}: {e}", path.display())))?;
    Ok(Some(parsed))
}

fn load_env_overrides() -> ConfigOverrides {
    ConfigOverrides {
        classifier_thresholds: env::var("SPANLENS_CLASSIFIER_THRESHOLDS")
            .ok()
            .map(|raw| parse_threshold_list(&raw)),
    }
}

fn parse_threshold_list(raw: &str) -> Vec<f64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<f64>().ok())
        .collect()
}

fn apply_overrides(cfg: &mut Config, overrides: ConfigOverrides, source: &str) -> Result<()> {
    if let Some(v) = overrides.classifier_thresholds {
        let thresholds: [f64; 4] = v.as_slice().try_into().map_err(|_| {
            SpanlensError::Config(format!(
                "classifier_thresholds in {source} must list exactly 4 values, got {}",
                v.len()
            ))
        })?;
        validate_thresholds(&thresholds, source)?;
        cfg.classifier_thresholds = thresholds;
    }
    Ok(())
}

fn validate_thresholds(thresholds: &[f64; 4], source: &str) -> Result<()> {
    let mut prev = 0.0;
    for &t in thresholds {
        if !t.is_finite() || t <= prev || t >= 1.0 {
            return Err(SpanlensError::Config(format!(
                "classifier_thresholds in {source} must be strictly increasing within (0, 1), got {thresholds:?}"
            )));
        }
        prev = t;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_partitions_unit_interval() {
        let cfg = Config::default();
        assert_eq!(cfg.classifier_thresholds, [0.2, 0.4, 0.6, 0.8]);
    }

    #[test]
    fn apply_file_overrides_updates_thresholds() {
        let mut cfg = Config::default();
        let file = ConfigOverrides {
            classifier_thresholds: Some(vec![0.1, 0.25, 0.5, 0.75]),
        };

        apply_overrides(&mut cfg, file, "config file").unwrap();

        assert_eq!(cfg.classifier_thresholds, [0.1, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn rejects_wrong_arity() {
        let mut cfg = Config::default();
        let file = ConfigOverrides {
            classifier_thresholds: Some(vec![0.5]),
        };
        assert!(apply_overrides(&mut cfg, file, "config file").is_err());
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let mut cfg = Config::default();
        let file = ConfigOverrides {
            classifier_thresholds: Some(vec![0.4, 0.2, 0.6, 0.8]),
        };
        assert!(apply_overrides(&mut cfg, file, "config file").is_err());
    }

    #[test]
    fn parse_threshold_list_skips_garbage() {
        assert_eq!(
            parse_threshold_list("0.1, 0.2, nope, 0.9"),
            vec![0.1, 0.2, 0.9]
        );
    }
}

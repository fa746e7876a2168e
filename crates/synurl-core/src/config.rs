use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::similarity::DEFAULT_THRESHOLD;

/// Backoff between fetch retries (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

/// How URLs are fetched during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchBackend {
    /// External tool invoked as `command args... <url> <output.json>`.
    #[default]
    Command,
    /// Single GET through libcurl; the body's SHA-256 is the resource hash.
    Direct,
}

/// Fetch backend settings (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default)]
    pub backend: FetchBackend,
    /// Program run by the command backend.
    pub command: String,
    /// Arguments placed before the URL and output path.
    #[serde(default)]
    pub args: Vec<String>,
    /// Connect timeout for the direct backend.
    pub connect_timeout_secs: u64,
    /// Wall-clock cap on one direct fetch.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            backend: FetchBackend::Command,
            command: "slimerjs".to_string(),
            args: vec!["fetchsyn.js".to_string()],
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// Global configuration loaded from `~/.config/synurl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynurlConfig {
    /// Minimum weighted similarity for clustering and reduction, in [0, 1].
    pub similarity_threshold: f64,
    /// Retries for the sanity fetch of an original synonym URL.
    pub sanity_retry_count: u32,
    /// Retries for each reduced URL.
    pub reduced_retry_count: u32,
    /// Ignore cached fetch results and fetch everything again.
    #[serde(default)]
    pub force_refetch: bool,
    /// Optional retry backoff; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional fetch backend settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
}

impl Default for SynurlConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_THRESHOLD,
            sanity_retry_count: 10,
            reduced_retry_count: 3,
            force_refetch: false,
            retry: None,
            fetch: None,
        }
    }
}

impl SynurlConfig {
    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        check_threshold(self.similarity_threshold)?;
        if let Some(retry) = &self.retry {
            if !(retry.base_delay_secs >= 0.0 && retry.base_delay_secs.is_finite()) {
                anyhow::bail!(
                    "retry.base_delay_secs must be a non-negative number, got {}",
                    retry.base_delay_secs
                );
            }
        }
        Ok(())
    }

    pub fn retry_or_default(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }

    pub fn fetch_or_default(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }
}

/// Thresholds are ratios of earned to maximum score.
pub fn check_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("similarity threshold must be within [0, 1], got {}", threshold);
    }
    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("synurl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the default location, creating it if none exists.
pub fn load_or_init() -> Result<SynurlConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, writing defaults there first if it is missing.
pub fn load_or_init_at(path: &Path) -> Result<SynurlConfig> {
    if !path.exists() {
        let default_cfg = SynurlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SynurlConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SynurlConfig::default();
        assert!((cfg.similarity_threshold - 0.60).abs() < 1e-9);
        assert_eq!(cfg.sanity_retry_count, 10);
        assert_eq!(cfg.reduced_retry_count, 3);
        assert!(!cfg.force_refetch);
        assert_eq!(cfg.fetch_or_default().backend, FetchBackend::Command);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SynurlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SynurlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.sanity_retry_count, cfg.sanity_retry_count);
        assert_eq!(parsed.reduced_retry_count, cfg.reduced_retry_count);
        assert_eq!(parsed.force_refetch, cfg.force_refetch);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            similarity_threshold = 0.75
            sanity_retry_count = 2
            reduced_retry_count = 1
            force_refetch = true

            [retry]
            base_delay_secs = 0.0
            max_delay_secs = 5

            [fetch]
            backend = "direct"
            command = "fetchtool"
            connect_timeout_secs = 3
            timeout_secs = 9
        "#;
        let cfg: SynurlConfig = toml::from_str(toml).unwrap();
        assert!((cfg.similarity_threshold - 0.75).abs() < 1e-9);
        assert_eq!(cfg.sanity_retry_count, 2);
        assert!(cfg.force_refetch);
        let fetch = cfg.fetch.as_ref().unwrap();
        assert_eq!(fetch.backend, FetchBackend::Direct);
        assert!(fetch.args.is_empty());
        assert_eq!(cfg.retry.as_ref().unwrap().max_delay_secs, 5);
        cfg.validate().unwrap();
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let cfg = SynurlConfig {
            similarity_threshold: 1.5,
            ..SynurlConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert!(check_threshold(-0.1).is_err());
        assert!(check_threshold(0.0).is_ok());
        assert!(check_threshold(1.0).is_ok());
    }

    #[test]
    fn load_or_init_writes_defaults_then_reads_them() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let first = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        let second = load_or_init_at(&path).unwrap();
        assert_eq!(first.sanity_retry_count, second.sanity_retry_count);
    }
}

//! Runtime server configuration.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use pickstat_core::config::AnalysisConfig;
use serde::Deserialize;

/// Deserialised from `config.toml`, then overridden by `PICKSTAT_*`
/// environment variables (`__` separates nested keys, e.g.
/// `PICKSTAT_ANALYSIS__STREAK__WINDOW_DAYS=14`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub analysis:   AnalysisConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       3000,
      store_path: PathBuf::from("pickstat.db"),
      analysis:   AnalysisConfig::default(),
    }
  }
}

impl ServerConfig {
  /// Read `path` if it exists and layer the environment over it.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("PICKSTAT")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read config file")?;

    let cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.analysis.validate().context("invalid [analysis] section")?;
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf {
    let s = self.store_path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/")
      && let Ok(home) = std::env::var("HOME")
    {
      return PathBuf::from(home).join(rest);
    }
    self.store_path.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir()
      .join(format!("pickstat-{name}-{}.toml", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn missing_file_uses_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/pickstat.toml")).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.analysis.severity.critical_after_days, 600);
  }

  #[test]
  fn file_overrides_nested_analysis_settings() {
    let path = write_temp("nested", "port = 8081\n\n[analysis.streak]\nwindow_days = 14\n");
    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.port, 8081);
    assert_eq!(cfg.analysis.streak.window_days, 14);
    assert_eq!(cfg.analysis.streak.hot_min_hits, 8);
  }

  #[test]
  fn inconsistent_thresholds_are_rejected() {
    let path = write_temp(
      "thresholds",
      "[analysis.severity]\nmedium_after_days = 500\nhigh_after_days = 400\n",
    );
    let result = ServerConfig::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(result.is_err());
  }
}

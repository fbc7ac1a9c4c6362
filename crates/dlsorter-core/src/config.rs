//! Tool configuration, loaded from `~/.config/dlsorter/config.toml`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::interceptor::InterceptorOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlsorterConfig {
    /// Seconds the redirect notification stays visible before auto-dismiss.
    pub notification_timeout_secs: u64,
    /// Icon name handed to the notification service.
    pub notification_icon: String,
    /// Override for the rules file location; default is the XDG state dir.
    #[serde(default)]
    pub rules_path: Option<PathBuf>,
}

impl Default for DlsorterConfig {
    fn default() -> Self {
        Self {
            notification_timeout_secs: 3,
            notification_icon: "favicon.png".to_string(),
            rules_path: None,
        }
    }
}

impl DlsorterConfig {
    pub fn interceptor_options(&self) -> InterceptorOptions {
        InterceptorOptions {
            notification_icon: self.notification_icon.clone(),
            notification_timeout: Duration::from_secs(self.notification_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dlsorter")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DlsorterConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DlsorterConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: DlsorterConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = DlsorterConfig::default();
        assert_eq!(cfg.notification_timeout_secs, 3);
        assert_eq!(cfg.notification_icon, "favicon.png");
        assert!(cfg.rules_path.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = DlsorterConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: DlsorterConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.notification_timeout_secs, cfg.notification_timeout_secs);
        assert_eq!(parsed.notification_icon, cfg.notification_icon);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            notification_timeout_secs = 10
            notification_icon = "bell.svg"
            rules_path = "/tmp/rules.json"
        "#;
        let cfg: DlsorterConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.notification_timeout_secs, 10);
        assert_eq!(cfg.notification_icon, "bell.svg");
        assert_eq!(cfg.rules_path.as_deref(), Some(std::path::Path::new("/tmp/rules.json")));
    }

    #[test]
    fn interceptor_options_carry_timeout() {
        let cfg = DlsorterConfig {
            notification_timeout_secs: 7,
            ..DlsorterConfig::default()
        };
        let opts = cfg.interceptor_options();
        assert_eq!(opts.notification_timeout, Duration::from_secs(7));
        assert_eq!(opts.notification_icon, "favicon.png");
    }
}

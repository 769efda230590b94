use serde::{Deserialize, Serialize};

use self::alert::AlertConfig;
use self::log::LogConfig;
use self::monitor::MonitorConfig;
use self::ocr::OcrConfig;
use self::save::SaveConfig;

pub mod alert;
pub mod log;
pub mod monitor;
pub mod ocr;
pub mod save;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorConfig,
    pub save: SaveConfig,
    pub ocr: OcrConfig,
    pub alert: AlertConfig,
    pub log: LogConfig,
}

impl Config {
    /// Build config from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            monitor: MonitorConfig::new(),
            save: SaveConfig::new(),
            ocr: OcrConfig::new(),
            alert: AlertConfig::default(),
            log: LogConfig::default(),
        }
    }
}

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.monitor.interval_ms, 4000);
        assert_eq!(config.save.folder_prefix, "AppMonitor");
        assert_eq!(config.ocr.language, "en");
        assert!(config.alert.bell);
        assert_eq!(config.log.filter, "warn");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"monitor":{"interval_ms":1500},"alert":{"bell":false}}"#)
                .unwrap();
        assert_eq!(config.monitor.interval_ms, 1500);
        assert_eq!(config.monitor.keyboard_poll_ms, 100);
        assert!(!config.alert.bell);
    }
}

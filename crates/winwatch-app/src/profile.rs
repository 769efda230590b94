use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use winwatch_config::Config;

/// Load config from a JSON file, or from the environment when no file is given
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config {}", path.display()))?;
            let config = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse config {}", path.display()))?;
            Ok(config)
        }
        None => Ok(Config::new()),
    }
}

/// Default root for screenshot folders: the user's Desktop, or the working
/// directory when there is none
pub fn desktop_dir() -> PathBuf {
    output_root(dirs::desktop_dir())
}

fn output_root(desktop: Option<PathBuf>) -> PathBuf {
    match desktop {
        Some(desktop) if desktop.is_dir() => desktop,
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("winwatch-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        let path = temp_file(
            "config.json",
            r#"{"monitor":{"interval_ms":2000},"save":{"folder_prefix":"Shots"}}"#,
        );

        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.monitor.interval_ms, 2000);
        assert_eq!(config.save.folder_prefix, "Shots");
        assert_eq!(config.ocr.language, "en");
    }

    #[test]
    fn test_load_config_reports_bad_json() {
        let path = temp_file("broken.json", "{ not json");

        let err = load_config(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_output_root_uses_existing_desktop() {
        let desktop = std::env::temp_dir();
        assert_eq!(output_root(Some(desktop.clone())), desktop);
    }

    #[test]
    fn test_output_root_falls_back_to_working_dir() {
        let missing = std::env::temp_dir().join("winwatch-no-such-desktop");
        assert_eq!(output_root(Some(missing)), PathBuf::from("."));
        assert_eq!(output_root(None), PathBuf::from("."));
        assert!(desktop_dir().is_dir());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("winwatch-definitely-missing.json");
        assert!(load_config(Some(&missing)).is_err());
    }
}

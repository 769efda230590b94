use std::path::PathBuf;

use clap::Parser;
use winwatch_config::Config;

/// Watch a window: save periodic screenshots or ring when a phrase shows up
#[derive(Debug, Parser)]
#[command(name = "winwatch", version)]
pub struct Cli {
    /// JSON config file, replaces env-derived settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Milliseconds between captures
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Root directory for screenshot folders
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// OCR language tag, e.g. "en" or "ja"
    #[arg(long)]
    pub language: Option<String>,

    /// Do not ring the terminal bell on detections
    #[arg(long)]
    pub no_bell: bool,
}

impl Cli {
    /// Flags win over file and env settings
    pub fn apply(&self, config: &mut Config) {
        if let Some(ms) = self.interval_ms {
            config.monitor.interval_ms = ms;
        }
        if let Some(dir) = &self.output_dir {
            config.save.output_dir = Some(dir.clone());
        }
        if let Some(language) = &self.language {
            config.ocr.language = language.clone();
        }
        if self.no_bell {
            config.alert.bell = false;
        }
    }
}

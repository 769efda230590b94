use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_folder_prefix() -> String {
    "AppMonitor".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SaveConfig {
    /// Root for screenshot folders, the user's Desktop when unset
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_folder_prefix")]
    pub folder_prefix: String,
}

impl SaveConfig {
    pub fn new() -> Self {
        Self {
            output_dir: env::var_os("WINWATCH_OUTPUT_DIR").map(PathBuf::from),
            folder_prefix: default_folder_prefix(),
        }
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            folder_prefix: default_folder_prefix(),
        }
    }
}

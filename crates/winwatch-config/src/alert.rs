use serde::{Deserialize, Serialize};

fn default_bell() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AlertConfig {
    /// Ring the terminal bell when the phrase is detected
    #[serde(default = "default_bell")]
    pub bell: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            bell: default_bell(),
        }
    }
}

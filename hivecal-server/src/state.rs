use std::sync::Arc;

use hivecal_core::apiary::ApiaryDir;
use hivecal_core::config::HivecalConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    config: Arc<HivecalConfig>,
}

impl AppState {
    pub fn new(config: HivecalConfig) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &HivecalConfig {
        &self.config
    }

    // Apiary files are re-read on every request so edits show up without a restart
    pub fn source(&self) -> ApiaryDir {
        ApiaryDir::new(self.config.apiary_path())
    }
}

use config::Config;
use log::warn;

pub mod config;
pub mod logging;

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config) -> Self {
        if !app_config.line_login_enabled() {
            warn!("LINE_CHANNEL_ID or LINE_CHANNEL_SECRET not configured; LINE login is disabled");
        }

        Self { config: app_config }
    }
}

use std::sync::Arc;

use prowlarr_bridge_core::{Config, NoticeBoard, SanitizedConfig, SearchGateway};

/// Shared application state
pub struct AppState {
    config: Config,
    gateway: Arc<SearchGateway>,
    notices: Arc<NoticeBoard>,
}

impl AppState {
    pub fn new(config: Config, gateway: Arc<SearchGateway>, notices: Arc<NoticeBoard>) -> Self {
        Self {
            config,
            gateway,
            notices,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn gateway(&self) -> &SearchGateway {
        self.gateway.as_ref()
    }

    pub fn notices(&self) -> &NoticeBoard {
        self.notices.as_ref()
    }
}

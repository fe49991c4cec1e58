use anyhow::Result;
use std::sync::Arc;

use crate::app::Config;
use crate::gateway::{HttpGateway, QueryGateway};
use crate::runtime::ConversationController;
use crate::session::ChatState;

/// Everything one running client owns. Built once at start-up, dropped at exit.
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Sessions, selection and send orchestration
    pub controller: Arc<ConversationController>,
}

impl AppState {
    /// Create app state talking to the configured HTTP query service
    pub fn new(config: Config) -> Result<Self> {
        let gateway = HttpGateway::new(&config.gateway)?;
        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    /// Create app state with any gateway implementation
    pub fn with_gateway(config: Config, gateway: Arc<dyn QueryGateway>) -> Self {
        let chat = Arc::new(ChatState::new(config.identity()));
        let controller = ConversationController::new(chat, gateway)
            .with_serialized_sends(config.chat.serialize_sends);

        Self {
            config,
            controller: Arc::new(controller),
        }
    }

    pub fn chat(&self) -> &Arc<ChatState> {
        self.controller.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::UserConfig;
    use crate::gateway::MockQueryGateway;

    #[test]
    fn test_identity_flows_into_sessions() {
        let mut config = Config::default();
        config.user = Some(UserConfig {
            id: "u-1".to_string(),
            name: "Lin".to_string(),
            email: "lin@example.com".to_string(),
        });

        let state = AppState::with_gateway(config, Arc::new(MockQueryGateway::new()));
        let session = state.controller.create_session().unwrap();

        assert_eq!(session.user_id.as_deref(), Some("u-1"));
        assert_eq!(state.chat().current(), Some(session.id.clone()));
    }
}

use std::sync::Arc;
use tracing::warn;

use crate::app::AppState;
use crate::runtime::{ConversationController, PendingSend, SendOutcome};
use crate::session::ChatView;
use crate::utils::ChatError;

/// Application state
pub struct App {
    /// Config, sessions and the controller
    pub state: AppState,
    /// User input buffer
    pub input: String,
    /// Is the app running?
    pub running: bool,
    /// Scroll offset for chat view, counted from the bottom
    pub scroll_offset: u16,
    /// Show session sidebar
    pub show_sidebar: bool,
    /// Show message timestamps
    pub show_timestamps: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new app instance
    pub fn new(state: AppState) -> Self {
        let show_sidebar = state.config.ui.show_sidebar;
        let show_timestamps = state.config.ui.show_timestamps;

        Self {
            state,
            input: String::new(),
            running: true,
            scroll_offset: 0,
            show_sidebar,
            show_timestamps,
            status_message: None,
        }
    }

    pub fn controller(&self) -> &Arc<ConversationController> {
        &self.state.controller
    }

    /// Snapshot for this frame
    pub fn view(&self) -> ChatView {
        self.state.chat().view()
    }

    /// "New Chat"
    pub fn new_session(&mut self) {
        match self.controller().create_session() {
            Ok(session) => {
                self.scroll_offset = 0;
                self.set_status(format!("Started {}", session.title));
            }
            Err(e) => self.set_status(format!("Could not create session: {}", e)),
        }
    }

    /// Select the session after the current one, wrapping around
    pub fn select_next(&mut self) {
        self.select_relative(1);
    }

    /// Select the session before the current one, wrapping around
    pub fn select_previous(&mut self) {
        self.select_relative(-1);
    }

    fn select_relative(&mut self, step: isize) {
        let view = self.view();
        let sessions = view.sessions();
        if sessions.is_empty() {
            return;
        }

        let len = sessions.len() as isize;
        let next = match view
            .current
            .as_deref()
            .and_then(|id| sessions.iter().position(|s| s.id == id))
        {
            Some(index) => (index as isize + step).rem_euclid(len) as usize,
            None => 0,
        };

        if let Err(e) = self.controller().select_session(&sessions[next].id) {
            self.set_status(format!("Could not select session: {}", e));
            return;
        }
        self.scroll_offset = 0;
    }

    /// Turn the input buffer into a pending send.
    ///
    /// Starts a session first when none is selected. The input is cleared
    /// only when the user message made it into the transcript.
    pub fn submit(&mut self) -> Option<PendingSend> {
        if self.input.trim().is_empty() {
            return None;
        }
        if self.state.chat().current().is_none() {
            self.new_session();
        }

        let result = self.controller().begin_send_to_current(&self.input);
        match result {
            Ok(pending) => {
                self.clear_input();
                self.scroll_offset = 0;
                self.clear_status();
                Some(pending)
            }
            Err(ChatError::EmptyMessage) => None,
            Err(e) => {
                warn!("send rejected: {}", e);
                self.set_status(format!("✗ {}", e));
                None
            }
        }
    }

    /// Reflect a finished send in the status line
    pub fn handle_outcome(&mut self, outcome: SendOutcome) {
        match outcome {
            SendOutcome::Replied { .. } => {
                if self.status_message.is_some() && self.controller().pending_total() == 0 {
                    self.clear_status();
                }
            }
            SendOutcome::Failed {
                session_id, error, ..
            } => {
                let title = self
                    .state
                    .chat()
                    .get_session(&session_id)
                    .map(|s| s.title.clone())
                    .unwrap_or(session_id);
                self.set_status(format!("✗ No reply in {}: {}", title, error));
            }
        }
    }

    /// Clear the input buffer
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Toggle sidebar visibility
    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Scroll chat view up (towards older messages)
    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    /// Scroll chat view down
    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Config;
    use crate::gateway::MockQueryGateway;
    use crate::session::MessageRole;

    fn app_with(gateway: MockQueryGateway) -> App {
        App::new(AppState::with_gateway(Config::default(), Arc::new(gateway)))
    }

    #[test]
    fn test_submit_without_session_starts_one() {
        let mut app = app_with(MockQueryGateway::new());
        app.input = "hello".to_string();

        let pending = app.submit().unwrap();

        assert!(app.input.is_empty());
        let view = app.view();
        assert_eq!(view.sessions().len(), 1);
        assert_eq!(view.current.as_deref(), Some(pending.session_id.as_str()));
        let session = view.current_session().unwrap();
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, MessageRole::User);
    }

    #[test]
    fn test_blank_submit_keeps_state() {
        let mut app = app_with(MockQueryGateway::new());
        app.input = "   ".to_string();

        assert!(app.submit().is_none());
        assert_eq!(app.input, "   ");
        assert!(app.view().sessions().is_empty());
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app_with(MockQueryGateway::new());
        app.new_session();
        app.new_session();
        app.new_session();
        let ids: Vec<String> = app.view().sessions().iter().map(|s| s.id.clone()).collect();
        assert_eq!(app.view().current, Some(ids[2].clone()));

        app.select_next();
        assert_eq!(app.view().current, Some(ids[0].clone()));
        app.select_previous();
        app.select_previous();
        assert_eq!(app.view().current, Some(ids[1].clone()));
    }

    #[tokio::test]
    async fn test_failed_outcome_sets_status() {
        let mut gateway = MockQueryGateway::new();
        gateway.expect_query().returning(|_| {
            Err(crate::utils::GatewayError::Transport("connection refused".to_string()))
        });
        let mut app = app_with(gateway);
        app.input = "x".to_string();

        let pending = app.submit().unwrap();
        let outcome = app.controller().complete_send(pending).await;
        app.handle_outcome(outcome);

        let status = app.status_message.clone().unwrap();
        assert!(status.contains("Chat 1"));
        assert!(status.contains("connection refused"));
    }
}

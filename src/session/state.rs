use parking_lot::RwLock;
use std::sync::Arc;

use super::ids::IdGenerator;
use super::selection::Selection;
use super::store::SessionStore;
use super::types::{Message, MessageRole, Session, User};
use crate::constants::MESSAGE_ID_PREFIX;
use crate::utils::ChatError;

/// What the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct ChatView {
    pub store: Arc<SessionStore>,
    pub current: Option<String>,
}

impl ChatView {
    pub fn sessions(&self) -> &[Arc<Session>] {
        self.store.list_sessions()
    }

    pub fn current_session(&self) -> Option<Arc<Session>> {
        self.current
            .as_deref()
            .and_then(|id| self.store.get_session(id))
    }
}

/// Single owner of the session store and the selection for one process.
///
/// Writers swap in a whole new `SessionStore` under the lock; readers clone
/// the `Arc` and never see a half-applied append.
pub struct ChatState {
    ids: IdGenerator,
    store: RwLock<Arc<SessionStore>>,
    selection: RwLock<Selection>,
    user: Option<User>,
}

impl ChatState {
    pub fn new(user: Option<User>) -> Self {
        Self {
            ids: IdGenerator::new(),
            store: RwLock::new(Arc::new(SessionStore::new())),
            selection: RwLock::new(Selection::new()),
            user,
        }
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Current store snapshot
    pub fn snapshot(&self) -> Arc<SessionStore> {
        self.store.read().clone()
    }

    pub fn view(&self) -> ChatView {
        ChatView {
            store: self.snapshot(),
            current: self.current(),
        }
    }

    /// Create a session owned by the configured user
    pub fn create_session(&self) -> Arc<Session> {
        let owner = self.user.as_ref().map(|u| u.id.clone());
        let mut store = self.store.write();
        let (next, session) = store.create_session(&self.ids, owner);
        *store = Arc::new(next);
        session
    }

    /// Build a message with a fresh id and append it to `session_id`
    pub fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<Message, ChatError> {
        let message = Message::new(self.ids.next_id(MESSAGE_ID_PREFIX), role, content);
        self.append_message(session_id, message.clone())?;
        Ok(message)
    }

    pub fn append_message(&self, session_id: &str, message: Message) -> Result<Arc<Session>, ChatError> {
        let mut store = self.store.write();
        let (next, session) = store.append_message(session_id, message)?;
        *store = Arc::new(next);
        Ok(session)
    }

    pub fn list_sessions(&self) -> Vec<Arc<Session>> {
        self.snapshot().list_sessions().to_vec()
    }

    pub fn get_session(&self, session_id: &str) -> Option<Arc<Session>> {
        self.snapshot().get_session(session_id)
    }

    /// Point the selection at an existing session
    pub fn select(&self, session_id: &str) -> Result<(), ChatError> {
        if !self.snapshot().contains(session_id) {
            return Err(ChatError::not_found(session_id));
        }
        self.selection.write().select(session_id);
        Ok(())
    }

    pub fn current(&self) -> Option<String> {
        self.selection.read().current().map(str::to_string)
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "user-42".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn test_create_stamps_user_id() {
        let state = ChatState::new(Some(user()));
        let session = state.create_session();
        assert_eq!(session.user_id.as_deref(), Some("user-42"));

        let anonymous = ChatState::new(None).create_session();
        assert_eq!(anonymous.user_id, None);
    }

    #[test]
    fn test_select_rejects_unknown_id() {
        let state = ChatState::default();
        let session = state.create_session();

        assert_eq!(state.select("session-999"), Err(ChatError::not_found("session-999")));
        assert_eq!(state.current(), None);

        state.select(&session.id).unwrap();
        assert_eq!(state.current(), Some(session.id.clone()));
    }

    #[test]
    fn test_snapshot_is_stable_across_writes() {
        let state = ChatState::default();
        let session = state.create_session();
        let before = state.snapshot();

        state.append(&session.id, MessageRole::User, "hi").unwrap();

        assert!(before.get_session(&session.id).unwrap().messages.is_empty());
        assert_eq!(state.get_session(&session.id).unwrap().messages.len(), 1);
    }

    #[test]
    fn test_view_reports_current_session() {
        let state = ChatState::default();
        let a = state.create_session();
        state.create_session();
        state.select(&a.id).unwrap();

        let view = state.view();
        assert_eq!(view.sessions().len(), 2);
        assert_eq!(view.current_session().map(|s| s.id.clone()), Some(a.id.clone()));
    }
}

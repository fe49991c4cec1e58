use std::sync::Arc;

use super::ids::IdGenerator;
use super::types::{Message, Session};
use crate::constants::{SESSION_ID_PREFIX, SESSION_TITLE_PREFIX};
use crate::utils::ChatError;

/// Immutable, ordered collection of sessions.
///
/// Every mutation returns a new store and leaves `self` untouched, so a
/// snapshot handed to a reader stays consistent while writers move on.
/// Sessions are kept behind `Arc` and only the touched one is rebuilt.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Vec<Arc<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new empty session at the end of the iteration order
    pub fn create_session(
        &self,
        ids: &IdGenerator,
        owner_user_id: Option<String>,
    ) -> (Self, Arc<Session>) {
        let title = format!("{} {}", SESSION_TITLE_PREFIX, self.sessions.len() + 1);
        let session = Arc::new(Session::new(
            ids.next_id(SESSION_ID_PREFIX),
            owner_user_id,
            title,
        ));

        let mut sessions = self.sessions.clone();
        sessions.push(session.clone());
        (Self { sessions }, session)
    }

    /// Append `message` to the session identified by `session_id`
    pub fn append_message(
        &self,
        session_id: &str,
        message: Message,
    ) -> Result<(Self, Arc<Session>), ChatError> {
        let index = self
            .position(session_id)
            .ok_or_else(|| ChatError::not_found(session_id))?;

        let updated = Arc::new(self.sessions[index].with_message(message));
        let mut sessions = self.sessions.clone();
        sessions[index] = updated.clone();
        Ok((Self { sessions }, updated))
    }

    /// Sessions in creation order
    pub fn list_sessions(&self) -> &[Arc<Session>] {
        &self.sessions
    }

    pub fn get_session(&self, session_id: &str) -> Option<Arc<Session>> {
        self.position(session_id).map(|i| self.sessions[i].clone())
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.position(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn position(&self, session_id: &str) -> Option<usize> {
        self.sessions.iter().position(|s| s.id == session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MessageRole;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn message(ids: &IdGenerator, role: MessageRole, content: &str) -> Message {
        Message::new(ids.next_id("msg"), role, content)
    }

    #[test]
    fn test_create_assigns_titles_and_order() {
        let ids = IdGenerator::new();
        let store = SessionStore::new();
        let (store, first) = store.create_session(&ids, None);
        let (store, second) = store.create_session(&ids, Some("u-1".to_string()));

        assert_eq!(first.title, "Chat 1");
        assert_eq!(second.title, "Chat 2");
        assert_eq!(second.user_id.as_deref(), Some("u-1"));
        assert!(first.messages.is_empty());

        let order: Vec<&str> = store.list_sessions().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec![first.id.as_str(), second.id.as_str()]);
    }

    #[test]
    fn test_session_ids_are_distinct() {
        let ids = IdGenerator::new();
        let mut store = SessionStore::new();
        let mut seen = HashSet::new();
        for _ in 0..50 {
            let (next, session) = store.create_session(&ids, None);
            assert!(seen.insert(session.id.clone()));
            store = next;
        }
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn test_append_only_touches_target() {
        let ids = IdGenerator::new();
        let (store, a) = SessionStore::new().create_session(&ids, None);
        let (store, b) = store.create_session(&ids, None);
        let (store, _) = store
            .append_message(&b.id, message(&ids, MessageRole::User, "earlier"))
            .unwrap();

        let before = store.clone();
        let (after, updated) = store
            .append_message(&a.id, message(&ids, MessageRole::User, "hello"))
            .unwrap();

        assert_eq!(updated.messages.len(), 1);
        assert_eq!(updated.messages[0].content, "hello");
        assert_eq!(after.get_session(&b.id), before.get_session(&b.id));

        let old_a = before.get_session(&a.id).unwrap();
        let new_a = after.get_session(&a.id).unwrap();
        assert_eq!(new_a.messages.len(), old_a.messages.len() + 1);
        assert_eq!(&new_a.messages[..old_a.messages.len()], &old_a.messages[..]);
        assert_eq!(new_a.id, old_a.id);
        assert_eq!(new_a.title, old_a.title);
    }

    #[test]
    fn test_append_leaves_previous_snapshot_intact() {
        let ids = IdGenerator::new();
        let (store, a) = SessionStore::new().create_session(&ids, None);
        let (after, _) = store
            .append_message(&a.id, message(&ids, MessageRole::User, "hi"))
            .unwrap();

        assert!(store.get_session(&a.id).unwrap().messages.is_empty());
        assert_eq!(after.get_session(&a.id).unwrap().messages.len(), 1);
    }

    #[test]
    fn test_append_to_unknown_session_fails() {
        let ids = IdGenerator::new();
        let (store, _) = SessionStore::new().create_session(&ids, None);
        let result = store.append_message("session-missing", message(&ids, MessageRole::Bot, "x"));
        assert_eq!(result.unwrap_err(), ChatError::not_found("session-missing"));
    }

    #[test]
    fn test_reads_are_idempotent() {
        let ids = IdGenerator::new();
        let (store, a) = SessionStore::new().create_session(&ids, None);
        let (store, _) = store
            .append_message(&a.id, message(&ids, MessageRole::User, "q"))
            .unwrap();

        assert_eq!(store.list_sessions(), store.list_sessions());
        assert_eq!(store.get_session(&a.id), store.get_session(&a.id));
        assert_eq!(store.get_session("nope"), None);
    }
}

/// Which session is currently displayed and receives new sends.
///
/// Holds the id only; the session itself stays owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, session_id: impl Into<String>) {
        self.current = Some(session_id.into());
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        assert_eq!(Selection::new().current(), None);
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut selection = Selection::new();
        selection.select("session-1");
        selection.select("session-2");
        assert_eq!(selection.current(), Some("session-2"));
    }
}

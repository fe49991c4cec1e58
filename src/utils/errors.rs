use thiserror::Error;

/// Failure of a round trip to the query service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Query service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode query response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Main error type for kgchat
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Session not found: {session_id}")]
    NotFound { session_id: String },

    #[error("Message is empty")]
    EmptyMessage,

    #[error("No session selected")]
    NoSessionSelected,

    #[error("A request is already in flight for session {session_id}")]
    SendInFlight { session_id: String },

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl ChatError {
    pub fn not_found(session_id: impl Into<String>) -> Self {
        Self::NotFound {
            session_id: session_id.into(),
        }
    }
}

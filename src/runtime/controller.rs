use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::constants::REQUEST_ID_PREFIX;
use crate::diagnostics::DiagnosticLog;
use crate::gateway::QueryGateway;
use crate::session::{ChatState, Message, MessageRole, Session};
use crate::utils::ChatError;

/// A send whose user message is already in the transcript and whose gateway
/// call has not resolved yet.
///
/// `session_id` is captured at issuance; the reply goes there no matter what
/// is selected when the call returns.
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub request_id: String,
    pub session_id: String,
    pub text: String,
}

/// How a send operation ended
#[derive(Debug, Clone)]
pub enum SendOutcome {
    Replied {
        session_id: String,
        request_id: String,
        bot_message: Message,
    },
    Failed {
        session_id: String,
        request_id: String,
        error: ChatError,
    },
}

impl SendOutcome {
    pub fn session_id(&self) -> &str {
        match self {
            Self::Replied { session_id, .. } | Self::Failed { session_id, .. } => session_id,
        }
    }

    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied { .. })
    }
}

/// Orchestrates session creation, selection and sends
pub struct ConversationController {
    state: Arc<ChatState>,
    gateway: Arc<dyn QueryGateway>,
    diagnostics: Arc<DiagnosticLog>,
    /// Unresolved sends per session id
    in_flight: Mutex<HashMap<String, usize>>,
    serialize_sends: bool,
}

impl ConversationController {
    pub fn new(state: Arc<ChatState>, gateway: Arc<dyn QueryGateway>) -> Self {
        Self {
            state,
            gateway,
            diagnostics: Arc::new(DiagnosticLog::new()),
            in_flight: Mutex::new(HashMap::new()),
            serialize_sends: false,
        }
    }

    /// Allow at most one unresolved send per session
    pub fn with_serialized_sends(mut self, serialize: bool) -> Self {
        self.serialize_sends = serialize;
        self
    }

    pub fn state(&self) -> &Arc<ChatState> {
        &self.state
    }

    pub fn diagnostics(&self) -> &Arc<DiagnosticLog> {
        &self.diagnostics
    }

    /// "New Chat": create a session and make it current
    pub fn create_session(&self) -> Result<Arc<Session>, ChatError> {
        let session = self.state.create_session();
        self.state.select(&session.id)?;
        info!("created {} ({})", session.id, session.title);
        Ok(session)
    }

    pub fn select_session(&self, session_id: &str) -> Result<(), ChatError> {
        self.state.select(session_id)?;
        debug!("selected {}", session_id);
        Ok(())
    }

    /// Validate `text` and append it as a user message to `session_id`.
    ///
    /// Rejections (empty text, unknown session, send already in flight)
    /// leave the store untouched.
    pub fn begin_send(&self, session_id: &str, text: &str) -> Result<PendingSend, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let mut in_flight = self.in_flight.lock();
        if self.serialize_sends && in_flight.get(session_id).copied().unwrap_or(0) > 0 {
            return Err(ChatError::SendInFlight {
                session_id: session_id.to_string(),
            });
        }

        self.state.append(session_id, MessageRole::User, text)?;
        *in_flight.entry(session_id.to_string()).or_insert(0) += 1;
        drop(in_flight);

        let request_id = self.state.ids().next_id(REQUEST_ID_PREFIX);
        debug!("{} issued for {}", request_id, session_id);

        Ok(PendingSend {
            request_id,
            session_id: session_id.to_string(),
            text: text.to_string(),
        })
    }

    /// Same as [`begin_send`](Self::begin_send) against the current selection
    pub fn begin_send_to_current(&self, text: &str) -> Result<PendingSend, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let session_id = self.state.current().ok_or(ChatError::NoSessionSelected)?;
        self.begin_send(&session_id, text)
    }

    /// Run the gateway call for `pending` and append the reply on success.
    ///
    /// Failures are logged and recorded in the diagnostic log; they never
    /// propagate.
    pub async fn complete_send(&self, pending: PendingSend) -> SendOutcome {
        let PendingSend {
            request_id,
            session_id,
            text,
            ..
        } = pending;

        let result = match self.gateway.query(&text).await {
            Ok(content) => self
                .state
                .append(&session_id, MessageRole::Bot, &content),
            Err(e) => Err(ChatError::Gateway(e)),
        };
        self.release(&session_id);

        match result {
            Ok(bot_message) => {
                debug!("{} answered for {}", request_id, session_id);
                SendOutcome::Replied {
                    session_id,
                    request_id,
                    bot_message,
                }
            }
            Err(error) => {
                self.diagnostics.record(&session_id, &request_id, &error);
                SendOutcome::Failed {
                    session_id,
                    request_id,
                    error,
                }
            }
        }
    }

    /// Full round trip against an explicit session
    pub async fn send_message(&self, session_id: &str, text: &str) -> Result<SendOutcome, ChatError> {
        let pending = self.begin_send(session_id, text)?;
        Ok(self.complete_send(pending).await)
    }

    /// Full round trip against the session selected at call time
    pub async fn send_to_current(&self, text: &str) -> Result<SendOutcome, ChatError> {
        let pending = self.begin_send_to_current(text)?;
        Ok(self.complete_send(pending).await)
    }

    /// Unresolved sends for one session
    pub fn pending_for(&self, session_id: &str) -> usize {
        self.in_flight.lock().get(session_id).copied().unwrap_or(0)
    }

    /// Unresolved sends across all sessions
    pub fn pending_total(&self) -> usize {
        self.in_flight.lock().values().sum()
    }

    fn release(&self, session_id: &str) {
        let mut in_flight = self.in_flight.lock();
        if let Some(count) = in_flight.get_mut(session_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                in_flight.remove(session_id);
            }
        }
    }
}

pub mod app;
pub mod cli;
pub mod constants;
pub mod diagnostics;
pub mod gateway;
pub mod runtime;
pub mod session;
pub mod tui;
pub mod utils;

pub use app::{load_config, AppState, Config};
pub use gateway::{HttpGateway, QueryGateway};
pub use runtime::{ConversationController, SendOutcome};
pub use session::{ChatState, Message, MessageRole, Session, SessionStore};
pub use utils::{ChatError, GatewayError};

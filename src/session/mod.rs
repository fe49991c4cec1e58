// Gateway module for sessions - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod ids;
mod selection;
mod state;
mod store;
mod types;

// Public re-exports - the ONLY way to access session functionality
pub use ids::IdGenerator;
pub use selection::Selection;
pub use state::{ChatState, ChatView};
pub use store::SessionStore;
pub use types::{Message, MessageRole, Session, User};

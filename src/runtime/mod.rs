/// Runtime module - Gateway
mod controller;
mod non_interactive;
mod orchestrator;

pub use controller::{ConversationController, PendingSend, SendOutcome};
pub use non_interactive::{ExecutionMetadata, NonInteractiveResult, NonInteractiveRunner};
pub use orchestrator::{resolve_config, Orchestrator};

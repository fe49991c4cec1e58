// Gateway module for diagnostics - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod log;
mod types;

// Public re-exports - the ONLY way to access diagnostics functionality
pub use log::DiagnosticLog;
pub use types::{Diagnostic, DiagnosticKind};

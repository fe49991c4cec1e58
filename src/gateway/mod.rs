// Gateway module for the query service - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod http;
mod traits;

// Public re-exports - the ONLY way to access query functionality
pub use http::{GraphSummary, HttpGateway};
pub use traits::QueryGateway;

#[cfg(test)]
pub use traits::MockQueryGateway;

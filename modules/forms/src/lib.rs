// === PUBLIC CONTRACT ===
// Only the contract module should be public for other modules to consume
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model};

// === INTERNAL MODULES ===
// These modules are internal implementation details, exposed for tests and
// for the application that wires the module together.
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;

pub use config::FormsConfig;
pub use domain::service::{Service, ServiceConfig};
pub use domain::state::FormState;
pub use gateways::local::FormsLocalClient;
pub use infra::{HttpSubmitter, TimedNavigator};

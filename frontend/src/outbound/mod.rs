//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **reqres**: reqwest-backed users service gateway
//! - **session**: access token read from durable local storage
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod reqres;
pub mod session;

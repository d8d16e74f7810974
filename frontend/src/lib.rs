//! Users console library modules.
//!
//! The crate follows a hexagonal layout: `domain` owns the record view state
//! and the ports it drives, `outbound` adapts those ports to the REST service
//! and local token storage, and `inbound` turns operator commands into
//! record manager calls.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::ConsoleSettings;

//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod session_guard;
mod users_gateway;

#[cfg(test)]
pub use session_guard::MockSessionGuard;
pub use session_guard::{FixtureSession, SessionGuard};
#[cfg(test)]
pub use users_gateway::MockUsersGateway;
pub use users_gateway::{FixtureUsersGateway, UsersGateway, UsersGatewayError, UsersPage};

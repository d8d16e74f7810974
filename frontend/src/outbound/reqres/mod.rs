//! Users service outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `UsersGateway`
//! port for services shaped like the public `reqres.in` users API.

mod dto;
mod http_gateway;

pub use http_gateway::{HttpGatewayBuildError, HttpGatewayIdentity, ReqwestUsersGateway};

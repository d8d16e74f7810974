//! Inbound adapters that translate operator input into record manager calls
//! while keeping terminal details at the edge.

pub mod console;

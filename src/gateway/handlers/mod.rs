//! HTTP handlers
//!
//! Thin adapters: parse primitives, call the service, serialize its reply.
//! No business rules live here.

pub mod health;
pub mod interest;
pub mod transfer;
pub mod users;
pub mod wallet;

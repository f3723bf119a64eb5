//! AgroNexo API server library.
//!
//! Exposes the building blocks (config, state, error handling, module
//! registry, routes) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod registry;
pub mod request;
pub mod response;
pub mod routes;
pub mod state;

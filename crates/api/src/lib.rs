//! Survey API server library.
//!
//! Exposes config, state, error handling, the session extractor and routes
//! so integration tests and the binary entrypoint share the same pieces.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;

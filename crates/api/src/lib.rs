//! Mentorhub API server library.
//!
//! Exposes config, state, error handling, the session facade and routes so
//! integration tests and the binary entrypoint can both use them.

pub mod auth;
pub mod config;
pub mod error;
pub mod facade;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod sweeper;

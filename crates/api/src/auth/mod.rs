//! Session tokens.
//!
//! Login is unauthenticated (email only); the access token is a signed
//! handle naming the session and the user it belongs to.

pub mod jwt;

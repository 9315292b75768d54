//! Request extractors for sessions and roles.
//!
//! - [`auth::AuthUser`] -- the live session behind a Bearer token.
//! - [`rbac::RequireMentor`] / [`rbac::RequireMentee`] -- the session's
//!   stored profile must have that role.

pub mod auth;
pub mod rbac;

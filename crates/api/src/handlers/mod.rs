//! Request handlers.
//!
//! Handlers stay thin: account and booking commands go through
//! [`crate::facade::SessionFacade`], reads go straight to the repositories.

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod mentors;
pub mod profile;
pub mod reminders;
pub mod suggestions;

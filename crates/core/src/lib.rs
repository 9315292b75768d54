//! Mentorhub domain core.
//!
//! Pure types and rules with no I/O: profiles, availability and booking,
//! the group-session/webinar catalog, the recommendation pipeline and its
//! suggester seam, the session state machine, and small formatting helpers.

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod catalog;
pub mod error;
pub mod profile;
pub mod recommendation;
pub mod reminder;
pub mod roles;
pub mod session;
pub mod types;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&Store` as the first argument.

pub mod booking_repo;
pub mod catalog_repo;
pub mod profile_repo;
pub mod session_repo;

pub use booking_repo::{BookingConfirmed, BookingRepo};
pub use catalog_repo::{CatalogRepo, CatalogTable};
pub use profile_repo::{MentorListParams, ProfileRepo};
pub use session_repo::{SessionRecord, SessionRepo};

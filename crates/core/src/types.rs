/// Identifiers are opaque strings: generated ids are UUID v4, seeded
/// records use short readable ids (e.g. `"slot1"`).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh random identifier.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}

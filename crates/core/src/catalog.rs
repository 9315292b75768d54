//! Group sessions and webinars hosted by mentors.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{new_id, EntityId};

/// A small-group session hosted by one mentor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GroupSession {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: EntityId,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "host_id must not be empty"))]
    pub host_id: EntityId,
    pub host_name: String,
    /// Free-text date as entered by the host (e.g. `"2030-03-12 18:00 UTC"`).
    #[validate(length(min = 1, message = "date must not be empty"))]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, message = "max_participants must be positive"))]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub participant_count: Option<u32>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// A broadcast-style webinar hosted by one mentor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Webinar {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: EntityId,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "host_id must not be empty"))]
    pub host_id: EntityId,
    pub host_name: String,
    #[validate(length(min = 1, message = "date must not be empty"))]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// Common view over catalog records for ownership checks and suggestions.
pub trait CatalogItem: Clone + Serialize + Validate + Send + Sync {
    /// Entity name used in errors and log lines.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
    fn host_id(&self) -> &str;
}

impl CatalogItem for GroupSession {
    const ENTITY: &'static str = "GroupSession";

    fn id(&self) -> &str {
        &self.id
    }

    fn host_id(&self) -> &str {
        &self.host_id
    }
}

impl CatalogItem for Webinar {
    const ENTITY: &'static str = "Webinar";

    fn id(&self) -> &str {
        &self.id
    }

    fn host_id(&self) -> &str {
        &self.host_id
    }
}

/// DTO for `POST /group-sessions`. Host fields come from the session.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupSession {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub max_participants: Option<u32>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl CreateGroupSession {
    pub fn into_record(self, host_id: &str, host_name: &str) -> GroupSession {
        GroupSession {
            id: new_id(),
            title: self.title,
            description: self.description,
            host_id: host_id.to_string(),
            host_name: host_name.to_string(),
            date: self.date,
            tags: self.tags,
            image_url: self.image_url,
            max_participants: self.max_participants,
            participant_count: Some(0),
            price: self.price,
            duration: self.duration,
        }
    }
}

/// DTO for `POST /webinars`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWebinar {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl CreateWebinar {
    pub fn into_record(self, host_id: &str, host_name: &str) -> Webinar {
        Webinar {
            id: new_id(),
            title: self.title,
            description: self.description,
            host_id: host_id.to_string(),
            host_name: host_name.to_string(),
            date: self.date,
            tags: self.tags,
            image_url: self.image_url,
            duration: self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, title: &str) -> GroupSession {
        GroupSession {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            host_id: "host".into(),
            host_name: "Host".into(),
            date: "2030-01-01".into(),
            tags: vec![],
            image_url: None,
            max_participants: Some(10),
            participant_count: Some(0),
            price: None,
            duration: None,
        }
    }

    #[test]
    fn well_formed_session_validates() {
        assert!(session("gs1", "Resume clinic").validate().is_ok());
    }

    #[test]
    fn empty_title_or_id_fails_validation() {
        assert!(session("gs1", "").validate().is_err());
        assert!(session("", "Resume clinic").validate().is_err());
    }

    #[test]
    fn zero_capacity_fails_validation() {
        let mut s = session("gs1", "Resume clinic");
        s.max_participants = Some(0);
        assert!(s.validate().is_err());
    }

    #[test]
    fn create_webinar_assigns_host_and_fresh_id() {
        let input = CreateWebinar {
            title: "Intro to ML".into(),
            description: "Basics".into(),
            date: "2030-02-02".into(),
            tags: vec!["ml".into()],
            image_url: None,
            duration: Some("60 min".into()),
        };
        let record = input.into_record("mentor-1", "Dr. Reed");
        assert_eq!(record.host_id, "mentor-1");
        assert_eq!(record.host_name, "Dr. Reed");
        assert!(!record.id.is_empty());
        assert_eq!(CatalogItem::id(&record), record.id);
    }
}

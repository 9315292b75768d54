//! Role model shared by profiles, session claims, and access extractors.

use serde::{Deserialize, Serialize};

pub const ROLE_MENTOR: &str = "mentor";
pub const ROLE_MENTEE: &str = "mentee";

/// The two roles a completed profile can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Mentor => ROLE_MENTOR,
            Role::Mentee => ROLE_MENTEE,
        }
    }

    /// Parse a role name. Returns `None` for anything but the two known roles.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            ROLE_MENTOR => Some(Role::Mentor),
            ROLE_MENTEE => Some(Role::Mentee),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a mentor offers guidance on, or what a mentee is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorshipFocus {
    Career,
    University,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_known_roles() {
        assert_eq!(Role::parse("mentor"), Some(Role::Mentor));
        assert_eq!(Role::parse("mentee"), Some(Role::Mentee));
        assert_eq!(Role::Mentor.to_string(), "mentor");
    }

    #[test]
    fn parse_rejects_unknown_roles() {
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Mentor"), None);
    }

    #[test]
    fn focus_serializes_lowercase() {
        let json = serde_json::to_string(&MentorshipFocus::University).unwrap();
        assert_eq!(json, "\"university\"");
    }
}

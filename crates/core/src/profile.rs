//! User profile model: a common base plus a role-specific tail.
//!
//! A profile starts [`RoleDetails::Incomplete`] on first login and becomes
//! exactly one of [`RoleDetails::Mentor`] or [`RoleDetails::Mentee`] once the
//! user completes it. Role-specific fields live only inside the matching
//! variant, so a mentee can never carry mentor data and vice versa.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::availability::AvailabilitySlot;
use crate::error::CoreError;
use crate::roles::{MentorshipFocus, Role};
use crate::types::{new_id, EntityId};

// ---------------------------------------------------------------------------
// Entity types
// ---------------------------------------------------------------------------

/// Fields shared by every profile regardless of role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseProfile {
    pub id: EntityId,
    /// Lookup key in the profile store.
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// One entry in a mentor's education or employment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ExperienceItem {
    /// University or company name.
    #[validate(length(min = 1, message = "institution must not be empty"))]
    pub institution: String,
    /// Degree or job title.
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub start_date: String,
    /// `None` means ongoing.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExperienceItem {
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorDetails {
    pub expertise: Vec<String>,
    pub education: Vec<ExperienceItem>,
    pub employment: Vec<ExperienceItem>,
    /// Owned exclusively by this mentor. Mutated only through the booking
    /// ledger (`confirm` / `replace availability`), never through a patch.
    pub availability: Vec<AvailabilitySlot>,
    pub years_of_experience: u32,
    pub mentorship_focus: Vec<MentorshipFocus>,
    pub target_degree_levels: Vec<String>,
    pub guided_universities: Vec<String>,
    pub application_expertise: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenteeDetails {
    pub learning_goals: Option<String>,
    pub desired_universities: Vec<String>,
    pub desired_job_roles: Vec<String>,
    pub desired_companies: Vec<String>,
    pub seeking_mentorship_for: Vec<MentorshipFocus>,
    pub current_education_level: Option<String>,
    pub target_degree_level: Option<String>,
    pub target_fields_of_study: Vec<String>,
}

/// Role-specific part of a profile, tagged by `role` on the wire.
///
/// An incomplete profile serializes as `"role": "unset"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleDetails {
    #[serde(rename = "unset")]
    Incomplete,
    Mentor(MentorDetails),
    Mentee(MenteeDetails),
}

impl RoleDetails {
    /// Fresh defaults for a role: empty lists, zero years of experience.
    pub fn defaults_for(role: Role) -> Self {
        match role {
            Role::Mentor => RoleDetails::Mentor(MentorDetails::default()),
            Role::Mentee => RoleDetails::Mentee(MenteeDetails::default()),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            RoleDetails::Incomplete => None,
            RoleDetails::Mentor(_) => Some(Role::Mentor),
            RoleDetails::Mentee(_) => Some(Role::Mentee),
        }
    }
}

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub base: BaseProfile,
    #[serde(flatten)]
    pub details: RoleDetails,
}

impl UserProfile {
    /// Create the bare record for an email the store has never seen.
    ///
    /// The display name defaults to the local part of the email.
    pub fn new_for_email(email: &str, role: Option<Role>) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            base: BaseProfile {
                id: new_id(),
                email: email.to_string(),
                name,
                bio: None,
                profile_image_url: None,
                interests: Vec::new(),
            },
            details: role.map_or(RoleDetails::Incomplete, RoleDetails::defaults_for),
        }
    }

    pub fn id(&self) -> &str {
        &self.base.id
    }

    pub fn email(&self) -> &str {
        &self.base.email
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }

    pub fn role(&self) -> Option<Role> {
        self.details.role()
    }

    pub fn is_complete(&self) -> bool {
        self.role().is_some()
    }

    pub fn as_mentor(&self) -> Option<&MentorDetails> {
        match &self.details {
            RoleDetails::Mentor(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mentor_mut(&mut self) -> Option<&mut MentorDetails> {
        match &mut self.details {
            RoleDetails::Mentor(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mentee(&self) -> Option<&MenteeDetails> {
        match &self.details {
            RoleDetails::Mentee(m) => Some(m),
            _ => None,
        }
    }

    /// Move the profile to `role`.
    ///
    /// Keeping the current role is a no-op. Any other transition discards
    /// the previous role-specific fields and installs fresh defaults. A
    /// mentor holding booked slots cannot leave the mentor role: booked
    /// slots are the only record of those bookings.
    pub fn switch_role(&mut self, role: Role) -> Result<(), CoreError> {
        if self.role() == Some(role) {
            return Ok(());
        }
        if let Some(mentor) = self.as_mentor() {
            let booked = mentor.availability.iter().filter(|s| s.is_booked).count();
            if booked > 0 {
                return Err(CoreError::Conflict(format!(
                    "Mentor has {booked} booked slot(s) and cannot switch to {role}"
                )));
            }
        }
        self.details = RoleDetails::defaults_for(role);
        Ok(())
    }

    /// Complete (or re-complete) the profile as `role`, merging `patch` over
    /// the role defaults. Re-submitting the same role and data leaves every
    /// field unchanged.
    pub fn complete(&mut self, role: Role, patch: &ProfilePatch) -> Result<(), CoreError> {
        patch.check_for_role(role)?;
        self.switch_role(role)?;
        patch.apply_unchecked(self);
        Ok(())
    }

    /// Apply a partial update to a completed profile.
    pub fn update(&mut self, patch: &ProfilePatch) -> Result<(), CoreError> {
        let role = self.role().ok_or_else(|| {
            CoreError::Validation("Profile must be completed before it can be updated".into())
        })?;
        patch.check_for_role(role)?;
        patch.apply_unchecked(self);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Patch DTO
// ---------------------------------------------------------------------------

/// Partial profile data. `None` leaves the stored value untouched.
///
/// Mentor-only and mentee-only fields sit side by side here; submitting a
/// field that belongs to the other role is rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProfilePatch {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub profile_image_url: Option<String>,
    pub interests: Option<Vec<String>>,

    // Mentor-only.
    pub expertise: Option<Vec<String>>,
    pub education: Option<Vec<ExperienceItem>>,
    pub employment: Option<Vec<ExperienceItem>>,
    #[validate(range(max = 80))]
    pub years_of_experience: Option<u32>,
    pub mentorship_focus: Option<Vec<MentorshipFocus>>,
    pub target_degree_levels: Option<Vec<String>>,
    pub guided_universities: Option<Vec<String>>,
    pub application_expertise: Option<Vec<String>>,

    // Mentee-only.
    pub learning_goals: Option<String>,
    pub desired_universities: Option<Vec<String>>,
    pub desired_job_roles: Option<Vec<String>>,
    pub desired_companies: Option<Vec<String>>,
    pub seeking_mentorship_for: Option<Vec<MentorshipFocus>>,
    pub current_education_level: Option<String>,
    pub target_degree_level: Option<String>,
    pub target_fields_of_study: Option<Vec<String>>,
}

impl ProfilePatch {
    fn mentor_fields_present(&self) -> bool {
        self.expertise.is_some()
            || self.education.is_some()
            || self.employment.is_some()
            || self.years_of_experience.is_some()
            || self.mentorship_focus.is_some()
            || self.target_degree_levels.is_some()
            || self.guided_universities.is_some()
            || self.application_expertise.is_some()
    }

    fn mentee_fields_present(&self) -> bool {
        self.learning_goals.is_some()
            || self.desired_universities.is_some()
            || self.desired_job_roles.is_some()
            || self.desired_companies.is_some()
            || self.seeking_mentorship_for.is_some()
            || self.current_education_level.is_some()
            || self.target_degree_level.is_some()
            || self.target_fields_of_study.is_some()
    }

    /// Field-level validation plus the role-consistency rule.
    pub fn check_for_role(&self, role: Role) -> Result<(), CoreError> {
        self.validate()?;
        for item in self
            .education
            .iter()
            .flatten()
            .chain(self.employment.iter().flatten())
        {
            item.validate()?;
        }

        let foreign = match role {
            Role::Mentor => self.mentee_fields_present(),
            Role::Mentee => self.mentor_fields_present(),
        };
        if foreign {
            return Err(CoreError::Validation(format!(
                "Profile data contains fields that do not apply to role '{role}'"
            )));
        }
        Ok(())
    }

    /// Copy every present field onto `profile`. Callers run
    /// [`check_for_role`](Self::check_for_role) first.
    fn apply_unchecked(&self, profile: &mut UserProfile) {
        let base = &mut profile.base;
        set(&mut base.name, &self.name);
        set_opt(&mut base.bio, &self.bio);
        set_opt(&mut base.profile_image_url, &self.profile_image_url);
        set(&mut base.interests, &self.interests);

        match &mut profile.details {
            RoleDetails::Mentor(m) => {
                set(&mut m.expertise, &self.expertise);
                set(&mut m.education, &self.education);
                set(&mut m.employment, &self.employment);
                set(&mut m.years_of_experience, &self.years_of_experience);
                set(&mut m.mentorship_focus, &self.mentorship_focus);
                set(&mut m.target_degree_levels, &self.target_degree_levels);
                set(&mut m.guided_universities, &self.guided_universities);
                set(&mut m.application_expertise, &self.application_expertise);
            }
            RoleDetails::Mentee(m) => {
                set_opt(&mut m.learning_goals, &self.learning_goals);
                set(&mut m.desired_universities, &self.desired_universities);
                set(&mut m.desired_job_roles, &self.desired_job_roles);
                set(&mut m.desired_companies, &self.desired_companies);
                set(&mut m.seeking_mentorship_for, &self.seeking_mentorship_for);
                set_opt(&mut m.current_education_level, &self.current_education_level);
                set_opt(&mut m.target_degree_level, &self.target_degree_level);
                set(&mut m.target_fields_of_study, &self.target_fields_of_study);
            }
            RoleDetails::Incomplete => {}
        }
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        *target = value.clone();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

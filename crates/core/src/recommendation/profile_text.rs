//! Flatten profiles into the descriptive text the suggester reads.
//!
//! Mentor text doubles as a reconciliation key, so its format must be
//! deterministic for a given profile.

use crate::profile::UserProfile;
use crate::roles::MentorshipFocus;

fn join(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn focus_names(focus: &[MentorshipFocus]) -> Vec<String> {
    focus
        .iter()
        .map(|f| match f {
            MentorshipFocus::Career => "career".to_string(),
            MentorshipFocus::University => "university".to_string(),
        })
        .collect()
}

/// Describe a mentee for the suggester. `None` for non-mentee profiles.
///
/// University-aspiration fields are included only when the mentee seeks
/// university guidance; career fields only when they seek career guidance.
pub fn mentee_profile_text(profile: &UserProfile) -> Option<String> {
    let mentee = profile.as_mentee()?;
    let base = &profile.base;

    let mut lines = vec![
        format!("Name: {}", base.name),
        format!("Bio: {}", base.bio.as_deref().unwrap_or("not provided")),
        format!("Interests: {}", join(&base.interests)),
        format!(
            "Learning goals: {}",
            mentee.learning_goals.as_deref().unwrap_or("not provided")
        ),
        format!(
            "Seeking mentorship for: {}",
            join(&focus_names(&mentee.seeking_mentorship_for))
        ),
    ];

    if mentee
        .seeking_mentorship_for
        .contains(&MentorshipFocus::University)
    {
        lines.push(format!(
            "Current education level: {}",
            mentee
                .current_education_level
                .as_deref()
                .unwrap_or("not provided")
        ));
        lines.push(format!(
            "Target degree level: {}",
            mentee.target_degree_level.as_deref().unwrap_or("not provided")
        ));
        lines.push(format!(
            "Target fields of study: {}",
            join(&mentee.target_fields_of_study)
        ));
        lines.push(format!(
            "Desired universities: {}",
            join(&mentee.desired_universities)
        ));
    }

    if mentee
        .seeking_mentorship_for
        .contains(&MentorshipFocus::Career)
    {
        lines.push(format!(
            "Desired job roles: {}",
            join(&mentee.desired_job_roles)
        ));
        lines.push(format!(
            "Desired companies: {}",
            join(&mentee.desired_companies)
        ));
    }

    Some(lines.join("\n"))
}

/// Describe a mentor as a single comparable line. `None` for non-mentors.
pub fn mentor_profile_text(profile: &UserProfile) -> Option<String> {
    let mentor = profile.as_mentor()?;
    let base = &profile.base;

    let universities: Vec<String> = mentor
        .education
        .iter()
        .map(|e| e.institution.clone())
        .collect();
    let companies: Vec<String> = mentor
        .employment
        .iter()
        .map(|e| e.institution.clone())
        .collect();

    Some(format!(
        "Name: {}. Bio: {}. Expertise: {}. Universities: {}. Companies: {}. \
         Years of experience: {}. Mentorship focus: {}.",
        base.name,
        base.bio.as_deref().unwrap_or("not provided"),
        join(&mentor.expertise),
        join(&universities),
        join(&companies),
        mentor.years_of_experience,
        join(&focus_names(&mentor.mentorship_focus)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ExperienceItem, ProfilePatch};
    use crate::roles::Role;

    fn mentee(focus: Vec<MentorshipFocus>) -> UserProfile {
        let mut p = UserProfile::new_for_email("alex@example.com", None);
        p.complete(
            Role::Mentee,
            &ProfilePatch {
                name: Some("Alex".into()),
                interests: Some(vec!["robotics".into(), "ml".into()]),
                seeking_mentorship_for: Some(focus),
                desired_companies: Some(vec!["Acme".into()]),
                desired_universities: Some(vec!["MIT".into()]),
                ..Default::default()
            },
        )
        .unwrap();
        p
    }

    #[test]
    fn mentee_text_includes_core_fields() {
        let text = mentee_profile_text(&mentee(vec![])).unwrap();
        assert!(text.contains("Name: Alex"));
        assert!(text.contains("Interests: robotics, ml"));
        assert!(text.contains("Bio: not provided"));
    }

    #[test]
    fn mentee_text_is_conditional_on_focus() {
        let career = mentee_profile_text(&mentee(vec![MentorshipFocus::Career])).unwrap();
        assert!(career.contains("Desired companies: Acme"));
        assert!(!career.contains("Desired universities"));

        let uni = mentee_profile_text(&mentee(vec![MentorshipFocus::University])).unwrap();
        assert!(uni.contains("Desired universities: MIT"));
        assert!(!uni.contains("Desired companies"));
    }

    #[test]
    fn mentor_text_is_deterministic_and_lists_institutions() {
        let mut p = UserProfile::new_for_email("reed@example.com", None);
        p.complete(
            Role::Mentor,
            &ProfilePatch {
                name: Some("Dr. Reed".into()),
                expertise: Some(vec!["ML".into()]),
                education: Some(vec![ExperienceItem {
                    institution: "Stanford".into(),
                    title: "PhD".into(),
                    start_date: "2010".into(),
                    end_date: Some("2015".into()),
                    description: None,
                }]),
                ..Default::default()
            },
        )
        .unwrap();

        let a = mentor_profile_text(&p).unwrap();
        let b = mentor_profile_text(&p.clone()).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("Name: Dr. Reed."));
        assert!(a.contains("Universities: Stanford"));
        assert!(a.contains("Companies: none"));
    }

    #[test]
    fn wrong_role_yields_none() {
        let m = mentee(vec![]);
        assert!(mentor_profile_text(&m).is_none());
        let incomplete = UserProfile::new_for_email("x@example.com", None);
        assert!(mentee_profile_text(&incomplete).is_none());
    }
}

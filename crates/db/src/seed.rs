//! Demo data loaded at startup when `SEED_MOCK_DATA` is set.

use chrono::{Duration, DurationRound};
use mentorhub_core::availability::AvailabilitySlot;
use mentorhub_core::catalog::{CreateGroupSession, CreateWebinar};
use mentorhub_core::error::CoreError;
use mentorhub_core::profile::{ExperienceItem, ProfilePatch, UserProfile};
use mentorhub_core::roles::{MentorshipFocus, Role};
use mentorhub_core::types::Timestamp;

use crate::repositories::{CatalogRepo, ProfileRepo};
use crate::store::Store;

pub const DEMO_MENTOR_EMAIL: &str = "mentor@example.com";
pub const DEMO_MENTEE_EMAIL: &str = "mentee@example.com";

/// Counts of what was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub mentors: usize,
    pub mentees: usize,
    pub group_sessions: usize,
    pub webinars: usize,
}

struct DemoMentor {
    email: &'static str,
    name: &'static str,
    bio: &'static str,
    expertise: &'static [&'static str],
    education: &'static [(&'static str, &'static str, &'static str, Option<&'static str>)],
    employment: &'static [(&'static str, &'static str, &'static str, Option<&'static str>)],
    years: u32,
    focus: &'static [MentorshipFocus],
    universities: &'static [&'static str],
    /// (slot id, days from now, hour UTC)
    slots: &'static [(&'static str, i64, u32)],
}

const MENTORS: &[DemoMentor] = &[
    DemoMentor {
        email: DEMO_MENTOR_EMAIL,
        name: "Dr. Evelyn Reed",
        bio: "Machine learning researcher who enjoys helping students into research careers.",
        expertise: &["Machine Learning", "Data Science", "Research"],
        education: &[
            ("Stanford University", "PhD Computer Science", "2008", Some("2013")),
            ("MIT", "BSc Mathematics", "2004", Some("2008")),
        ],
        employment: &[("DeepMind", "Senior Research Scientist", "2016", None)],
        years: 12,
        focus: &[MentorshipFocus::Career, MentorshipFocus::University],
        universities: &["Stanford University", "MIT"],
        slots: &[("slot1", 1, 15), ("slot2", 2, 16), ("slot3", 4, 10)],
    },
    DemoMentor {
        email: "marcus.chen@example.com",
        name: "Marcus Chen",
        bio: "Product leader focused on early-career engineers moving into product roles.",
        expertise: &["Product Management", "Leadership", "Startups"],
        education: &[("University of California, Berkeley", "MBA", "2010", Some("2012"))],
        employment: &[
            ("Google", "Group Product Manager", "2015", None),
            ("Dropbox", "Product Manager", "2012", Some("2015")),
        ],
        years: 10,
        focus: &[MentorshipFocus::Career],
        universities: &[],
        slots: &[("slot1", 1, 18), ("slot2", 3, 17)],
    },
    DemoMentor {
        email: "aisha.patel@example.com",
        name: "Aisha Patel",
        bio: "Former admissions reader who guides applicants to graduate programs.",
        expertise: &["Graduate Admissions", "Essay Review", "Biology"],
        education: &[
            ("University of Oxford", "DPhil Biochemistry", "2011", Some("2015")),
            ("University of Toronto", "BSc Biology", "2007", Some("2011")),
        ],
        employment: &[("Oxford Admissions Office", "Admissions Advisor", "2016", Some("2021"))],
        years: 8,
        focus: &[MentorshipFocus::University],
        universities: &["University of Oxford", "University of Cambridge"],
        slots: &[("slot1", 2, 9), ("slot2", 5, 13)],
    },
];

fn experience(items: &[(&str, &str, &str, Option<&str>)]) -> Vec<ExperienceItem> {
    items
        .iter()
        .map(|(institution, title, start, end)| ExperienceItem {
            institution: institution.to_string(),
            title: title.to_string(),
            start_date: start.to_string(),
            end_date: end.map(str::to_string),
            description: None,
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mentor_profile(demo: &DemoMentor, now: Timestamp) -> Result<UserProfile, CoreError> {
    let mut profile = UserProfile::new_for_email(demo.email, None);
    profile.complete(
        Role::Mentor,
        &ProfilePatch {
            name: Some(demo.name.into()),
            bio: Some(demo.bio.into()),
            expertise: Some(strings(demo.expertise)),
            education: Some(experience(demo.education)),
            employment: Some(experience(demo.employment)),
            years_of_experience: Some(demo.years),
            mentorship_focus: Some(demo.focus.to_vec()),
            guided_universities: Some(strings(demo.universities)),
            ..Default::default()
        },
    )?;

    let midnight = now
        .duration_trunc(Duration::days(1))
        .map_err(|e| CoreError::Internal(format!("Failed to truncate seed time: {e}")))?;
    let slots = demo
        .slots
        .iter()
        .map(|(id, days, hour)| {
            let start = midnight + Duration::days(*days) + Duration::hours(i64::from(*hour));
            AvailabilitySlot::open(*id, start, start + Duration::hours(1))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(mentor) = profile.as_mentor_mut() {
        mentor.availability = slots;
    }
    Ok(profile)
}

fn mentee_profile() -> Result<UserProfile, CoreError> {
    let mut profile = UserProfile::new_for_email(DEMO_MENTEE_EMAIL, None);
    profile.complete(
        Role::Mentee,
        &ProfilePatch {
            name: Some("Alex Johnson".into()),
            bio: Some("Final-year computer science student.".into()),
            interests: Some(strings(&["Machine Learning", "Robotics"])),
            learning_goals: Some("Get into a strong ML master's program and land a research internship.".into()),
            seeking_mentorship_for: Some(vec![MentorshipFocus::University, MentorshipFocus::Career]),
            current_education_level: Some("Undergraduate".into()),
            target_degree_level: Some("Master's".into()),
            target_fields_of_study: Some(strings(&["Computer Science"])),
            desired_universities: Some(strings(&["Stanford University", "ETH Zurich"])),
            desired_job_roles: Some(strings(&["Research Engineer"])),
            desired_companies: Some(strings(&["DeepMind", "OpenAI"])),
            ..Default::default()
        },
    )?;
    Ok(profile)
}

/// Load the demo marketplace into `store`.
///
/// Slots are placed on whole hours in the days following `now`.
pub async fn seed_mock_data(store: &Store, now: Timestamp) -> Result<SeedSummary, CoreError> {
    let mut hosts = Vec::new();
    for demo in MENTORS {
        let profile = ProfileRepo::upsert(store, mentor_profile(demo, now)?).await;
        hosts.push((profile.id().to_string(), profile.name().to_string()));
    }
    ProfileRepo::upsert(store, mentee_profile()?).await;

    let sessions = [
        ("Cracking the ML Research Interview", "Mock interviews and feedback for research roles.", 0, &["Machine Learning", "Career"][..], Some(8), Some(25.0)),
        ("Writing a Statement of Purpose", "Workshop on structuring graduate application essays.", 2, &["Admissions", "University"][..], Some(12), None),
        ("From Engineer to PM", "Small-group discussion on moving into product.", 1, &["Product", "Career"][..], Some(6), Some(15.0)),
    ];
    for (title, description, host, tags, max, price) in sessions {
        let (host_id, host_name) = &hosts[host];
        let record = CreateGroupSession {
            title: title.into(),
            description: description.into(),
            date: (now + Duration::days(7)).format("%Y-%m-%d 18:00 UTC").to_string(),
            tags: strings(tags),
            image_url: None,
            max_participants: max,
            price,
            duration: Some("90 min".into()),
        }
        .into_record(host_id, host_name);
        CatalogRepo::create(store, record).await?;
    }

    let webinars = [
        ("Intro to Large Language Models", "How modern language models are trained and used.", 0, &["Machine Learning"][..]),
        ("Scholarships and Funding for Grad School", "Finding and applying for funding.", 2, &["University", "Funding"][..]),
        ("Building a Product Portfolio", "What hiring managers look for.", 1, &["Product", "Career"][..]),
    ];
    for (title, description, host, tags) in webinars {
        let (host_id, host_name) = &hosts[host];
        let record = CreateWebinar {
            title: title.into(),
            description: description.into(),
            date: (now + Duration::days(10)).format("%Y-%m-%d 17:00 UTC").to_string(),
            tags: strings(tags),
            image_url: None,
            duration: Some("60 min".into()),
        }
        .into_record(host_id, host_name);
        CatalogRepo::create(store, record).await?;
    }

    let summary = SeedSummary {
        mentors: MENTORS.len(),
        mentees: 1,
        group_sessions: sessions.len(),
        webinars: webinars.len(),
    };
    tracing::info!(?summary, "Mock data seeded");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::repositories::{BookingRepo, MentorListParams};
    use mentorhub_core::booking::BookingPolicy;
    use mentorhub_core::catalog::{GroupSession, Webinar};

    #[tokio::test]
    async fn seeds_demo_marketplace() {
        let store = Store::new();
        let now = Utc::now();
        let summary = seed_mock_data(&store, now).await.unwrap();

        assert_eq!(summary.mentors, 3);
        assert_eq!(
            ProfileRepo::list_mentors(&store, &MentorListParams::default()).await.len(),
            3
        );
        assert_eq!(CatalogRepo::list::<GroupSession>(&store).await.len(), 3);
        assert_eq!(CatalogRepo::list::<Webinar>(&store).await.len(), 3);

        let mentor = ProfileRepo::find_by_email(&store, DEMO_MENTOR_EMAIL).await.unwrap();
        let slots = &mentor.as_mentor().unwrap().availability;
        assert!(slots.iter().any(|s| s.id == "slot1" && !s.is_booked));
        assert!(slots.iter().all(|s| s.start_time > now));
        assert_eq!(store.version(), 0);
    }

    #[tokio::test]
    async fn demo_mentee_can_book_demo_slot() {
        let store = Store::new();
        seed_mock_data(&store, Utc::now()).await.unwrap();
        let mentor = ProfileRepo::find_by_email(&store, DEMO_MENTOR_EMAIL).await.unwrap();
        let mentee = ProfileRepo::find_by_email(&store, DEMO_MENTEE_EMAIL).await.unwrap();

        let policy = BookingPolicy {
            reject_past_slots: true,
            reject_overlapping: true,
        };
        let done = BookingRepo::confirm(&store, mentor.id(), "slot1", mentee.id(), policy)
            .await
            .unwrap();
        assert_eq!(done.version, 1);
        assert_eq!(done.booking.title, "Mentorship session: Dr. Evelyn Reed & Alex Johnson");
    }
}

//! Calendar export: a Google Calendar "add event" deep link for a booking.

use crate::types::Timestamp;

const GOOGLE_CALENDAR_RENDER_URL: &str = "https://calendar.google.com/calendar/render";

/// Compact UTC format used by the `dates` parameter.
fn calendar_stamp(ts: Timestamp) -> String {
    ts.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Build a link that opens a pre-filled calendar event.
pub fn google_calendar_link(
    title: &str,
    start: Timestamp,
    end: Timestamp,
    mentor_name: &str,
    mentee_name: &str,
) -> String {
    let details = format!("One-on-one mentorship session between {mentor_name} and {mentee_name}.");
    format!(
        "{GOOGLE_CALENDAR_RENDER_URL}?action=TEMPLATE&text={}&dates={}/{}&details={}",
        urlencoding::encode(title),
        calendar_stamp(start),
        calendar_stamp(end),
        urlencoding::encode(&details),
    )
}

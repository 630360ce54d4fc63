//! # Entities
//! The three stored record types. Each one declares its `Draft` (what a
//! caller supplies at creation) and its `Patch` (the fields that may change
//! afterwards). A [`Donation`] is immutable once written: its patch type is
//! uninhabited, so updating one doesn't typecheck.

use claystore::{Record, RecordMeta};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Active,
    Completed,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CleanupEvent {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub description: String,
    pub address: String,
    /// Calendar date of the event, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub time: String,
    pub materials_needed: Vec<String>,
    pub donation_goal: f64,
    pub max_participants: u32,
    /// Only the donation settlement in [`crate::donations`] may touch this,
    /// and only by adding exactly the donated amount.
    pub donations_received: f64,
    /// Participant emails, insertion-ordered, no duplicates. Seeded with the
    /// organizer; join appends.
    pub participants: Vec<String>,
    pub organizer_photos: Vec<String>,
    pub status: EventStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub created_by: String,
}

pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub address: String,
    pub date: String,
    pub time: String,
    pub materials_needed: Vec<String>,
    pub donation_goal: f64,
    pub max_participants: u32,
    pub donations_received: f64,
    pub participants: Vec<String>,
    pub organizer_photos: Vec<String>,
    pub status: EventStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub created_by: String,
}

pub enum EventPatch {
    DonationsReceived(f64),
    Status(EventStatus),
    Participants(Vec<String>),
    OrganizerPhotos(Vec<String>),
}

impl Record for CleanupEvent {
    type Draft = EventDraft;
    type Patch = EventPatch;

    fn from_draft(meta: RecordMeta, draft: EventDraft) -> Self {
        CleanupEvent {
            meta,
            title: draft.title,
            description: draft.description,
            address: draft.address,
            date: draft.date,
            time: draft.time,
            materials_needed: draft.materials_needed,
            donation_goal: draft.donation_goal,
            max_participants: draft.max_participants,
            donations_received: draft.donations_received,
            participants: draft.participants,
            organizer_photos: draft.organizer_photos,
            status: draft.status,
            latitude: draft.latitude,
            longitude: draft.longitude,
            created_by: draft.created_by,
        }
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn apply_patch(&mut self, patch: EventPatch) {
        match patch {
            EventPatch::DonationsReceived(total) => self.donations_received = total,
            EventPatch::Status(status) => self.status = status,
            EventPatch::Participants(participants) => self.participants = participants,
            EventPatch::OrganizerPhotos(photos) => self.organizer_photos = photos,
        }
    }
}

impl CleanupEvent {
    /// Percentage of the donation goal reached, capped at 100. `None` when the
    /// event isn't fundraising (`donation_goal == 0`); such events stay out of
    /// the donation listings entirely.
    pub fn donation_progress(&self) -> Option<f64> {
        if self.donation_goal <= 0.0 {
            return None;
        }
        Some((self.donations_received / self.donation_goal * 100.0).min(100.0))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Donation {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub event_id: String,
    pub donor_email: String,
    pub donor_name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub struct DonationDraft {
    pub event_id: String,
    pub donor_email: String,
    pub donor_name: String,
    pub amount: f64,
    pub message: Option<String>,
}

/// Donations are immutable; there is nothing to patch.
pub enum DonationPatch {}

impl Record for Donation {
    type Draft = DonationDraft;
    type Patch = DonationPatch;

    fn from_draft(meta: RecordMeta, draft: DonationDraft) -> Self {
        Donation {
            meta,
            event_id: draft.event_id,
            donor_email: draft.donor_email,
            donor_name: draft.donor_name,
            amount: draft.amount,
            message: draft.message,
        }
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn apply_patch(&mut self, patch: DonationPatch) {
        match patch {}
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Participation {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub event_id: String,
    pub user_email: String,
    /// Calendar date the user joined, `YYYY-MM-DD`.
    pub joined_date: String,
    /// Filled in after the event; absent counts as zero in the profile stats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_contributed: Option<f64>,
}

pub struct ParticipationDraft {
    pub event_id: String,
    pub user_email: String,
    pub joined_date: String,
}

pub enum ParticipationPatch {
    HoursContributed(f64),
}

impl Record for Participation {
    type Draft = ParticipationDraft;
    type Patch = ParticipationPatch;

    fn from_draft(meta: RecordMeta, draft: ParticipationDraft) -> Self {
        Participation {
            meta,
            event_id: draft.event_id,
            user_email: draft.user_email,
            joined_date: draft.joined_date,
            hours_contributed: None,
        }
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn apply_patch(&mut self, patch: ParticipationPatch) {
        match patch {
            ParticipationPatch::HoursContributed(hours) => self.hours_contributed = Some(hours),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_with_goal(goal: f64, received: f64) -> CleanupEvent {
        CleanupEvent {
            meta: RecordMeta {
                id: "e1".to_string(),
                created_date: chrono::Utc::now(),
            },
            title: "Limpieza".to_string(),
            description: String::new(),
            address: "Calle 1".to_string(),
            date: "2026-09-01".to_string(),
            time: "09:00".to_string(),
            materials_needed: vec![],
            donation_goal: goal,
            max_participants: 50,
            donations_received: received,
            participants: vec![],
            organizer_photos: vec![],
            status: EventStatus::Upcoming,
            latitude: 0.0,
            longitude: 0.0,
            created_by: "org@example.com".to_string(),
        }
    }

    #[test]
    fn progress_is_capped_at_100() {
        assert_eq!(event_with_goal(50_000.0, 35_000.0).donation_progress(), Some(70.0));
        assert_eq!(event_with_goal(100.0, 250.0).donation_progress(), Some(100.0));
    }

    #[test]
    fn zero_goal_means_not_fundraising() {
        assert_eq!(event_with_goal(0.0, 0.0).donation_progress(), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(EventStatus::Upcoming).unwrap(),
            serde_json::json!("upcoming")
        );
    }

    #[test]
    fn event_json_keeps_the_flat_id_shape() {
        let value = serde_json::to_value(event_with_goal(0.0, 0.0)).unwrap();
        assert_eq!(value["id"], serde_json::json!("e1"));
        assert!(value.get("meta").is_none());
    }
}

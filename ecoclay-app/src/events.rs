//! # Events
//! Listing, creating, and joining cleanup events. Joining enforces the caps
//! the data layer can't: one participation per (event, user) and no joins past
//! `max_participants`. The event's `participants` list is kept in step with
//! the participation records; the organizer is seeded into it at creation
//! without a participation record of their own.

use serde_json::json;

use crate::EcoClay;
use crate::entities::{
    CleanupEvent, EventDraft, EventPatch, EventStatus, Participation, ParticipationDraft,
};
use crate::error::AppError;
use crate::geo;

pub const DEFAULT_MAX_PARTICIPANTS: u32 = 50;

/// What the create-event page collects. Everything the stored record needs
/// beyond this (coordinates, organizer, status, the zeroed ledger) is filled
/// in by [`EcoClay::create_event`].
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub address: String,
    pub date: String,
    pub time: String,
    pub materials_needed: Vec<String>,
    pub donation_goal: f64,
    pub max_participants: Option<u32>,
    pub organizer_photos: Vec<String>,
}

impl EcoClay {
    /// Every event, newest first.
    pub fn list_events(&self) -> Vec<CleanupEvent> {
        self.events.list(Some("-created_date"))
    }

    /// Upcoming events the signed-in user hasn't joined (all upcoming events
    /// when signed out), newest first.
    pub fn available_events(&self) -> Vec<CleanupEvent> {
        let me = self.me();
        let joined = self.joined_event_ids();
        self.list_events()
            .into_iter()
            .filter(|event| event.status == EventStatus::Upcoming)
            .filter(|event| !joined.contains(&event.meta.id))
            .filter(|event| {
                me.as_ref()
                    .is_none_or(|user| !event.participants.contains(&user.email))
            })
            .collect()
    }

    /// Events the signed-in user has joined, newest first. Empty when signed
    /// out.
    pub fn my_events(&self) -> Vec<CleanupEvent> {
        let joined = self.joined_event_ids();
        self.list_events()
            .into_iter()
            .filter(|event| joined.contains(&event.meta.id))
            .collect()
    }

    pub fn create_event(&self, form: EventForm) -> Result<CleanupEvent, AppError> {
        let user = self.require_user()?;
        let coordinates = geo::geocode_address(&form.address);

        let event = self.events.create(EventDraft {
            title: form.title,
            description: form.description,
            address: form.address,
            date: form.date,
            time: form.time,
            materials_needed: form.materials_needed,
            donation_goal: form.donation_goal.max(0.0),
            max_participants: form.max_participants.unwrap_or(DEFAULT_MAX_PARTICIPANTS),
            donations_received: 0.0,
            participants: vec![user.email.clone()],
            organizer_photos: form.organizer_photos,
            status: EventStatus::Upcoming,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            created_by: user.email,
        })?;
        Ok(event)
    }

    /// Joins the signed-in user to an upcoming event: one participation
    /// record, and the user's email appended to the event's participant list.
    /// Rejected when already joined (including the organizer), when the event
    /// is full, or when it is no longer upcoming.
    pub fn join_event(&self, event_id: &str) -> Result<Participation, AppError> {
        let user = self.require_user()?;
        let event = self
            .events
            .get(event_id)
            .ok_or_else(|| AppError::UnknownEvent(event_id.to_string()))?;

        if event.status != EventStatus::Upcoming {
            return Err(AppError::NotJoinable {
                event_id: event_id.to_string(),
            });
        }

        let existing = self.participations.filter(
            &[
                ("event_id", json!(event_id)),
                ("user_email", json!(user.email.clone())),
            ],
            None,
        );
        if !existing.is_empty() || event.participants.contains(&user.email) {
            return Err(AppError::AlreadyJoined {
                event_id: event_id.to_string(),
            });
        }

        if event.participants.len() as u32 >= event.max_participants {
            return Err(AppError::EventFull {
                event_id: event_id.to_string(),
                max_participants: event.max_participants,
            });
        }

        // Two collections change here; snapshot the first so a failure on the
        // second can put it back.
        let snapshot = self.store.snapshot(self.participations.name())?;

        let participation = self.participations.create(ParticipationDraft {
            event_id: event_id.to_string(),
            user_email: user.email.clone(),
            joined_date: chrono::Utc::now().date_naive().to_string(),
        })?;

        let mut participants = event.participants;
        participants.push(user.email);
        if let Err(source) = self
            .events
            .update(event_id, EventPatch::Participants(participants))
        {
            if let Err(e) = self
                .store
                .restore(self.participations.name(), snapshot.as_deref())
            {
                log::error!(
                    "could not roll back participation {}: {e}",
                    participation.meta.id
                );
            }
            return Err(source.into());
        }

        Ok(participation)
    }

    /// Appends uploaded photo URIs to an event's gallery.
    pub fn add_event_photos(
        &self,
        event_id: &str,
        uris: Vec<String>,
    ) -> Result<CleanupEvent, AppError> {
        self.require_user()?;
        let event = self
            .events
            .get(event_id)
            .ok_or_else(|| AppError::UnknownEvent(event_id.to_string()))?;

        let mut photos = event.organizer_photos;
        photos.extend(uris);
        let updated = self
            .events
            .update(event_id, EventPatch::OrganizerPhotos(photos))?;
        Ok(updated)
    }

    fn joined_event_ids(&self) -> Vec<String> {
        let Some(user) = self.me() else {
            return Vec::new();
        };
        self.participations
            .filter(&[("user_email", json!(user.email))], None)
            .into_iter()
            .map(|p| p.event_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use claystore::MemoryStorage;

    use crate::testutil::BlockedWrites;

    use super::*;

    fn app() -> EcoClay {
        EcoClay::new(Arc::new(MemoryStorage::new()))
    }

    fn form(title: &str) -> EventForm {
        EventForm {
            title: title.to_string(),
            description: "Limpieza del humedal".to_string(),
            address: "Calle 129 con Avenida Suba".to_string(),
            date: "2026-09-12".to_string(),
            time: "09:00".to_string(),
            materials_needed: vec!["guantes".to_string(), "bolsas".to_string()],
            donation_goal: 0.0,
            max_participants: None,
            organizer_photos: vec![],
        }
    }

    #[test]
    fn create_event_fills_in_the_rest_of_the_record() {
        let app = app();
        app.login("org@example.com").unwrap();

        let event = app.create_event(form("Jornada Suba")).unwrap();
        assert_eq!(event.created_by, "org@example.com");
        assert_eq!(event.participants, vec!["org@example.com"]);
        assert_eq!(event.max_participants, DEFAULT_MAX_PARTICIPANTS);
        assert_eq!(event.donations_received, 0.0);
        assert_eq!(event.status, EventStatus::Upcoming);
        // the stub geocoder stays near the city center
        assert!((event.latitude - 40.4168).abs() <= 0.05);
        assert!((event.longitude - -3.7038).abs() <= 0.05);
    }

    #[test]
    fn creating_an_event_requires_a_session() {
        let app = app();
        assert!(matches!(
            app.create_event(form("sin usuario")),
            Err(AppError::NotSignedIn)
        ));
    }

    #[test]
    fn joining_moves_an_event_from_available_to_mine() {
        let app = app();
        app.login("org@example.com").unwrap();
        let event = app.create_event(form("Jornada")).unwrap();

        app.login("ana@example.com").unwrap();
        assert_eq!(app.available_events().len(), 1);
        assert!(app.my_events().is_empty());

        app.join_event(&event.meta.id).unwrap();
        assert!(app.available_events().is_empty());
        assert_eq!(app.my_events().len(), 1);

        let stored = app.events().get(&event.meta.id).unwrap();
        assert_eq!(stored.participants, vec!["org@example.com", "ana@example.com"]);
    }

    #[test]
    fn joining_twice_is_rejected() {
        let app = app();
        app.login("org@example.com").unwrap();
        let event = app.create_event(form("Jornada")).unwrap();

        app.login("ana@example.com").unwrap();
        app.join_event(&event.meta.id).unwrap();
        assert!(matches!(
            app.join_event(&event.meta.id),
            Err(AppError::AlreadyJoined { .. })
        ));
        // still exactly one participation record for (event, ana)
        assert_eq!(app.participations().list(None).len(), 1);
    }

    #[test]
    fn the_organizer_counts_as_already_joined() {
        let app = app();
        app.login("org@example.com").unwrap();
        let event = app.create_event(form("Jornada")).unwrap();

        assert!(matches!(
            app.join_event(&event.meta.id),
            Err(AppError::AlreadyJoined { .. })
        ));
    }

    #[test]
    fn a_full_event_rejects_joins() {
        let app = app();
        app.login("org@example.com").unwrap();
        let mut full = form("Jornada pequeña");
        full.max_participants = Some(2);
        let event = app.create_event(full).unwrap();

        app.login("ana@example.com").unwrap();
        app.join_event(&event.meta.id).unwrap();

        app.login("luis@example.com").unwrap();
        assert!(matches!(
            app.join_event(&event.meta.id),
            Err(AppError::EventFull {
                max_participants: 2,
                ..
            })
        ));
    }

    #[test]
    fn only_upcoming_events_are_joinable() {
        let app = app();
        app.login("org@example.com").unwrap();
        let event = app.create_event(form("Jornada")).unwrap();
        app.events()
            .update(&event.meta.id, EventPatch::Status(EventStatus::Completed))
            .unwrap();

        app.login("ana@example.com").unwrap();
        assert!(matches!(
            app.join_event(&event.meta.id),
            Err(AppError::NotJoinable { .. })
        ));
        assert!(app.available_events().is_empty());
    }

    #[test]
    fn a_failed_participant_update_rolls_the_join_back() {
        let backend = Arc::new(BlockedWrites::new());
        let app = EcoClay::new(backend.clone());
        app.login("org@example.com").unwrap();
        let event = app.create_event(form("Jornada")).unwrap();

        app.login("ana@example.com").unwrap();
        backend.block_writes_to("events");
        assert!(matches!(
            app.join_event(&event.meta.id),
            Err(AppError::Store(_))
        ));
        // the participation write was undone
        assert!(app.participations().list(None).is_empty());

        // and the join succeeds once the backend recovers
        backend.unblock();
        app.join_event(&event.meta.id).unwrap();
        assert_eq!(app.participations().list(None).len(), 1);
        let stored = app.events().get(&event.meta.id).unwrap();
        assert_eq!(stored.participants, vec!["org@example.com", "ana@example.com"]);
    }

    #[test]
    fn photos_accumulate_on_the_event() {
        let app = app();
        app.login("org@example.com").unwrap();
        let mut with_photo = form("Jornada");
        with_photo.organizer_photos = vec!["file:///a.jpg".to_string()];
        let event = app.create_event(with_photo).unwrap();

        let updated = app
            .add_event_photos(&event.meta.id, vec!["file:///b.jpg".to_string()])
            .unwrap();
        assert_eq!(updated.organizer_photos, vec!["file:///a.jpg", "file:///b.jpg"]);
    }

    #[test]
    fn joining_a_missing_event_is_unknown() {
        let app = app();
        app.login("ana@example.com").unwrap();
        assert!(matches!(
            app.join_event("nope"),
            Err(AppError::UnknownEvent(_))
        ));
    }
}

//! # Profile
//! Per-user aggregates, recomputed on every call by scanning the collections
//! filtered by the session user's email. Nothing here is stored.

use serde_json::json;

use crate::EcoClay;
use crate::entities::Participation;
use crate::error::AppError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileStats {
    /// Events the user has joined (their participation count).
    pub events_joined: usize,
    /// Sum of logged hours; participations without hours count as zero.
    pub total_hours: f64,
    pub total_donated: f64,
    /// Events the user organized (`created_by`).
    pub events_created: usize,
}

impl EcoClay {
    pub fn profile_stats(&self) -> Result<ProfileStats, AppError> {
        let user = self.require_user()?;
        let email = json!(user.email);

        let participations = self.participations.filter(&[("user_email", email.clone())], None);
        let created = self.events.filter(&[("created_by", email.clone())], None);
        let donations = self.donations.filter(&[("donor_email", email)], None);

        Ok(ProfileStats {
            events_joined: participations.len(),
            total_hours: participations
                .iter()
                .map(|p| p.hours_contributed.unwrap_or(0.0))
                .sum(),
            total_donated: donations.iter().map(|d| d.amount).sum(),
            events_created: created.len(),
        })
    }

    /// The signed-in user's participations, newest first. Empty when signed
    /// out.
    pub fn my_participations(&self) -> Vec<Participation> {
        let Some(user) = self.me() else {
            return Vec::new();
        };
        self.participations
            .filter(&[("user_email", json!(user.email))], Some("-created_date"))
    }
}

//! # Donations
//! Settlement is the one multi-record operation in the app: write the donation,
//! then add exactly that amount to the event's received total. The two writes
//! run as a small saga: the donations payload is snapshotted first, and if the
//! event update fails the donation is rolled back, so the ledger and the event
//! total can't drift apart through this path. [`EcoClay::reconcile_event_totals`]
//! is the recovery pass for state that drifted anyway (an older writer, a
//! restored backup).

use serde_json::json;

use crate::EcoClay;
use crate::entities::{CleanupEvent, Donation, DonationDraft, EventPatch};
use crate::error::AppError;

impl EcoClay {
    /// Events that are fundraising (`donation_goal > 0`), newest first.
    pub fn fundraising_events(&self) -> Vec<CleanupEvent> {
        self.list_events()
            .into_iter()
            .filter(|event| event.donation_goal > 0.0)
            .collect()
    }

    /// The signed-in user's donations, newest first.
    pub fn my_donations(&self) -> Vec<Donation> {
        let Some(user) = self.me() else {
            return Vec::new();
        };
        self.donations
            .filter(&[("donor_email", json!(user.email))], Some("-created_date"))
    }

    /// Donates `amount` to the event: one donation record, and the event's
    /// `donations_received` increased by exactly `amount`.
    pub fn donate(
        &self,
        event_id: &str,
        amount: f64,
        message: Option<String>,
    ) -> Result<Donation, AppError> {
        let user = self.require_user()?;
        let event = self
            .events
            .get(event_id)
            .ok_or_else(|| AppError::UnknownEvent(event_id.to_string()))?;

        if event.donation_goal <= 0.0 {
            return Err(AppError::NotFundraising {
                event_id: event_id.to_string(),
            });
        }
        if amount <= 0.0 || amount.is_nan() {
            return Err(AppError::InvalidAmount(amount));
        }

        let donor_name = if user.full_name.is_empty() {
            user.email.clone()
        } else {
            user.full_name
        };

        let snapshot = self.store.snapshot(self.donations.name())?;

        let donation = self.donations.create(DonationDraft {
            event_id: event_id.to_string(),
            donor_email: user.email,
            donor_name,
            amount,
            message,
        })?;

        match self.events.update(
            event_id,
            EventPatch::DonationsReceived(event.donations_received + amount),
        ) {
            Ok(_) => Ok(donation),
            Err(source) => {
                if let Err(e) = self.store.restore(self.donations.name(), snapshot.as_deref()) {
                    log::error!("could not roll back donation {}: {e}", donation.meta.id);
                }
                Err(AppError::SettlementRolledBack { source })
            }
        }
    }

    /// Recomputes an event's received total from its donation records and
    /// repairs the event when they disagree. Returns the recomputed total.
    pub fn reconcile_event_totals(&self, event_id: &str) -> Result<f64, AppError> {
        let event = self
            .events
            .get(event_id)
            .ok_or_else(|| AppError::UnknownEvent(event_id.to_string()))?;

        let total: f64 = self
            .donations
            .filter(&[("event_id", json!(event_id))], None)
            .iter()
            .map(|donation| donation.amount)
            .sum();

        if total != event.donations_received {
            log::warn!(
                "event {event_id} total {} disagrees with its ledger {}, repairing",
                event.donations_received,
                total
            );
            self.events
                .update(event_id, EventPatch::DonationsReceived(total))?;
        }
        Ok(total)
    }
}

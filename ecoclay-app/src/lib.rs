//! The EcoClay core: users browse polluted zones of the city, organize and
//! join cleanup events, and donate toward per-event goals. Everything is
//! client-side: the "backend" is a [`claystore`] record store over whatever
//! key-value storage the host provides (localStorage in a browser, a directory
//! of JSON files natively, memory in tests).
//!
//! [`EcoClay`] is the entry point. It owns the store, the three domain
//! collections, and the session, and each page-level concern lives in its own
//! module as an `impl EcoClay` block: [`events`], [`donations`], [`profile`],
//! [`session`]. The map's zone catalog and the geocoding/upload collaborators
//! are plain modules; they don't touch the store.

use std::sync::Arc;

use claystore::{Collection, Session, Storage, Store};

pub mod donations;
pub mod entities;
pub mod error;
pub mod events;
pub mod geo;
pub mod profile;
pub mod session;
#[cfg(test)]
mod testutil;
#[cfg(not(target_arch = "wasm32"))]
pub mod uploads;
pub mod zones;

pub use error::AppError;

use crate::entities::{CleanupEvent, Donation, Participation};
use crate::session::User;

pub struct EcoClay {
    store: Store,
    events: Collection<CleanupEvent>,
    donations: Collection<Donation>,
    participations: Collection<Participation>,
    session: Session<User>,
}

impl EcoClay {
    pub const STORAGE_PREFIX: &'static str = "ecoclay";

    pub fn new(backend: Arc<dyn Storage>) -> Self {
        Self::with_prefix(backend, Self::STORAGE_PREFIX)
    }

    pub fn with_prefix(backend: Arc<dyn Storage>, prefix: &str) -> Self {
        let store = Store::new(backend, prefix);
        Self {
            events: store.collection("events"),
            donations: store.collection("donations"),
            participations: store.collection("participations"),
            session: store.session("user"),
            store,
        }
    }

    pub fn events(&self) -> &Collection<CleanupEvent> {
        &self.events
    }

    pub fn donations(&self) -> &Collection<Donation> {
        &self.donations
    }

    pub fn participations(&self) -> &Collection<Participation> {
        &self.participations
    }
}

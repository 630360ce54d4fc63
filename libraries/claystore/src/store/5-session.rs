//! # Session
//! A single-slot store for the one "current" record a client keeps outside of
//! any collection; for EcoClay that is the signed-in user. Same masking rules
//! as collections: loads never fail, saves and clears do.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::StorageError;

use super::collection::{Store, StoreError};

pub struct Session<T> {
    store: Store,
    slot: String,
    _value: std::marker::PhantomData<fn() -> T>,
}

impl Store {
    pub fn session<T: Serialize + DeserializeOwned>(&self, slot: impl Into<String>) -> Session<T> {
        Session {
            store: self.clone(),
            slot: slot.into(),
            _value: std::marker::PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Session<T> {
    pub fn load(&self) -> Option<T> {
        let raw = self.store.read_raw(&self.slot)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("session slot {} holds corrupt JSON, treating as empty: {e}", self.slot);
                None
            }
        }
    }

    pub fn save(&self, value: &T) -> Result<(), StoreError> {
        let payload = serde_json::to_string(value)?;
        self.store.write_raw(&self.slot, &payload)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove_raw(&self.slot)
    }
}

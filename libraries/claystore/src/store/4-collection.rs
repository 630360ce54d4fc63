//! # Store & Collection
//! A [`Store`] namespaces keys in a [`Storage`](crate::storage::Storage)
//! backend and hands out typed [`Collection`] handles. Every mutation is a
//! whole-collection read-modify-write with no locking; concurrent writers on
//! the same collection resolve as last-write-wins (see the crate docs for why
//! that is accepted).

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::storage::{Storage, StorageError};

use super::envelope::{decode_payload, encode_payload};
use super::order::sort_records;
use super::record::{Record, RecordMeta, fresh_record_id};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no record with id {id} in collection {collection}")]
    NotFound { collection: String, id: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not convert record to or from JSON: {0}")]
    Codec(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Storage>,
    prefix: String,
}

impl Store {
    pub fn new(backend: Arc<dyn Storage>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    pub fn collection<T: Record>(&self, name: impl Into<String>) -> Collection<T> {
        Collection {
            store: self.clone(),
            name: name.into(),
            _record: PhantomData,
        }
    }

    pub(crate) fn storage_key(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }

    /// Reads never fail: any backend error is logged and masked as absent.
    pub(crate) fn read_raw(&self, name: &str) -> Option<String> {
        match self.backend.get(&self.storage_key(name)) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("read of {name} failed, treating as empty: {e}");
                None
            }
        }
    }

    pub(crate) fn write_raw(&self, name: &str, payload: &str) -> Result<(), StorageError> {
        self.backend.set(&self.storage_key(name), payload)
    }

    pub(crate) fn remove_raw(&self, name: &str) -> Result<(), StorageError> {
        self.backend.remove(&self.storage_key(name))
    }

    /// Compensation hook for multi-collection operations: capture a
    /// collection's raw payload before a saga touches it, so a later step's
    /// failure can put it back with [`Store::restore`]. Unlike [`Store::read_raw`]
    /// this surfaces backend errors: a saga must not start from a snapshot it
    /// could not actually take.
    pub fn snapshot(&self, name: &str) -> Result<Option<String>, StorageError> {
        self.backend.get(&self.storage_key(name))
    }

    pub fn restore(&self, name: &str, snapshot: Option<&str>) -> Result<(), StorageError> {
        match snapshot {
            Some(payload) => self.write_raw(name, payload),
            None => self.remove_raw(name),
        }
    }
}

pub struct Collection<T> {
    store: Store,
    name: String,
    _record: PhantomData<fn() -> T>,
}

// Derived Clone would demand T: Clone needlessly.
impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            name: self.name.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every record in the collection, optionally sorted by a field name
    /// (leading `-` for descending). Never fails; corrupt or unreadable state
    /// is an empty list.
    pub fn list(&self, order: Option<&str>) -> Vec<T> {
        let mut records = self.raw_records();
        sort_records(&mut records, order);
        self.decode_all(records)
    }

    /// The subset of [`Collection::list`] whose fields strictly equal every
    /// key/value pair in `where_clause` (logical AND). An empty clause behaves
    /// like `list`.
    pub fn filter(&self, where_clause: &[(&str, Value)], order: Option<&str>) -> Vec<T> {
        let mut records = self.raw_records();
        records.retain(|record| {
            where_clause
                .iter()
                .all(|(field, expected)| record.get(*field) == Some(expected))
        });
        sort_records(&mut records, order);
        self.decode_all(records)
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.raw_records()
            .into_iter()
            .find(|record| record_id(record) == Some(id))
            .and_then(|record| self.decode_one(record))
    }

    /// Stamps a fresh id and creation timestamp, appends, persists, and
    /// returns the stored record.
    pub fn create(&self, draft: T::Draft) -> Result<T, StoreError> {
        let mut records = self.raw_records();

        let meta = RecordMeta {
            id: fresh_record_id(),
            created_date: chrono::Utc::now(),
        };
        let record = T::from_draft(meta, draft);

        records.push(serde_json::to_value(&record)?);
        self.persist(&records)?;
        Ok(record)
    }

    /// Applies a typed patch to the record with `id` and persists. Fails with
    /// [`StoreError::NotFound`] (leaving the collection untouched) when no
    /// such record exists.
    pub fn update(&self, id: &str, patch: T::Patch) -> Result<T, StoreError> {
        let mut records = self.raw_records();

        let Some(slot) = records.iter_mut().find(|r| record_id(r) == Some(id)) else {
            return Err(StoreError::NotFound {
                collection: self.name.clone(),
                id: id.to_string(),
            });
        };

        let mut record: T = serde_json::from_value(slot.clone())?;
        record.apply_patch(patch);
        *slot = serde_json::to_value(&record)?;

        self.persist(&records)?;
        Ok(record)
    }

    fn raw_records(&self) -> Vec<Value> {
        match self.store.read_raw(&self.name) {
            Some(raw) => decode_payload(&self.name, &raw),
            None => Vec::new(),
        }
    }

    fn persist(&self, records: &[Value]) -> Result<(), StoreError> {
        let payload = encode_payload(records)?;
        self.store.write_raw(&self.name, &payload)?;
        Ok(())
    }

    fn decode_all(&self, records: Vec<Value>) -> Vec<T> {
        records
            .into_iter()
            .filter_map(|record| self.decode_one(record))
            .collect()
    }

    fn decode_one(&self, record: Value) -> Option<T> {
        match serde_json::from_value(record) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!(
                    "skipping a record in {} that no longer matches its type: {e}",
                    self.name
                );
                None
            }
        }
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

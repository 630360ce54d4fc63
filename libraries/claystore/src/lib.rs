//! This is a library for a small, local-first record store. It was created for
//! EcoClay, so it doesn't include much that was not needed for that project.
//!
//! The model:
//! 1. Every collection is one JSON document in a key-value backend, stored under
//!    a namespaced key (`<prefix>_<collection>`).
//! 2. Reads pull the whole collection, writes push the whole collection back.
//!    There is no locking: two handles racing on the same collection resolve as
//!    last-write-wins. The intended deployment is one user, one tab, so this is
//!    deliberate. It is still a real bug surface if you run the store from
//!    multiple writers, which is why the tests pin the behavior down.
//! 3. Reads never fail. A missing key, corrupt payload, or a payload written by
//!    a future schema version is logged and treated as an empty collection.
//!    Writes always surface their errors.
//!
//! Records are typed: each record type declares a `Draft` (the fields a caller
//! supplies at creation) and a `Patch` (the fields that may change afterwards),
//! so there is no dynamic shallow-merge accepting arbitrary unknown fields.

#[cfg(target_arch = "wasm32")]
#[cfg(feature = "browser")]
pub mod browser;

pub mod storage;
pub mod store;

pub use storage::{MemoryStorage, Storage, StorageError};
pub use store::{Collection, Record, RecordMeta, Session, Store, StoreError};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;

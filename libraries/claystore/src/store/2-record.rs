//! # Record
//! Every stored record carries a [`RecordMeta`]: a globally-unique id and a
//! creation timestamp, both stamped by the store at creation. Record types
//! embed the meta with `#[serde(flatten)]` so the persisted JSON keeps the
//! flat `id` / `created_date` shape.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordMeta {
    pub id: String,
    pub created_date: chrono::DateTime<chrono::Utc>,
}

/// The seam between the generic store and a concrete record type.
///
/// `Draft` is what a caller supplies to `create`: everything except the meta.
/// `Patch` enumerates the fields that may change after creation; a record that
/// is immutable once created uses an uninhabited `Patch` so `update` can never
/// be called for it.
pub trait Record: Serialize + DeserializeOwned + Clone {
    type Draft;
    type Patch;

    fn from_draft(meta: RecordMeta, draft: Self::Draft) -> Self;
    fn meta(&self) -> &RecordMeta;
    fn apply_patch(&mut self, patch: Self::Patch);
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["self", "crypto"])]
    fn randomUUID() -> String;
}

pub fn fresh_record_id() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        randomUUID()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        uuid::Uuid::new_v4().to_string()
    }
}

//! Backend over the browser's `window.localStorage`, for wasm builds. The
//! browser reports quota and availability problems through exceptions on the
//! storage calls; they all surface as [`StorageError::Unavailable`].

use wasm_bindgen::JsValue;

use crate::storage::{Storage, StorageError};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // this is where a quota-exceeded exception lands
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{value:?}"))
}

// localStorage backed key-value store.
use gloo_storage::{LocalStorage, Storage};

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Raw string access to `window.localStorage`; values are stored as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }
}

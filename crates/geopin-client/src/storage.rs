//! LocalStorage access for the fallback pick slot.

use geopin_core::{PickStorage, StorageError};
use web_sys::Storage;

/// The page's `localStorage`, resolved on each access.
pub struct LocalPickStorage;

fn local_storage() -> Result<Storage, StorageError> {
    let window = web_sys::window().ok_or_else(|| StorageError("no window".to_string()))?;
    window
        .local_storage()
        .map_err(|err| StorageError(format!("{err:?}")))?
        .ok_or_else(|| StorageError("localStorage unavailable".to_string()))
}

impl PickStorage for LocalPickStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|err| StorageError(format!("{err:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(key)
            .map_err(|err| StorageError(format!("{err:?}")))
    }
}

//! Validation of pick results delivered by the map picker.
//!
//! Results arrive either as a window message or through a `localStorage` slot
//! the picker writes before navigating back to a same-tab opener. Both shapes
//! are `{"type": "admin_coord_pick", "lat": .., "lon": ..}` and go through
//! the same validation. A rejected payload never reaches the form; the
//! [`PickRejection`] only feeds diagnostics.

use serde_json::Value;
use tracing::debug;

use crate::coord::Coordinate;

/// Why a pick result was discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickRejection {
    #[error("message origin {origin:?} does not match page origin {expected:?}")]
    ForeignOrigin { origin: String, expected: String },
    #[error("payload type {found:?} is not {expected:?}")]
    WrongType {
        found: Option<String>,
        expected: String,
    },
    #[error("payload lat/lon are missing or not finite numbers")]
    InvalidCoordinate,
    #[error("stored payload is not valid JSON: {0}")]
    Malformed(String),
    #[error("pick storage unavailable: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct StorageError(pub String);

/// Key/value storage holding the fallback pick slot.
pub trait PickStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct ResultReceiver {
    message_type: String,
    storage_key: String,
}

impl ResultReceiver {
    pub fn new(message_type: impl Into<String>, storage_key: impl Into<String>) -> Self {
        Self {
            message_type: message_type.into(),
            storage_key: storage_key.into(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Check the type tag and coordinates of a payload.
    pub fn validate(&self, payload: &Value) -> Result<Coordinate, PickRejection> {
        let found = payload.get("type").and_then(Value::as_str);
        if found != Some(self.message_type.as_str()) {
            return Err(PickRejection::WrongType {
                found: found.map(str::to_string),
                expected: self.message_type.clone(),
            });
        }
        match (payload.get("lat"), payload.get("lon")) {
            (Some(lat), Some(lon)) => {
                Coordinate::from_values(lat, lon).ok_or(PickRejection::InvalidCoordinate)
            }
            _ => Err(PickRejection::InvalidCoordinate),
        }
    }

    /// Validate a window message. Only messages from `page_origin` are considered.
    pub fn accept_message(
        &self,
        page_origin: &str,
        origin: &str,
        data: &Value,
    ) -> Result<Coordinate, PickRejection> {
        if origin != page_origin {
            return Err(PickRejection::ForeignOrigin {
                origin: origin.to_string(),
                expected: page_origin.to_string(),
            });
        }
        self.validate(data)
    }

    /// Read and validate the fallback slot without consuming it.
    ///
    /// `Ok(None)` when the slot is empty. The caller clears the slot with
    /// [`clear_slot`](Self::clear_slot) once the point has been applied; an
    /// invalid payload is left where it is.
    pub fn read_slot<S: PickStorage>(&self, storage: &S) -> Result<Option<Coordinate>, PickRejection> {
        let raw = storage
            .read(&self.storage_key)
            .map_err(|err| PickRejection::Storage(err.0))?;
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Ok(None);
        };
        let payload: Value =
            serde_json::from_str(&raw).map_err(|err| PickRejection::Malformed(err.to_string()))?;
        self.validate(&payload).map(Some)
    }

    pub fn clear_slot<S: PickStorage>(&self, storage: &mut S) {
        if let Err(err) = storage.remove(&self.storage_key) {
            debug!(%err, key = %self.storage_key, "failed to clear pick slot");
        }
    }
}

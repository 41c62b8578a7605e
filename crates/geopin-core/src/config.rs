//! Resolver configuration.
//!
//! Every field has a default matching the store admin page, so an empty JSON
//! object (or no configuration at all) yields a working resolver.

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid resolver configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level configuration for [`CoordinateResolver`](crate::CoordinateResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub elements: ElementIds,
    /// Address-lookup endpoint, queried as `<endpoint>?q=<address>`.
    pub geocode_endpoint: String,
    pub picker: PickerConfig,
    /// `type` tag carried by pick results.
    pub pick_message_type: String,
    /// `localStorage` key of the fallback pick slot.
    pub storage_key: String,
    pub messages: Messages,
    /// `tracing-subscriber` filter directive used by the browser client.
    pub log_filter: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            geocode_endpoint: "/tools/geocode/".to_string(),
            picker: PickerConfig::default(),
            pick_message_type: "admin_coord_pick".to_string(),
            storage_key: "admin_coord_pick".to_string(),
            messages: Messages::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl ResolverConfig {
    /// Parse a (possibly partial) JSON configuration; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// DOM ids of the elements the resolver reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub latitude: String,
    pub longitude: String,
    pub address: String,
    /// Hidden provenance input, created on demand.
    pub source: String,
    /// `name` given to the provenance input when it is created.
    pub source_name: String,
    pub status: String,
    pub pick_button: String,
    pub geocode_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            latitude: "id_vi_do".to_string(),
            longitude: "id_kinh_do".to_string(),
            address: "id_dia_chi".to_string(),
            source: "id_coord_from_map".to_string(),
            source_name: "_coord_from_map".to_string(),
            status: "coord-source-status".to_string(),
            pick_button: "btn-pick-coord-main-map".to_string(),
            geocode_button: "btn-geocode-address-admin".to_string(),
        }
    }
}

/// Where and how the map picker is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Same-origin path of the map page.
    pub path: String,
    /// Value of the `pick_for` query parameter.
    pub pick_for: String,
    pub window_name: String,
    pub window_features: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            pick_for: "admin_cuahang".to_string(),
            window_name: "pickCoord".to_string(),
            window_features: "width=1280,height=860".to_string(),
        }
    }
}

/// User-facing texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub source_map: String,
    pub source_pending: String,
    /// Status shown after a geocode hit; `{point}` is replaced by `lat, lon`.
    pub pending_with_point: String,
    pub not_found: String,
    pub unavailable: String,
    pub empty_address: String,
    pub popup_blocked: String,
    pub locked_input_title: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            source_map: "coordinate source: map (high precision)".to_string(),
            source_pending: "approximate location found from address; current coordinate unchanged; \
                             you must click the map to confirm."
                .to_string(),
            pending_with_point: "approximate location found: {point}; current coordinate unchanged; \
                                 you must click the map to confirm."
                .to_string(),
            not_found: "No coordinate found for this address. Try a shorter address \
                        (drop the building or tower name) and search again."
                .to_string(),
            unavailable: "Cannot look up the address right now.".to_string(),
            empty_address: "Please enter an address first.".to_string(),
            popup_blocked: "The browser blocked the map popup. Press OK to open the map in this tab."
                .to_string(),
            locked_input_title: "Cannot be typed directly. Use the address lookup or the map."
                .to_string(),
        }
    }
}

impl Messages {
    pub fn pending_status(&self, point: Coordinate) -> String {
        self.pending_with_point.replace("{point}", &point.status_display())
    }
}

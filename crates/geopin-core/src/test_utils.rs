//! In-memory stand-ins for the browser used by unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::form::{Field, FormFields};
use crate::geocode::{GeocodeError, GeocodeTransport, HttpReply};
use crate::picker::WindowHost;
use crate::receiver::{PickStorage, StorageError};
use crate::resolver::TriggerControl;

pub(crate) const PAGE_ORIGIN: &str = "https://admin.example.vn";

/// Form with optional elements, mirroring what the store edit page renders.
#[derive(Debug, Default)]
pub(crate) struct MemoryForm {
    pub fields: HashMap<Field, String>,
    /// Fields that can be read but not written, like a `<textarea>`.
    pub read_only: HashSet<Field>,
    pub in_form: bool,
    pub has_status_element: bool,
    pub status: Option<String>,
    pub source_fields_created: usize,
    pub locked_title: Option<String>,
}

impl MemoryForm {
    pub fn edit_page() -> Self {
        let fields = [Field::Latitude, Field::Longitude, Field::Address]
            .into_iter()
            .map(|field| (field, String::new()))
            .collect();
        Self {
            fields,
            in_form: true,
            has_status_element: true,
            ..Self::default()
        }
    }

    pub fn without_coordinates() -> Self {
        Self {
            fields: HashMap::from([(Field::Address, String::new())]),
            in_form: true,
            has_status_element: true,
            ..Self::default()
        }
    }

    pub fn with_coordinates(mut self, lat: &str, lon: &str) -> Self {
        self.fields.insert(Field::Latitude, lat.to_string());
        self.fields.insert(Field::Longitude, lon.to_string());
        self
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.fields.insert(Field::Address, address.to_string());
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

impl FormFields for MemoryForm {
    fn has_anchor(&self) -> bool {
        self.in_form && self.fields.contains_key(&Field::Latitude)
    }

    fn value(&self, field: Field) -> Option<String> {
        self.fields.get(&field).cloned()
    }

    fn is_writable(&self, field: Field) -> bool {
        self.fields.contains_key(&field) && !self.read_only.contains(&field)
    }

    fn set_value(&mut self, field: Field, value: &str) -> bool {
        if self.read_only.contains(&field) {
            return false;
        }
        match self.fields.get_mut(&field) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    fn ensure_source_field(&mut self) -> bool {
        if self.fields.contains_key(&Field::Source) {
            return true;
        }
        if !self.has_anchor() {
            return false;
        }
        self.fields.insert(Field::Source, String::new());
        self.source_fields_created += 1;
        true
    }

    fn set_status(&mut self, text: &str) {
        if self.has_status_element {
            self.status = Some(text.to_string());
        }
    }

    fn lock_coordinate_inputs(&mut self, title: &str) {
        self.locked_title = Some(title.to_string());
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoryStorage {
    pub slots: HashMap<String, String>,
    pub unavailable: bool,
    pub removals: usize,
}

impl MemoryStorage {
    pub fn with_slot(key: &str, raw: &str) -> Self {
        Self {
            slots: HashMap::from([(key.to_string(), raw.to_string())]),
            ..Self::default()
        }
    }
}

impl PickStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError("localStorage disabled".to_string()));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError("localStorage disabled".to_string()));
        }
        self.removals += 1;
        self.slots.remove(key);
        Ok(())
    }
}

/// Records every window interaction.
#[derive(Debug)]
pub(crate) struct RecordingHost {
    pub origin: String,
    pub popups_allowed: bool,
    pub confirm_answer: bool,
    pub popups: Vec<(String, String, String)>,
    pub navigations: Vec<String>,
    pub prompts: Vec<String>,
    pub alerts: Vec<String>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            origin: PAGE_ORIGIN.to_string(),
            popups_allowed: true,
            confirm_answer: true,
            popups: Vec::new(),
            navigations: Vec::new(),
            prompts: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

impl RecordingHost {
    pub fn popup_blocked(confirm_answer: bool) -> Self {
        Self {
            popups_allowed: false,
            confirm_answer,
            ..Self::default()
        }
    }
}

impl WindowHost for RecordingHost {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn open_popup(&mut self, url: &str, name: &str, features: &str) -> bool {
        self.popups
            .push((url.to_string(), name.to_string(), features.to_string()));
        self.popups_allowed
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.confirm_answer
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[derive(Debug, Clone)]
pub(crate) enum FakeReply {
    Http(u16, String),
    Offline,
}

/// Answers every request with the same canned reply.
#[derive(Debug)]
pub(crate) struct FakeTransport {
    pub reply: FakeReply,
    pub requests: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub fn ok(body: &str) -> Self {
        Self::new(FakeReply::Http(200, body.to_string()))
    }

    pub fn new(reply: FakeReply) -> Self {
        Self {
            reply,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl GeocodeTransport for FakeTransport {
    async fn get_json(&self, url: &str) -> Result<HttpReply, GeocodeError> {
        self.requests.borrow_mut().push(url.to_string());
        match &self.reply {
            FakeReply::Http(status, body) => Ok(HttpReply {
                status: *status,
                body: body.clone(),
            }),
            FakeReply::Offline => Err(GeocodeError::Network("connection refused".to_string())),
        }
    }
}

/// Remembers every enable/disable transition.
#[derive(Debug, Default)]
pub(crate) struct RecordingControl {
    pub transitions: RefCell<Vec<bool>>,
}

impl RecordingControl {
    pub fn is_disabled(&self) -> bool {
        self.transitions.borrow().last().copied().unwrap_or(false)
    }
}

impl TriggerControl for RecordingControl {
    fn set_disabled(&self, disabled: bool) {
        self.transitions.borrow_mut().push(disabled);
    }
}

//! Provenance tracking for the coordinate fields.

use std::fmt;

use crate::config::Messages;
use crate::coord::Coordinate;
use crate::form::{Field, FormFields};

/// How the current coordinate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceTag {
    /// Nothing confirmed through this workflow.
    #[default]
    Unset,
    /// Picked on the map; authoritative.
    Map,
    /// An address was geocoded but not yet confirmed on the map.
    AddressPending,
}

impl SourceTag {
    /// Value stored in the hidden field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Map => "map",
            Self::AddressPending => "address_pending",
        }
    }

    /// Unknown values read back as [`SourceTag::Unset`].
    pub fn from_field(value: &str) -> Self {
        match value {
            "map" => Self::Map,
            "address_pending" => Self::AddressPending,
            _ => Self::Unset,
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes the provenance field and the matching status text.
#[derive(Debug, Clone)]
pub struct SourceTracker {
    messages: Messages,
}

impl SourceTracker {
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }

    /// Record `tag`, creating the hidden field if needed.
    ///
    /// Returns `false` without touching anything when the form has no
    /// latitude anchor.
    pub fn set_source<F: FormFields>(&self, form: &mut F, tag: SourceTag) -> bool {
        if !form.has_anchor() || !form.ensure_source_field() {
            return false;
        }
        form.set_value(Field::Source, tag.as_str());
        let status = match tag {
            SourceTag::Map => self.messages.source_map.as_str(),
            SourceTag::AddressPending => self.messages.source_pending.as_str(),
            SourceTag::Unset => "",
        };
        form.set_status(status);
        true
    }

    /// Record a geocoded point as pending. The coordinate fields are not touched;
    /// the point only appears in the status text.
    pub fn set_address_pending<F: FormFields>(&self, form: &mut F, point: Coordinate) -> bool {
        if !self.set_source(form, SourceTag::AddressPending) {
            return false;
        }
        form.set_status(&self.messages.pending_status(point));
        true
    }

    pub fn current<F: FormFields>(&self, form: &F) -> SourceTag {
        form.value(Field::Source)
            .map_or(SourceTag::Unset, |value| SourceTag::from_field(&value))
    }
}

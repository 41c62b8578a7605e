//! The coordinate resolver: source tracking, geocoding, picking and result
//! handling composed over one form.
//!
//! Coordinate fields are written in exactly one place, [`CoordinateResolver::apply_pick`],
//! which also tags the source as [`SourceTag::Map`]. Geocoding only ever
//! produces a pending note and a picker centred on the approximate point.

use std::cell::RefCell;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::coord::{Coordinate, parse_leading_float};
use crate::form::{Field, FormFields};
use crate::geocode::{GeocodeClient, GeocodeError, GeocodeTransport};
use crate::picker::{LaunchOutcome, PickerLauncher, WindowHost};
use crate::receiver::{PickRejection, PickStorage, ResultReceiver};
use crate::source::{SourceTag, SourceTracker};

/// Coordinate state for the page session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Nothing picked on the map yet.
    Unset,
    /// An address was geocoded; the fields still hold `confirmed` (if any).
    Pending {
        approximate: Coordinate,
        confirmed: Option<Coordinate>,
    },
    Confirmed(Coordinate),
}

impl Phase {
    /// Last point confirmed on the map this session.
    pub fn confirmed(&self) -> Option<Coordinate> {
        match *self {
            Self::Unset => None,
            Self::Pending { confirmed, .. } => confirmed,
            Self::Confirmed(point) => Some(point),
        }
    }
}

/// Result of one geocode click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeOutcome {
    EmptyAddress,
    NotFound,
    Unavailable,
    Pending {
        point: Coordinate,
        launch: LaunchOutcome,
    },
}

/// A control that is disabled while its geocode request is in flight.
pub trait TriggerControl {
    fn set_disabled(&self, disabled: bool);
}

/// Re-enables the control on every exit path.
struct EnableOnDrop<'a, C: TriggerControl>(&'a C);

impl<C: TriggerControl> Drop for EnableOnDrop<'_, C> {
    fn drop(&mut self) {
        self.0.set_disabled(false);
    }
}

pub struct CoordinateResolver<F, H> {
    form: F,
    host: H,
    config: ResolverConfig,
    tracker: SourceTracker,
    launcher: PickerLauncher,
    receiver: ResultReceiver,
    phase: Phase,
}

impl<F: FormFields, H: WindowHost> CoordinateResolver<F, H> {
    /// Attach to a form.
    ///
    /// Returns `None` on pages without both coordinate inputs inside a form.
    /// Otherwise the provenance field is created up front and the coordinate
    /// inputs are locked against typing.
    pub fn attach(config: ResolverConfig, mut form: F, host: H) -> Option<Self> {
        if !form.has_anchor() || form.value(Field::Longitude).is_none() {
            debug!("no coordinate inputs, resolver inactive");
            return None;
        }
        form.ensure_source_field();
        form.lock_coordinate_inputs(&config.messages.locked_input_title);

        let tracker = SourceTracker::new(config.messages.clone());
        let launcher =
            PickerLauncher::new(config.picker.clone(), config.messages.popup_blocked.clone());
        let receiver = ResultReceiver::new(&config.pick_message_type, &config.storage_key);
        Some(Self {
            form,
            host,
            config,
            tracker,
            launcher,
            receiver,
            phase: Phase::Unset,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn source(&self) -> SourceTag {
        self.tracker.current(&self.form)
    }

    /// Write a validated pick into the coordinate fields and tag it as `map`.
    ///
    /// Nothing is written unless both inputs and the provenance field can be
    /// updated together.
    pub fn apply_pick(&mut self, point: Coordinate) -> bool {
        let writable = self.form.is_writable(Field::Latitude)
            && self.form.is_writable(Field::Longitude);
        if !writable || !self.form.ensure_source_field() {
            return false;
        }
        let (lat, lon) = point.field_values();
        self.form.set_value(Field::Latitude, &lat);
        self.form.set_value(Field::Longitude, &lon);
        self.tracker.set_source(&mut self.form, SourceTag::Map);
        self.phase = Phase::Confirmed(point);
        info!(lat = point.lat, lon = point.lon, "coordinate confirmed on map");
        true
    }

    /// Whether a message from `origin` should be looked at at all.
    ///
    /// Lets the caller drop foreign messages before touching their data.
    pub fn accepts_origin(&self, origin: &str) -> bool {
        let expected = self.host.origin();
        if origin == expected {
            return true;
        }
        let rejection = PickRejection::ForeignOrigin {
            origin: origin.to_string(),
            expected,
        };
        debug!(%rejection, "window message discarded");
        false
    }

    /// Handle a window message. Returns whether it was applied.
    pub fn handle_message(&mut self, origin: &str, data: &Value) -> bool {
        let page_origin = self.host.origin();
        match self.receiver.accept_message(&page_origin, origin, data) {
            Ok(point) => self.apply_pick(point),
            Err(rejection) => {
                debug!(%rejection, "window message discarded");
                false
            }
        }
    }

    /// Handle window focus by consuming the fallback pick slot, if filled.
    pub fn handle_focus<S: PickStorage>(&mut self, storage: &mut S) -> bool {
        match self.receiver.read_slot(storage) {
            Ok(Some(point)) => {
                let applied = self.apply_pick(point);
                self.receiver.clear_slot(storage);
                applied
            }
            Ok(None) => false,
            Err(rejection) => {
                debug!(%rejection, "stored pick discarded");
                false
            }
        }
    }

    pub fn open_picker(&mut self, center: Option<(f64, f64)>) -> LaunchOutcome {
        self.launcher.open(&mut self.host, center)
    }

    /// Open the picker centred on whatever the coordinate inputs hold now.
    pub fn open_picker_at_current(&mut self) -> LaunchOutcome {
        let read = |field| {
            self.form
                .value(field)
                .as_deref()
                .and_then(parse_leading_float)
        };
        let center = read(Field::Latitude).zip(read(Field::Longitude));
        self.open_picker(center)
    }

    /// Trimmed address to geocode. Alerts the operator when it is empty.
    pub fn address_query(&mut self) -> Option<String> {
        let query = self
            .form
            .value(Field::Address)
            .map(|address| address.trim().to_string())
            .unwrap_or_default();
        if query.is_empty() {
            self.host.alert(&self.config.messages.empty_address);
            return None;
        }
        Some(query)
    }

    /// Act on a finished geocode request.
    ///
    /// A hit becomes a pending note and opens the picker there; the coordinate
    /// fields are left alone.
    pub fn complete_geocode(
        &mut self,
        result: Result<Option<Coordinate>, GeocodeError>,
    ) -> GeocodeOutcome {
        match result {
            Ok(Some(point)) => {
                self.tracker.set_address_pending(&mut self.form, point);
                self.phase = Phase::Pending {
                    approximate: point,
                    confirmed: self.phase.confirmed(),
                };
                let launch = self.open_picker(Some((point.lat, point.lon)));
                GeocodeOutcome::Pending { point, launch }
            }
            Ok(None) => {
                info!("address not found by geocoder");
                self.host.alert(&self.config.messages.not_found);
                GeocodeOutcome::NotFound
            }
            Err(err) => {
                warn!(%err, "address lookup failed");
                self.host.alert(&self.config.messages.unavailable);
                GeocodeOutcome::Unavailable
            }
        }
    }
}

/// Run one geocode click: read the address, look it up with `control`
/// disabled, then hand the result to the resolver.
///
/// The resolver is not borrowed across the request, so message and focus
/// handlers stay usable while it is in flight.
pub async fn geocode_address<F, H, T, C>(
    resolver: &RefCell<CoordinateResolver<F, H>>,
    client: &GeocodeClient<T>,
    control: &C,
) -> GeocodeOutcome
where
    F: FormFields,
    H: WindowHost,
    T: GeocodeTransport,
    C: TriggerControl,
{
    let Some(query) = resolver.borrow_mut().address_query() else {
        return GeocodeOutcome::EmptyAddress;
    };
    control.set_disabled(true);
    let _enable = EnableOnDrop(control);
    let result = client.geocode(&query).await;
    resolver.borrow_mut().complete_geocode(result)
}

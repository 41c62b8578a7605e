//! geopin core library
//!
//! The coordinate-confirmation workflow for a store edit form, independent of
//! the browser. An operator may geocode an address to get an approximate point,
//! but only a position picked on the map is ever written into the coordinate
//! fields.
//!
//! DOM, window, storage and HTTP access are injected through the traits in
//! [`form`], [`picker`], [`receiver`] and [`geocode`]; `geopin-client` provides
//! the `web-sys` implementations.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod coord;
pub mod form;
pub mod geocode;
pub mod picker;
pub mod receiver;
pub mod resolver;
pub mod source;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{ConfigError, ElementIds, Messages, PickerConfig, ResolverConfig};
pub use coord::Coordinate;
pub use form::{Field, FormFields};
pub use geocode::{GeocodeClient, GeocodeError, GeocodeTransport, HttpReply};
pub use picker::{LaunchOutcome, PickerLauncher, WindowHost};
pub use receiver::{PickRejection, PickStorage, ResultReceiver, StorageError};
pub use resolver::{CoordinateResolver, GeocodeOutcome, Phase, TriggerControl, geocode_address};
pub use source::{SourceTag, SourceTracker};

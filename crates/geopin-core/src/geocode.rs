//! Address-lookup client.
//!
//! The lookup service answers `GET <endpoint>?q=<address>` with
//! `{"location": {"lat": .., "lon": ..}}` on a hit and `{}` otherwise. The
//! values may be numbers or numeric strings. The transport is injected so the
//! same interpretation runs against `fetch` in the browser and canned replies
//! in tests.

use std::future::Future;

use serde_json::Value;
use tracing::debug;

use crate::coord::{Coordinate, number_from_value_lenient};

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocode_failed: HTTP status {0}")]
    Status(u16),
    #[error("geocode_failed: {0}")]
    Network(String),
    #[error("geocode_failed: malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the HTTP request for [`GeocodeClient`].
pub trait GeocodeTransport {
    /// `GET url` with `Accept: application/json`.
    ///
    /// Only transport failures are errors; a non-2xx status is returned as a
    /// reply.
    fn get_json(&self, url: &str) -> impl Future<Output = Result<HttpReply, GeocodeError>>;
}

pub struct GeocodeClient<T> {
    transport: T,
    endpoint: String,
}

impl<T: GeocodeTransport> GeocodeClient<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn request_url(&self, query: &str) -> String {
        format!("{}?q={}", self.endpoint, urlencoding::encode(query))
    }

    /// Resolve `query` to an approximate point.
    ///
    /// `Ok(None)` means the service answered but found nothing.
    pub async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = self.request_url(query);
        debug!(%url, "geocoding address");
        let reply = self.transport.get_json(&url).await?;
        interpret_reply(&reply)
    }
}

/// Turn a lookup reply into a point.
///
/// A location whose values do not coerce to finite numbers counts as not found.
pub fn interpret_reply(reply: &HttpReply) -> Result<Option<Coordinate>, GeocodeError> {
    if !reply.is_success() {
        return Err(GeocodeError::Status(reply.status));
    }
    let payload: Value = serde_json::from_str(&reply.body)?;
    let Some(location) = payload.get("location").filter(|l| l.is_object()) else {
        return Ok(None);
    };
    let lat = location.get("lat").and_then(number_from_value_lenient);
    let lon = location.get("lon").and_then(number_from_value_lenient);
    Ok(lat.zip(lon).and_then(|(lat, lon)| Coordinate::new(lat, lon)))
}

//! `fetch` transport for the address lookup.

use geopin_core::{GeocodeError, GeocodeTransport, HttpReply};
use gloo::net::http::Request;

pub struct FetchTransport;

fn lookup_request(url: &str) -> Result<Request, GeocodeError> {
    Request::get(url)
        .header("Accept", "application/json")
        .build()
        .map_err(|e| GeocodeError::Network(e.to_string()))
}

impl GeocodeTransport for FetchTransport {
    async fn get_json(&self, url: &str) -> Result<HttpReply, GeocodeError> {
        let response = lookup_request(url)?
            .send()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let status = response.status();
        if !response.ok() {
            return Ok(HttpReply {
                status,
                body: String::new(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::Network(e.to_string()))?;
        Ok(HttpReply { status, body })
    }
}

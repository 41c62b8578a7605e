//! geopin client
//!
//! Attaches the coordinate resolver to the store admin edit form.
//!
//! This crate is WASM-only. Use `trunk build` or `cargo check --target wasm32-unknown-unknown`.

#[cfg(not(target_arch = "wasm32"))]
compile_error!(
    "geopin-client only supports wasm32 target. Use: cargo check -p geopin-client --target wasm32-unknown-unknown"
);

mod app;
mod dom;
mod host;
mod http;
mod storage;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();

    // Configuration and form elements are only queryable once the page is parsed.
    app::when_ready(|| {
        let loaded = app::load_config();
        init_tracing(loaded.as_ref().map_or("info", |config| config.log_filter.as_str()));

        let config = loaded.unwrap_or_else(|err| {
            tracing::warn!(%err, "using default resolver configuration");
            geopin_core::ResolverConfig::default()
        });
        app::start(config);
    });
}

fn init_tracing(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}

//! Page wiring: configuration, buttons and the two pick-result listeners.

use std::cell::RefCell;
use std::rc::Rc;

use geopin_core::{
    ConfigError, CoordinateResolver, GeocodeClient, ResolverConfig, geocode_address,
};
use gloo::events::EventListener;
use serde_json::{Map, Number, Value};
use tracing::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::MessageEvent;

use crate::dom::{ButtonControl, DomForm};
use crate::host::BrowserHost;
use crate::http::FetchTransport;
use crate::storage::LocalPickStorage;

/// Attribute holding optional JSON overrides for [`ResolverConfig`].
const CONFIG_ATTRIBUTE: &str = "data-geopin-config";

type Resolver = Rc<RefCell<CoordinateResolver<DomForm, BrowserHost>>>;

/// Run `f` once the document has been parsed.
pub fn when_ready(f: impl FnOnce() + 'static) {
    let document = gloo::utils::document();
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_| f()).forget();
    } else {
        f();
    }
}

/// Read configuration overrides from the first element carrying
/// `data-geopin-config`. No such element means defaults.
pub fn load_config() -> Result<ResolverConfig, ConfigError> {
    let selector = format!("[{CONFIG_ATTRIBUTE}]");
    let raw = gloo::utils::document()
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|element| element.get_attribute(CONFIG_ATTRIBUTE));
    match raw {
        Some(json) => ResolverConfig::from_json(&json),
        None => Ok(ResolverConfig::default()),
    }
}

/// Attach the resolver to the page. Pages without coordinate inputs are left alone.
pub fn start(config: ResolverConfig) {
    let endpoint = config.geocode_endpoint.clone();
    let form = DomForm::new(config.elements.clone());
    let Some(resolver) = CoordinateResolver::attach(config, form, BrowserHost::default()) else {
        return;
    };
    let resolver: Resolver = Rc::new(RefCell::new(resolver));
    let client = Rc::new(GeocodeClient::new(FetchTransport, endpoint));

    wire_pick_button(&resolver);
    wire_geocode_button(&resolver, &client);
    listen_for_messages(&resolver).forget();
    listen_for_focus(&resolver).forget();
    info!("coordinate resolver attached");
}

fn wire_pick_button(resolver: &Resolver) {
    let id = resolver.borrow().config().elements.pick_button.clone();
    let Some(button) = gloo::utils::document().get_element_by_id(&id) else {
        debug!(%id, "no pick button");
        return;
    };
    let resolver = resolver.clone();
    EventListener::new(&button, "click", move |_| {
        let launch = resolver.borrow_mut().open_picker_at_current();
        debug!(?launch, "pick button handled");
    })
    .forget();
}

fn wire_geocode_button(resolver: &Resolver, client: &Rc<GeocodeClient<FetchTransport>>) {
    let id = resolver.borrow().config().elements.geocode_button.clone();
    let Some(button) = gloo::utils::document().get_element_by_id(&id) else {
        debug!(%id, "no geocode button");
        return;
    };
    let control = Rc::new(ButtonControl::new(button.clone()));
    let resolver = resolver.clone();
    let client = client.clone();
    EventListener::new(&button, "click", move |_| {
        let resolver = resolver.clone();
        let client = client.clone();
        let control = control.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = geocode_address(&resolver, &client, control.as_ref()).await;
            debug!(?outcome, "geocode button handled");
        });
    })
    .forget();
}

/// Fields of a pick result. Anything else on the message is never read.
const PICK_FIELDS: [&str; 3] = ["type", "lat", "lon"];

/// Copy the pick fields out of message data.
///
/// Only strings and numbers are taken, so nested or cyclic objects on the
/// message are never walked.
fn pick_fields(data: &JsValue) -> Value {
    if !data.is_object() {
        return Value::Null;
    }
    let mut payload = Map::new();
    for key in PICK_FIELDS {
        let Ok(field) = js_sys::Reflect::get(data, &JsValue::from_str(key)) else {
            continue;
        };
        let value = if let Some(text) = field.as_string() {
            Value::String(text)
        } else if let Some(number) = field.as_f64() {
            Number::from_f64(number).map_or(Value::Null, Value::Number)
        } else {
            continue;
        };
        payload.insert(key.to_string(), value);
    }
    Value::Object(payload)
}

fn listen_for_messages(resolver: &Resolver) -> EventListener {
    let resolver = resolver.clone();
    EventListener::new(&gloo::utils::window(), "message", move |event| {
        let Some(event) = event.dyn_ref::<MessageEvent>() else {
            return;
        };
        let origin = event.origin();
        if !resolver.borrow().accepts_origin(&origin) {
            return;
        }
        let payload = pick_fields(&event.data());
        resolver.borrow_mut().handle_message(&origin, &payload);
    })
}

fn listen_for_focus(resolver: &Resolver) -> EventListener {
    let resolver = resolver.clone();
    EventListener::new(&gloo::utils::window(), "focus", move |_| {
        resolver.borrow_mut().handle_focus(&mut LocalPickStorage);
    })
}

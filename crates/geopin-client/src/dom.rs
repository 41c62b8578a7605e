//! DOM-backed form access.

use geopin_core::{ElementIds, Field, FormFields, TriggerControl};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlTextAreaElement};

/// The edit form, looked up by element id on every access so the resolver
/// sees whatever the admin page currently renders.
pub struct DomForm {
    document: Document,
    ids: ElementIds,
}

impl DomForm {
    pub fn new(ids: ElementIds) -> Self {
        Self::with_document(gloo::utils::document(), ids)
    }

    pub fn with_document(document: Document, ids: ElementIds) -> Self {
        Self { document, ids }
    }

    fn id(&self, field: Field) -> &str {
        match field {
            Field::Latitude => &self.ids.latitude,
            Field::Longitude => &self.ids.longitude,
            Field::Address => &self.ids.address,
            Field::Source => &self.ids.source,
        }
    }

    fn input(&self, field: Field) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id(self.id(field))?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }

    fn anchor_form(&self) -> Option<Element> {
        self.input(Field::Latitude)?.closest("form").ok().flatten()
    }
}

impl FormFields for DomForm {
    fn has_anchor(&self) -> bool {
        self.anchor_form().is_some()
    }

    fn value(&self, field: Field) -> Option<String> {
        let element = self.document.get_element_by_id(self.id(field))?;
        // The address may be rendered as a textarea.
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        element
            .dyn_ref::<HtmlTextAreaElement>()
            .map(HtmlTextAreaElement::value)
    }

    fn is_writable(&self, field: Field) -> bool {
        self.input(field).is_some()
    }

    fn set_value(&mut self, field: Field, value: &str) -> bool {
        match self.input(field) {
            Some(input) => {
                input.set_value(value);
                true
            }
            None => false,
        }
    }

    fn ensure_source_field(&mut self) -> bool {
        if self.input(Field::Source).is_some() {
            return true;
        }
        let Some(form) = self.anchor_form() else {
            return false;
        };
        let Some(input) = self
            .document
            .create_element("input")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        else {
            return false;
        };
        input.set_type("hidden");
        input.set_name(&self.ids.source_name);
        input.set_id(&self.ids.source);
        input.set_value("");
        form.append_child(&input).is_ok()
    }

    fn set_status(&mut self, text: &str) {
        if let Some(status) = self.document.get_element_by_id(&self.ids.status) {
            status.set_text_content(Some(text));
        }
    }

    fn lock_coordinate_inputs(&mut self, title: &str) {
        for field in [Field::Latitude, Field::Longitude] {
            if let Some(input) = self.input(field) {
                input.set_read_only(true);
                input.set_title(title);
            }
        }
    }
}

/// A button (or `<input type="button">`) disabled through its attribute.
pub struct ButtonControl {
    element: Element,
}

impl ButtonControl {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl TriggerControl for ButtonControl {
    fn set_disabled(&self, disabled: bool) {
        let _ = self
            .element
            .toggle_attribute_with_force("disabled", disabled);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    /// Render a fresh edit form with uniquely prefixed ids.
    pub(crate) fn render_form(prefix: &str, with_form: bool) -> DomForm {
        let document = gloo::utils::document();
        let container = document
            .create_element(if with_form { "form" } else { "div" })
            .unwrap();
        container.set_inner_html(&format!(
            r#"<input id="{prefix}-lat" value="1.5">
               <input id="{prefix}-lon" value="2.5">
               <textarea id="{prefix}-addr">12 Le Loi</textarea>
               <p id="{prefix}-status"></p>"#
        ));
        document.body().unwrap().append_child(&container).unwrap();

        let ids = ElementIds {
            latitude: format!("{prefix}-lat"),
            longitude: format!("{prefix}-lon"),
            address: format!("{prefix}-addr"),
            source: format!("{prefix}-source"),
            source_name: "_coord_from_map".to_string(),
            status: format!("{prefix}-status"),
            ..ElementIds::default()
        };
        DomForm::with_document(document, ids)
    }

    #[wasm_bindgen_test]
    fn test_reads_inputs_and_textarea() {
        let form = render_form("read", true);
        assert!(form.has_anchor());
        assert_eq!(form.value(Field::Latitude).as_deref(), Some("1.5"));
        assert_eq!(form.value(Field::Address).as_deref(), Some("12 Le Loi"));
        assert_eq!(form.value(Field::Source), None);
    }

    #[wasm_bindgen_test]
    fn test_textarea_is_readable_but_not_writable() {
        let mut form = render_form("textarea", true);
        assert!(form.is_writable(Field::Latitude));
        assert!(form.is_writable(Field::Longitude));
        assert!(!form.is_writable(Field::Address));
        assert!(!form.set_value(Field::Address, "elsewhere"));
        assert_eq!(form.value(Field::Address).as_deref(), Some("12 Le Loi"));
    }

    #[wasm_bindgen_test]
    fn test_source_field_created_once_inside_form() {
        let mut form = render_form("source", true);
        assert!(form.ensure_source_field());
        assert!(form.ensure_source_field());

        let created = gloo::utils::document()
            .query_selector_all("#source-source")
            .unwrap();
        assert_eq!(created.length(), 1);
        let input = form.input(Field::Source).unwrap();
        assert_eq!(input.type_(), "hidden");
        assert_eq!(input.name(), "_coord_from_map");
        assert!(input.closest("form").unwrap().is_some());
    }

    #[wasm_bindgen_test]
    fn test_no_anchor_outside_form() {
        let mut form = render_form("loose", false);
        assert!(!form.has_anchor());
        assert!(!form.ensure_source_field());
    }

    #[wasm_bindgen_test]
    fn test_lock_and_status() {
        let mut form = render_form("lock", true);
        form.lock_coordinate_inputs("read only");
        form.set_status("coordinate source: map");

        let lat = form.input(Field::Latitude).unwrap();
        assert!(lat.read_only());
        assert_eq!(lat.title(), "read only");
        let status = gloo::utils::document()
            .get_element_by_id("lock-status")
            .unwrap();
        assert_eq!(status.text_content().as_deref(), Some("coordinate source: map"));
    }

    #[wasm_bindgen_test]
    fn test_button_control_toggles_disabled() {
        let button = gloo::utils::document().create_element("button").unwrap();
        let control = ButtonControl::new(button.clone());
        control.set_disabled(true);
        assert!(button.has_attribute("disabled"));
        control.set_disabled(false);
        assert!(!button.has_attribute("disabled"));
    }
}

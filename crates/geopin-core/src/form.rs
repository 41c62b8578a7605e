//! Access to the edit-form fields the resolver reads and writes.

/// Form fields known to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Latitude,
    Longitude,
    /// Free-text address, read only.
    Address,
    /// Hidden provenance input holding a [`SourceTag`](crate::SourceTag).
    Source,
}

/// Accessor/mutator pair over the page's form state.
///
/// Implementations must make [`ensure_source_field`](Self::ensure_source_field)
/// idempotent: it looks the hidden input up and only creates it when absent.
pub trait FormFields {
    /// Whether the latitude input exists inside a form element.
    ///
    /// Without it the resolver is inactive and every operation is a no-op.
    fn has_anchor(&self) -> bool;

    /// Current value of `field`, or `None` if the element does not exist.
    fn value(&self, field: Field) -> Option<String>;

    /// Whether [`set_value`](Self::set_value) can write `field`.
    ///
    /// A field may be readable without being writable, e.g. an address
    /// rendered as a `<textarea>`.
    fn is_writable(&self, field: Field) -> bool;

    /// Returns `false` if the element does not exist or is not writable.
    fn set_value(&mut self, field: Field, value: &str) -> bool;

    /// Look up the hidden provenance input, appending it to the anchor's form
    /// when missing. Returns `false` when there is no form to append to.
    fn ensure_source_field(&mut self) -> bool;

    /// Replace the status text. Silently ignored without a status element.
    fn set_status(&mut self, text: &str);

    /// Make the coordinate inputs read-only for the operator.
    fn lock_coordinate_inputs(&mut self, title: &str);
}

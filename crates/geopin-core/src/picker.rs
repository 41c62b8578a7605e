//! Map-picker launcher.
//!
//! The picker is a separate same-origin page. It is opened in a named popup,
//! or in the current tab when popups are blocked and the operator agrees. The
//! opener does not track the window afterwards; a result arrives through
//! [`receiver`](crate::receiver) or not at all.

use std::fmt::Write;

use tracing::info;

use crate::config::PickerConfig;

/// Window operations needed by the resolver.
pub trait WindowHost {
    /// Origin of the current page, e.g. `https://admin.example.com`.
    fn origin(&self) -> String;

    /// Open `url` in the window named `name`. Returns `false` if the popup was
    /// blocked.
    fn open_popup(&mut self, url: &str, name: &str, features: &str) -> bool;

    /// Ask the operator a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Navigate the current tab.
    fn navigate(&mut self, url: &str);

    fn alert(&mut self, message: &str);
}

/// How the picker ended up being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Popup,
    /// Popup blocked; the current tab navigates to the picker.
    SameTab,
    /// Popup blocked and the operator declined the same-tab fallback.
    Declined,
}

/// Build the picker URL. Center parameters are added only when both are finite.
pub fn picker_url(origin: &str, config: &PickerConfig, center: Option<(f64, f64)>) -> String {
    let origin = origin.trim_end_matches('/');
    let separator = if config.path.starts_with('/') { "" } else { "/" };
    let mut url = format!(
        "{origin}{separator}{}?pick_for={}",
        config.path,
        urlencoding::encode(&config.pick_for)
    );
    if let Some((lat, lon)) = center.filter(|(lat, lon)| lat.is_finite() && lon.is_finite()) {
        let _ = write!(url, "&center_lat={lat}&center_lon={lon}");
    }
    url
}

#[derive(Debug, Clone)]
pub struct PickerLauncher {
    config: PickerConfig,
    blocked_prompt: String,
}

impl PickerLauncher {
    pub fn new(config: PickerConfig, blocked_prompt: impl Into<String>) -> Self {
        Self {
            config,
            blocked_prompt: blocked_prompt.into(),
        }
    }

    pub fn open<H: WindowHost>(&self, host: &mut H, center: Option<(f64, f64)>) -> LaunchOutcome {
        let url = picker_url(&host.origin(), &self.config, center);
        if host.open_popup(&url, &self.config.window_name, &self.config.window_features) {
            info!(%url, "map picker opened");
            return LaunchOutcome::Popup;
        }
        if host.confirm(&self.blocked_prompt) {
            info!(%url, "popup blocked, opening map picker in this tab");
            host.navigate(&url);
            LaunchOutcome::SameTab
        } else {
            info!("popup blocked and same-tab fallback declined");
            LaunchOutcome::Declined
        }
    }
}

//! Browser window operations.

use geopin_core::WindowHost;
use tracing::warn;
use web_sys::Window;

pub struct BrowserHost {
    window: Window,
}

impl Default for BrowserHost {
    fn default() -> Self {
        Self {
            window: gloo::utils::window(),
        }
    }
}

impl WindowHost for BrowserHost {
    fn origin(&self) -> String {
        self.window.location().origin().unwrap_or_default()
    }

    fn open_popup(&mut self, url: &str, name: &str, features: &str) -> bool {
        // Blocked popups surface as `Ok(None)`.
        matches!(
            self.window
                .open_with_url_and_target_and_features(url, name, features),
            Ok(Some(_))
        )
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn navigate(&mut self, url: &str) {
        if let Err(err) = self.window.location().set_href(url) {
            warn!(?err, %url, "navigation failed");
        }
    }

    fn alert(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

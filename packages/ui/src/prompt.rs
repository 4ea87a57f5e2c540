//! Blocking user prompts (confirm / alert), injectable so view state stays testable.

/// A way to ask the user a yes/no question or show a blocking message.
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Browser dialogs via `window.confirm` and `window.alert`.
///
/// Outside the browser there is no dialog: confirmations are declined and alerts
/// are only logged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    #[cfg(target_arch = "wasm32")]
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn confirm(&self, message: &str) -> bool {
        tracing::warn!("No dialog available, declining: {message}");
        false
    }

    #[cfg(target_arch = "wasm32")]
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn alert(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

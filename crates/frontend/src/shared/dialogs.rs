//! Blocking browser prompts.
//!
//! Workflows take a `Dialogs` implementation instead of calling
//! `window.confirm` directly so they can run against a scripted double.

pub trait Dialogs {
    /// Yes/no prompt. `false` when no answer can be obtained.
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}

/// `window.confirm` / `window.alert`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn confirm(&self, message: &str) -> bool {
        match web_sys::window() {
            Some(win) => win.confirm_with_message(message).unwrap_or(false),
            None => false,
        }
    }

    fn alert(&self, message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }
}

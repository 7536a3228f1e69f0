use crate::{AuthError, Result};

/// Open a URL in the user's default web browser
///
/// Convenience for [`ActivationPrompt::open_url`](crate::ActivationPrompt)
/// implementations that want the "View License" action to land in the
/// system browser.
///
/// # Errors
///
/// Returns an error if the browser cannot be launched
pub fn open_browser(url: &str) -> Result<()> {
    webbrowser::open(url)
        .map_err(|e| AuthError::BrowserLaunch(format!("failed to open browser: {}", e)))
}

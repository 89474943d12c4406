//! Session Workflow - login and logout
//!
//! Logout is the session-ended signal: every registered reset hook runs
//! first, then the session slice flips to logged-out.

use crate::core::{AppCore, IntentError, SessionEvent};
use bulletin_core::UserId;

/// Log in as a roster user.
pub fn login(app: &AppCore, user_id: UserId) -> Result<(), IntentError> {
    if app.users().get(&user_id).is_none() {
        return Err(IntentError::UnknownUser { user_id });
    }
    tracing::info!(%user_id, "logged in");
    app.apply(SessionEvent::LoggedIn { user_id }.into());
    Ok(())
}

/// End the session. Returns how many caches were reset.
pub fn logout(app: &AppCore) -> usize {
    let caches_reset = app.reset_hooks().fire();
    app.apply(SessionEvent::LoggedOut.into());
    tracing::info!(caches_reset, "logged out");
    caches_reset
}

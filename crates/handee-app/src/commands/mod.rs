//! Command handlers.
//!
//! Each sub-module groups related commands by domain.  Commands take the
//! shared [`AppState`](crate::state::AppState), return
//! [`AppResult`](crate::error::AppResult), publish an error notification
//! when they refuse, and leave the store untouched in that case.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod deals;
pub mod favorites;
pub mod listings;
pub mod messaging;
pub mod onboarding;

/// Names of the fields in `fields` whose value is blank after trimming.
pub(crate) fn blank_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use handee_store::User;

    use crate::config::AppConfig;
    use crate::state::AppState;

    pub fn state() -> AppState {
        AppState::open(AppConfig::ephemeral()).expect("in-memory state")
    }

    /// Register `email` and leave it signed in.
    pub fn sign_up(state: &AppState, email: &str) -> User {
        state.store.signup(email, "pw", email).expect("fresh email")
    }

    /// Switch the session to `user`.
    pub fn act_as(state: &AppState, user: &User) {
        state.store.set_current_user(Some(user));
    }
}

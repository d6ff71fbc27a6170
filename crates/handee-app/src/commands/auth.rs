use serde::Deserialize;
use tracing::info;

use handee_store::{User, UserPatch};

use crate::commands::blank_fields;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn login(state: &AppState, email: &str, password: &str) -> AppResult<User> {
    let missing = blank_fields(&[("email", email), ("password", password)]);
    if !missing.is_empty() {
        return state.fail(AppError::MissingFields(missing));
    }

    match state.store.login(email.trim(), password) {
        Some(user) => Ok(user),
        None => state.fail(AppError::InvalidCredentials),
    }
}

pub fn signup(state: &AppState, email: &str, password: &str, name: &str) -> AppResult<User> {
    let missing = blank_fields(&[("email", email), ("password", password), ("name", name)]);
    if !missing.is_empty() {
        return state.fail(AppError::MissingFields(missing));
    }

    match state.store.signup(email.trim(), password, name.trim()) {
        Some(user) => {
            state.notifier.success("Account created successfully!");
            Ok(user)
        }
        None => state.fail(AppError::EmailTaken),
    }
}

pub fn logout(state: &AppState) {
    if let Some(user) = state.store.current_user() {
        info!(user = %user.id, "signed out");
    }
    state.store.logout();
}

pub fn current_user(state: &AppState) -> Option<User> {
    state.store.current_user()
}

/// Editable profile fields.  `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

pub fn update_profile(state: &AppState, update: ProfileUpdate) -> AppResult<User> {
    let user = state.require_user("update your profile")?;

    if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return state.fail(AppError::MissingFields(vec!["name"]));
    }

    let patch = UserPatch {
        name: update.name.map(|n| n.trim().to_string()),
        phone: update.phone,
        location: update.location,
        bio: update.bio,
        avatar: update.avatar,
        ..UserPatch::default()
    };

    match state.store.update_user(&user.id, patch) {
        Some(updated) => {
            state.notifier.success("Profile updated successfully!");
            Ok(updated)
        }
        None => state.fail(AppError::NotFound("User")),
    }
}

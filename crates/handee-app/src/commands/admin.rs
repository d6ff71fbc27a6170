use std::collections::BTreeMap;

use serde::Serialize;

use handee_shared::{DealStatus, ListingStatus, UserId};
use handee_store::{User, UserPatch};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub users: usize,
    pub active_listings: usize,
    /// Deal count per status label.
    pub deals: BTreeMap<&'static str, usize>,
}

pub fn list_users(state: &AppState) -> AppResult<Vec<User>> {
    state.require_admin("manage users")?;
    Ok(state.store.all_users())
}

pub fn set_user_suspended(state: &AppState, id: &UserId, suspended: bool) -> AppResult<User> {
    let admin = state.require_admin("manage users")?;
    if &admin.id == id {
        return state.fail(AppError::AccessDenied("account"));
    }

    let patch = UserPatch {
        suspended: Some(suspended),
        ..UserPatch::default()
    };
    match state.store.update_user(id, patch) {
        Some(user) => {
            tracing::info!(user = %id, suspended, by = %admin.id, "suspension changed");
            state.notifier.success(if suspended {
                "User suspended"
            } else {
                "User reinstated"
            });
            Ok(user)
        }
        None => state.fail(AppError::NotFound("User")),
    }
}

pub fn stats(state: &AppState) -> AppResult<Stats> {
    state.require_admin("view statistics")?;

    let mut deals: BTreeMap<&'static str, usize> = DealStatus::STEPS
        .iter()
        .chain(std::iter::once(&DealStatus::Rejected))
        .map(|s| (s.label(), 0))
        .collect();
    for deal in state.store.all_deals() {
        *deals.entry(deal.status.label()).or_default() += 1;
    }

    Ok(Stats {
        users: state.store.all_users().len(),
        active_listings: state
            .store
            .all_listings()
            .iter()
            .filter(|l| l.status == ListingStatus::Active)
            .count(),
        deals,
    })
}

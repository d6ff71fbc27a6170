use chrono::Utc;
use serde::Serialize;
use tracing::info;

use handee_shared::constants::DIRECT_BOOKING_MESSAGE;
use handee_shared::{DealAction, DealId, DealStatus, ListingId, Party};
use handee_store::{Deal, DealPatch, Listing, User};

use crate::commands::blank_fields;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Everything the deal screen shows.  `listing` is `None` once the listing
/// has been deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealView {
    pub deal: Deal,
    pub listing: Option<Listing>,
    pub proposer: Option<User>,
    pub receiver: Option<User>,
    /// The viewer's side of the deal.
    pub party: Party,
    pub allowed_actions: Vec<DealAction>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealSummary {
    pub deal: Deal,
    pub listing_title: Option<String>,
    pub counterpart: Option<User>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Dashboard {
    pub active: Vec<DealSummary>,
    pub completed: Vec<DealSummary>,
}

/// Open a deal on someone else's listing.  The listing owner becomes the
/// receiver.
fn open_on_listing(
    state: &AppState,
    listing: &ListingId,
    action: &'static str,
    status: DealStatus,
    message: String,
) -> AppResult<Deal> {
    let user = state.require_user(action)?;
    let Some(listing) = state.store.listing_by_id(listing) else {
        return state.fail(AppError::NotFound("Listing"));
    };
    if listing.user_id == user.id {
        return state.fail(AppError::SelfDeal);
    }

    let now = Utc::now();
    let deal = Deal {
        id: DealId::generate(),
        listing_id: listing.id,
        proposer_id: user.id,
        receiver_id: listing.user_id,
        status,
        message: Some(message),
        created_at: now,
        updated_at: now,
    };
    state.store.add_deal(deal.clone());
    Ok(deal)
}

pub fn propose_deal(state: &AppState, listing: &ListingId, message: &str) -> AppResult<Deal> {
    let missing = blank_fields(&[("message", message)]);
    if !missing.is_empty() {
        // login is still checked first
        state.require_user("propose a deal")?;
        return state.fail(AppError::MissingFields(missing));
    }

    let deal = open_on_listing(
        state,
        listing,
        "propose a deal",
        DealStatus::Proposed,
        message.trim().to_string(),
    )?;
    state.notifier.success("Deal proposed successfully!");
    Ok(deal)
}

/// Book a service directly, skipping the proposal step.
pub fn book_service(state: &AppState, listing: &ListingId) -> AppResult<Deal> {
    let deal = open_on_listing(
        state,
        listing,
        "book a service",
        DealStatus::Accepted,
        DIRECT_BOOKING_MESSAGE.to_string(),
    )?;
    state.notifier.success("Service booked successfully!");
    Ok(deal)
}

/// Load a deal the signed-in user takes part in.
fn participant_deal(state: &AppState, id: &DealId, action: &'static str) -> AppResult<(Deal, Party)> {
    let user = state.require_user(action)?;
    let Some(deal) = state.store.deal_by_id(id) else {
        return state.fail(AppError::NotFound("Deal"));
    };

    let party = if deal.proposer_id == user.id {
        Party::Proposer
    } else if deal.receiver_id == user.id {
        Party::Receiver
    } else {
        return state.fail(AppError::AccessDenied("deal"));
    };
    Ok((deal, party))
}

pub fn open_deal(state: &AppState, id: &DealId) -> AppResult<DealView> {
    let (deal, party) = participant_deal(state, id, "view this deal")?;

    Ok(DealView {
        listing: state.store.listing_by_id(&deal.listing_id),
        proposer: state.store.user_by_id(&deal.proposer_id),
        receiver: state.store.user_by_id(&deal.receiver_id),
        party,
        allowed_actions: deal.status.allowed_actions(party),
        deal,
    })
}

fn transition(state: &AppState, id: &DealId, action: DealAction, toast: &str) -> AppResult<Deal> {
    let (_, party) = participant_deal(state, id, "update this deal")?;

    // the step is checked against the stored status under the store lock
    let outcome = state.store.update_deal_checked(id, |deal| {
        deal.status.apply(action, party).map(DealPatch::status)
    });

    match outcome {
        Some(Ok(updated)) => {
            info!(deal = %id, ?action, to = %updated.status, "deal status changed");
            state.notifier.success(toast);
            Ok(updated)
        }
        Some(Err(err)) => state.fail(err),
        None => state.fail(AppError::NotFound("Deal")),
    }
}

pub fn accept_deal(state: &AppState, id: &DealId) -> AppResult<Deal> {
    transition(state, id, DealAction::Accept, "Deal accepted!")
}

pub fn reject_deal(state: &AppState, id: &DealId) -> AppResult<Deal> {
    transition(state, id, DealAction::Reject, "Deal rejected")
}

pub fn start_work(state: &AppState, id: &DealId) -> AppResult<Deal> {
    transition(state, id, DealAction::StartWork, "Deal marked as in progress")
}

pub fn complete_deal(state: &AppState, id: &DealId) -> AppResult<Deal> {
    transition(state, id, DealAction::Complete, "Deal completed!")
}

/// The signed-in user's deals, split into open and completed ones.
/// Rejected deals appear in neither list.
pub fn dashboard(state: &AppState) -> AppResult<Dashboard> {
    let user = state.require_user("see your dashboard")?;
    let listings = state.store.all_listings();
    let users = state.store.all_users();

    let mut dashboard = Dashboard::default();
    for deal in state.store.user_deals(&user.id) {
        let listing_title = listings
            .iter()
            .find(|l| l.id == deal.listing_id)
            .map(|l| l.title.clone());
        let counterpart = deal
            .counterpart(&user.id)
            .and_then(|other| users.iter().find(|u| &u.id == other).cloned());

        let status = deal.status;
        let summary = DealSummary {
            deal,
            listing_title,
            counterpart,
        };
        match status {
            DealStatus::Completed => dashboard.completed.push(summary),
            DealStatus::Rejected => {}
            _ => dashboard.active.push(summary),
        }
    }
    Ok(dashboard)
}

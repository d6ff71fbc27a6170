use handee_shared::ListingId;
use handee_store::Listing;

use crate::commands::listings::get_listing;
use crate::error::AppResult;
use crate::state::AppState;

/// Returns `true` when the listing is a favorite afterwards.
pub fn toggle_favorite(state: &AppState, listing: &ListingId) -> AppResult<bool> {
    let user = state.require_user("save favorites")?;
    get_listing(state, listing)?;

    let now_favorite = state.store.toggle_favorite(&user.id, listing);
    if now_favorite {
        state.notifier.success("Added to favorites");
    } else {
        state.notifier.info("Removed from favorites");
    }
    Ok(now_favorite)
}

/// Favorite listings of the signed-in user.  Deleted listings are skipped.
pub fn favorites(state: &AppState) -> AppResult<Vec<Listing>> {
    let user = state.require_user("see your favorites")?;
    let listings = state.store.all_listings();

    Ok(state
        .store
        .favorites(&user.id)
        .iter()
        .filter_map(|id| listings.iter().find(|l| &l.id == id).cloned())
        .collect())
}

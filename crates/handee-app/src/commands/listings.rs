use chrono::Utc;
use serde::{Deserialize, Serialize};

use handee_shared::constants::{ALL_CATEGORIES, UNSPECIFIED_LOCATION};
use handee_shared::{ListingId, ListingKind, ListingStatus};
use handee_store::{Listing, ListingPatch, User};

use crate::commands::blank_fields;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub price: Option<String>,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    #[serde(default)]
    pub images: Vec<String>,
}

pub fn create_listing(state: &AppState, new: NewListing) -> AppResult<Listing> {
    let user = state.require_user("create a listing")?;

    let missing = blank_fields(&[
        ("title", &new.title),
        ("description", &new.description),
        ("category", &new.category),
    ]);
    if !missing.is_empty() {
        return state.fail(AppError::MissingFields(missing));
    }

    let location = match new.location.trim() {
        "" => UNSPECIFIED_LOCATION,
        location => location,
    };

    let listing = Listing {
        id: ListingId::generate(),
        user_id: user.id,
        title: new.title.trim().to_string(),
        description: new.description.trim().to_string(),
        category: new.category,
        location: location.to_string(),
        price: new.price.filter(|p| !p.trim().is_empty()),
        kind: new.kind,
        images: new.images,
        created_at: Utc::now(),
        status: ListingStatus::Active,
    };

    state.store.add_listing(listing.clone());
    state.notifier.success("Listing created successfully!");
    Ok(listing)
}

pub fn get_listing(state: &AppState, id: &ListingId) -> AppResult<Listing> {
    match state.store.listing_by_id(id) {
        Some(listing) => Ok(listing),
        None => state.fail(AppError::NotFound("Listing")),
    }
}

/// Load a listing the signed-in user may edit (owner or admin).
fn editable_listing(state: &AppState, id: &ListingId, action: &'static str) -> AppResult<(User, Listing)> {
    let user = state.require_user(action)?;
    let listing = get_listing(state, id)?;

    if listing.user_id != user.id && !user.is_admin() {
        return state.fail(AppError::AccessDenied("listing"));
    }
    Ok((user, listing))
}

pub fn update_listing(state: &AppState, id: &ListingId, patch: ListingPatch) -> AppResult<Listing> {
    editable_listing(state, id, "edit a listing")?;

    match state.store.update_listing(id, patch) {
        Some(listing) => {
            state.notifier.success("Listing updated");
            Ok(listing)
        }
        None => state.fail(AppError::NotFound("Listing")),
    }
}

/// Delete a listing.  Deals that reference it stay in place.
pub fn delete_listing(state: &AppState, id: &ListingId) -> AppResult<()> {
    let (user, _) = editable_listing(state, id, "delete a listing")?;

    state.store.delete_listing(id);
    tracing::info!(listing = %id, by = %user.id, "listing removed by user");
    state.notifier.success("Listing deleted");
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseFilter {
    /// Case-insensitive substring of title or description.
    #[serde(default)]
    pub query: String,
    /// Category id or name; `None` or `"All"` matches everything.
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ListingKind>,
}

impl BrowseFilter {
    fn matches(&self, listing: &Listing, category_name: Option<&str>) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_search = query.is_empty()
            || listing.title.to_lowercase().contains(&query)
            || listing.description.to_lowercase().contains(&query);

        let matches_category = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(wanted) => listing.category == wanted || category_name == Some(wanted),
        };

        let matches_kind = self.kind.map_or(true, |kind| listing.kind == kind);

        matches_search && matches_category && matches_kind
    }
}

/// Active listings matching `filter`, in posting order.
pub fn browse(state: &AppState, filter: &BrowseFilter) -> Vec<Listing> {
    let categories = state.store.categories();

    state
        .store
        .all_listings()
        .into_iter()
        .filter(|l| l.status == ListingStatus::Active)
        .filter(|l| {
            let name = categories
                .iter()
                .find(|c| c.id.as_str() == l.category)
                .map(|c| c.name.as_str());
            filter.matches(l, name)
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyListings {
    pub offered: Vec<Listing>,
    pub needed: Vec<Listing>,
}

/// The signed-in user's active listings split by kind.
pub fn my_listings(state: &AppState) -> AppResult<MyListings> {
    let user = state.require_user("see your listings")?;

    let (offered, needed) = state
        .store
        .user_listings(&user.id)
        .into_iter()
        .partition(|l| l.kind == ListingKind::Offer);

    Ok(MyListings { offered, needed })
}

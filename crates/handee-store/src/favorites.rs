//! Per-user favorite listings, stored as one `{ userId: [listingId, ...] }`
//! map.

use std::collections::BTreeMap;

use handee_shared::constants::KEY_FAVORITES;
use handee_shared::{ListingId, UserId};

use crate::store::RecordStore;

type FavoritesMap = BTreeMap<UserId, Vec<ListingId>>;

impl RecordStore {
    /// Favorite listing ids of `user`, in the order they were added.
    pub fn favorites(&self, user: &UserId) -> Vec<ListingId> {
        self.read::<FavoritesMap>(KEY_FAVORITES)
            .and_then(|mut all| all.remove(user))
            .unwrap_or_default()
    }

    pub fn is_favorite(&self, user: &UserId, listing: &ListingId) -> bool {
        self.favorites(user).contains(listing)
    }

    /// Add or remove `listing` from the favorites of `user`.  Returns `true`
    /// when the listing is a favorite afterwards.
    pub fn toggle_favorite(&self, user: &UserId, listing: &ListingId) -> bool {
        self.modify(KEY_FAVORITES, |all: &mut FavoritesMap| {
            let favorites = all.entry(user.clone()).or_default();
            match favorites.iter().position(|l| l == listing) {
                Some(index) => {
                    favorites.remove(index);
                    Some(false)
                }
                None => {
                    favorites.push(listing.clone());
                    Some(true)
                }
            }
        })
        .unwrap_or(false)
    }
}

//! Operations on the `handee_listings` collection.

use handee_shared::constants::KEY_LISTINGS;
use handee_shared::{ListingId, ListingStatus, UserId};

use crate::models::{Listing, ListingPatch};
use crate::store::RecordStore;

impl RecordStore {
    pub fn all_listings(&self) -> Vec<Listing> {
        self.read_collection(KEY_LISTINGS)
    }

    pub fn listing_by_id(&self, id: &ListingId) -> Option<Listing> {
        self.all_listings().into_iter().find(|l| &l.id == id)
    }

    pub fn add_listing(&self, listing: Listing) {
        tracing::info!(listing = %listing.id, owner = %listing.user_id, "listing added");
        self.modify(KEY_LISTINGS, |listings: &mut Vec<Listing>| {
            listings.push(listing);
            Some(())
        });
    }

    pub fn update_listing(&self, id: &ListingId, patch: ListingPatch) -> Option<Listing> {
        self.modify(KEY_LISTINGS, |listings: &mut Vec<Listing>| {
            let listing = listings.iter_mut().find(|l| &l.id == id)?;
            patch.apply(listing);
            Some(listing.clone())
        })
    }

    /// Remove a listing.  Deals and messages that reference it are kept.
    /// Returns `true` when a listing was removed.
    pub fn delete_listing(&self, id: &ListingId) -> bool {
        let removed = self
            .modify(KEY_LISTINGS, |listings: &mut Vec<Listing>| {
                let before = listings.len();
                listings.retain(|l| &l.id != id);
                Some(listings.len() != before)
            })
            .unwrap_or(false);

        if removed {
            tracing::info!(listing = %id, "listing deleted");
        }
        removed
    }

    /// Active listings owned by `user`.
    pub fn user_listings(&self, user: &UserId) -> Vec<Listing> {
        self.all_listings()
            .into_iter()
            .filter(|l| &l.user_id == user && l.status == ListingStatus::Active)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn user_listings_only_returns_active_owned() {
        let store = RecordStore::in_memory();
        store.add_listing(fixtures::listing("listing_1", "user_1"));
        store.add_listing(fixtures::listing("listing_2", "user_2"));
        let mut inactive = fixtures::listing("listing_3", "user_1");
        inactive.status = ListingStatus::Inactive;
        store.add_listing(inactive);

        let mine: Vec<_> = store
            .user_listings(&UserId::from("user_1"))
            .into_iter()
            .map(|l| l.id.0)
            .collect();
        assert_eq!(mine, vec!["listing_1"]);
    }

    #[test]
    fn delete_keeps_deals_referencing_listing() {
        let store = RecordStore::in_memory();
        store.add_listing(fixtures::listing("listing_1", "user_1"));
        store.add_deal(fixtures::deal("deal_1", "listing_1", "user_2", "user_1"));

        assert!(store.delete_listing(&ListingId::from("listing_1")));
        assert!(store.all_listings().is_empty());
        assert!(store.listing_by_id(&ListingId::from("listing_1")).is_none());

        let deal = store.deal_by_id(&"deal_1".into()).unwrap();
        assert_eq!(deal.listing_id, ListingId::from("listing_1"));
    }

    #[test]
    fn delete_missing_listing_reports_false() {
        let store = RecordStore::in_memory();
        assert!(!store.delete_listing(&ListingId::from("listing_9")));
    }

    #[test]
    fn update_merges_fields() {
        let store = RecordStore::in_memory();
        store.add_listing(fixtures::listing("listing_1", "user_1"));

        let updated = store
            .update_listing(
                &ListingId::from("listing_1"),
                ListingPatch {
                    price: Some("$40/hr".into()),
                    status: Some(ListingStatus::Inactive),
                    ..ListingPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price.as_deref(), Some("$40/hr"));
        assert_eq!(updated.title, "Listing listing_1");
        assert!(store.user_listings(&UserId::from("user_1")).is_empty());
    }
}

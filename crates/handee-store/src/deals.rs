//! Operations on the `handee_deals` collection.
//!
//! Status changes are plain field updates here.  Whether a step is legal is
//! decided by [`handee_shared::DealStatus::apply`] before calling
//! [`RecordStore::update_deal`].

use chrono::Utc;

use handee_shared::constants::KEY_DEALS;
use handee_shared::{DealId, UserId};

use crate::models::{Deal, DealPatch};
use crate::store::RecordStore;

impl RecordStore {
    pub fn all_deals(&self) -> Vec<Deal> {
        self.read_collection(KEY_DEALS)
    }

    pub fn deal_by_id(&self, id: &DealId) -> Option<Deal> {
        self.all_deals().into_iter().find(|d| &d.id == id)
    }

    pub fn add_deal(&self, deal: Deal) {
        tracing::info!(deal = %deal.id, status = %deal.status, "deal added");
        self.modify(KEY_DEALS, |deals: &mut Vec<Deal>| {
            deals.push(deal);
            Some(())
        });
    }

    /// Merge `patch` and stamp `updated_at`.  No-op when the deal is unknown.
    pub fn update_deal(&self, id: &DealId, patch: DealPatch) -> Option<Deal> {
        self.modify(KEY_DEALS, |deals: &mut Vec<Deal>| {
            let deal = deals.iter_mut().find(|d| &d.id == id)?;
            patch.apply(deal);
            deal.updated_at = Utc::now();
            Some(deal.clone())
        })
    }

    /// Like [`update_deal`](Self::update_deal), but `check` decides the patch
    /// from the stored deal while the store lock is held.  Returns `None` when
    /// the deal is unknown and `Some(Err(_))`, with nothing written, when
    /// `check` refuses.
    pub fn update_deal_checked<E>(
        &self,
        id: &DealId,
        check: impl FnOnce(&Deal) -> Result<DealPatch, E>,
    ) -> Option<Result<Deal, E>> {
        let mut refused = None;
        let updated = self.modify(KEY_DEALS, |deals: &mut Vec<Deal>| {
            let deal = deals.iter_mut().find(|d| &d.id == id)?;
            match check(deal) {
                Ok(patch) => {
                    patch.apply(deal);
                    deal.updated_at = Utc::now();
                    Some(deal.clone())
                }
                Err(e) => {
                    refused = Some(e);
                    None
                }
            }
        });

        match (updated, refused) {
            (Some(deal), _) => Some(Ok(deal)),
            (None, Some(e)) => Some(Err(e)),
            (None, None) => None,
        }
    }

    /// Deals where `user` is proposer or receiver.
    pub fn user_deals(&self, user: &UserId) -> Vec<Deal> {
        self.all_deals()
            .into_iter()
            .filter(|d| d.involves(user))
            .collect()
    }
}

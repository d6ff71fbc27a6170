use handee_shared::constants::KEY_MESSAGES;
use handee_shared::{DealId, MessageId, UserId};

use crate::models::Message;
use crate::store::RecordStore;

impl RecordStore {
    pub fn all_messages(&self) -> Vec<Message> {
        self.read_collection(KEY_MESSAGES)
    }

    /// Messages of one deal, oldest first.  Equal timestamps keep insertion
    /// order.
    pub fn deal_messages(&self, deal: &DealId) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .all_messages()
            .into_iter()
            .filter(|m| &m.deal_id == deal)
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        messages
    }

    pub fn add_message(&self, message: Message) {
        tracing::debug!(msg_id = %message.id, deal = %message.deal_id, "message stored");
        self.modify(KEY_MESSAGES, |messages: &mut Vec<Message>| {
            messages.push(message);
            Some(())
        });
    }

    /// Returns `false` when no message has that id.
    pub fn mark_message_read(&self, id: &MessageId) -> bool {
        self.modify(KEY_MESSAGES, |messages: &mut Vec<Message>| {
            let message = messages.iter_mut().find(|m| &m.id == id)?;
            message.read = true;
            Some(())
        })
        .is_some()
    }

    /// Mark every unread message of `deal` addressed to `viewer` as read, in
    /// one write.  Returns how many changed.
    pub fn mark_deal_messages_read(&self, deal: &DealId, viewer: &UserId) -> usize {
        self.modify(KEY_MESSAGES, |messages: &mut Vec<Message>| {
            let mut changed = 0;
            for m in messages
                .iter_mut()
                .filter(|m| &m.deal_id == deal && &m.receiver_id == viewer && !m.read)
            {
                m.read = true;
                changed += 1;
            }
            (changed > 0).then_some(changed)
        })
        .unwrap_or(0)
    }

    /// Unread messages addressed to `user` across all deals.
    pub fn unread_count(&self, user: &UserId) -> usize {
        self.all_messages()
            .iter()
            .filter(|m| &m.receiver_id == user && !m.read)
            .count()
    }
}

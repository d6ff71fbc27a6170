//! Record builders shared by the unit tests of this crate.

use chrono::{DateTime, Duration, Utc};

use handee_shared::{
    DealId, DealStatus, ListingId, ListingKind, ListingStatus, MessageId, MessageKind, Role,
    UserId,
};

use crate::models::{Deal, Listing, Message, User};

pub fn user(id: &str, email: &str) -> User {
    User {
        id: UserId::from(id),
        email: email.to_string(),
        password: "password123".to_string(),
        name: id.to_string(),
        phone: None,
        location: None,
        bio: None,
        avatar: None,
        role: Role::User,
        rating: 0.0,
        created_at: Utc::now(),
        suspended: false,
    }
}

pub fn listing(id: &str, owner: &str) -> Listing {
    Listing {
        id: ListingId::from(id),
        user_id: UserId::from(owner),
        title: format!("Listing {id}"),
        description: "Help with things".to_string(),
        category: "design".to_string(),
        location: "Remote".to_string(),
        price: None,
        kind: ListingKind::Offer,
        images: Vec::new(),
        created_at: Utc::now(),
        status: ListingStatus::Active,
    }
}

pub fn deal(id: &str, listing: &str, proposer: &str, receiver: &str) -> Deal {
    let an_hour_ago = Utc::now() - Duration::hours(1);
    Deal {
        id: DealId::from(id),
        listing_id: ListingId::from(listing),
        proposer_id: UserId::from(proposer),
        receiver_id: UserId::from(receiver),
        status: DealStatus::Proposed,
        message: Some("Interested".to_string()),
        created_at: an_hour_ago,
        updated_at: an_hour_ago,
    }
}

pub fn message(id: &str, deal: &str, from: &str, to: &str, at: DateTime<Utc>) -> Message {
    Message {
        id: MessageId::from(id),
        deal_id: DealId::from(deal),
        sender_id: UserId::from(from),
        receiver_id: UserId::from(to),
        content: format!("message {id}"),
        kind: MessageKind::Text,
        voice_data: None,
        timestamp: at,
        read: false,
    }
}

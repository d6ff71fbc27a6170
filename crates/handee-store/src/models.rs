//! Records persisted by the store.
//!
//! Field names serialize in camelCase and enums in snake_case, which is the
//! layout of the stored JSON documents.  Patch structs express the shallow
//! merge used by the `update_*` operations: every `Some` field overwrites the
//! matching field of the stored record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use handee_shared::{
    CategoryId, DealId, DealStatus, ListingId, ListingKind, ListingStatus, MessageId,
    MessageKind, Role, UserId,
};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A marketplace account.  Unique by email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Compared verbatim at login.
    pub password: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Encoded avatar image, opaque to the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub suspended: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<Role>,
    pub rating: Option<f64>,
    pub suspended: Option<bool>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
        if let Some(location) = self.location {
            user.location = Some(location);
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(rating) = self.rating {
            user.rating = rating;
        }
        if let Some(suspended) = self.suspended {
            user.suspended = suspended;
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// A posted offer or request for a service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    /// Owner of the listing.
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    /// Category id (e.g. `home-services`).
    pub category: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    /// Encoded images, opaque to the store.
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ListingStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub kind: Option<ListingKind>,
    pub images: Option<Vec<String>>,
    pub status: Option<ListingStatus>,
}

impl ListingPatch {
    pub fn apply(self, listing: &mut Listing) {
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(description) = self.description {
            listing.description = description;
        }
        if let Some(category) = self.category {
            listing.category = category;
        }
        if let Some(location) = self.location {
            listing.location = location;
        }
        if let Some(price) = self.price {
            listing.price = Some(price);
        }
        if let Some(kind) = self.kind {
            listing.kind = kind;
        }
        if let Some(images) = self.images {
            listing.images = images;
        }
        if let Some(status) = self.status {
            listing.status = status;
        }
    }
}

// ---------------------------------------------------------------------------
// Deal
// ---------------------------------------------------------------------------

/// A negotiation or booking between two users over one listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: DealId,
    /// May dangle once the listing is deleted.
    pub listing_id: ListingId,
    pub proposer_id: UserId,
    pub receiver_id: UserId,
    pub status: DealStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    pub fn involves(&self, user: &UserId) -> bool {
        &self.proposer_id == user || &self.receiver_id == user
    }

    /// The participant opposite to `user`, if `user` takes part at all.
    pub fn counterpart(&self, user: &UserId) -> Option<&UserId> {
        if &self.proposer_id == user {
            Some(&self.receiver_id)
        } else if &self.receiver_id == user {
            Some(&self.proposer_id)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealPatch {
    pub status: Option<DealStatus>,
    pub message: Option<String>,
}

impl DealPatch {
    pub fn status(status: DealStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(self, deal: &mut Deal) {
        if let Some(status) = self.status {
            deal.status = status;
        }
        if let Some(message) = self.message {
            deal.message = Some(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A chat message exchanged inside a deal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub deal_id: DealId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    /// Base64-encoded audio for voice messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_data: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_uses_type_field_on_disk() {
        let listing = Listing {
            id: ListingId::from("listing_1"),
            user_id: UserId::from("user_1"),
            title: "Logo".into(),
            description: "A logo".into(),
            category: "design".into(),
            location: "Remote".into(),
            price: None,
            kind: ListingKind::Offer,
            images: vec![],
            created_at: Utc::now(),
            status: ListingStatus::Active,
        };

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["type"], "offer");
        assert_eq!(json["userId"], "user_1");
        assert!(json.get("price").is_none());
    }

    #[test]
    fn user_without_optional_fields_parses() {
        let json = r#"{
            "id": "admin_1",
            "email": "admin@handee247.com",
            "password": "admin123",
            "name": "Admin User",
            "role": "admin",
            "rating": 5.0,
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert!(!user.suspended);
        assert_eq!(user.bio, None);
    }

    #[test]
    fn user_patch_only_touches_some_fields() {
        let mut user: User = serde_json::from_str(
            r#"{"id":"user_1","email":"a@x.com","password":"pw","name":"A",
                "bio":"hello","createdAt":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        UserPatch {
            name: Some("Alice".into()),
            ..UserPatch::default()
        }
        .apply(&mut user);

        assert_eq!(user.name, "Alice");
        assert_eq!(user.bio.as_deref(), Some("hello"));
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn counterpart_resolves_other_side() {
        let now = Utc::now();
        let deal = Deal {
            id: DealId::from("deal_1"),
            listing_id: ListingId::from("listing_1"),
            proposer_id: UserId::from("user_1"),
            receiver_id: UserId::from("user_2"),
            status: DealStatus::Proposed,
            message: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            deal.counterpart(&UserId::from("user_1")),
            Some(&UserId::from("user_2"))
        );
        assert_eq!(deal.counterpart(&UserId::from("user_3")), None);
        assert!(!deal.involves(&UserId::from("user_3")));
    }
}

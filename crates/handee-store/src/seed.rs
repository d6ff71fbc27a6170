//! Explicit startup initialisation.
//!
//! Nothing here runs implicitly; the application calls these once after
//! opening the store.

use chrono::Utc;

use handee_shared::constants::{DEFAULT_CATEGORIES, KEY_CATEGORIES};
use handee_shared::{CategoryId, ListingId, ListingKind, ListingStatus, Role, UserId};

use crate::models::{Category, Listing, User};
use crate::store::RecordStore;

/// Write the default category set when no categories are stored.  Returns
/// `true` when it seeded.
pub fn ensure_default_categories(store: &RecordStore) -> bool {
    let seeded = store
        .modify(KEY_CATEGORIES, |categories: &mut Vec<Category>| {
            if !categories.is_empty() {
                return None;
            }
            categories.extend(DEFAULT_CATEGORIES.iter().map(|(id, name)| Category {
                id: CategoryId::from(*id),
                name: name.to_string(),
                icon: None,
            }));
            Some(())
        })
        .is_some();

    if seeded {
        tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
    }
    seeded
}

/// Populate an empty store with an admin account, three demo users and
/// three listings.  Does nothing once any user exists.
pub fn seed_demo_data(store: &RecordStore) -> bool {
    if !store.all_users().is_empty() {
        return false;
    }

    let now = Utc::now();
    let user = |id: &str, email: &str, password: &str, name: &str, role: Role, rating: f64| User {
        id: UserId::from(id),
        email: email.to_string(),
        password: password.to_string(),
        name: name.to_string(),
        phone: None,
        location: None,
        bio: None,
        avatar: None,
        role,
        rating,
        created_at: now,
        suspended: false,
    };

    store.add_user(user(
        "admin_1",
        "admin@handee247.com",
        "admin123",
        "Admin User",
        Role::Admin,
        5.0,
    ));

    let demo_users = [
        ("user_1", "sarah@example.com", "Sarah Jenkins", "Remote", "Professional graphic designer with 5+ years experience", 4.9),
        ("user_2", "mike@example.com", "Mike Thompson", "New York, NY", "Licensed plumber and handyman", 4.5),
        ("user_3", "alex@example.com", "Alex Davis", "Remote", "Senior React developer and coding instructor", 5.0),
    ];
    for (id, email, name, location, bio, rating) in demo_users {
        let mut u = user(id, email, "password123", name, Role::User, rating);
        u.location = Some(location.to_string());
        u.bio = Some(bio.to_string());
        store.add_user(u);
    }

    let demo_listings = [
        (
            "listing_1",
            "user_1",
            "Professional Logo Design",
            "I will create a unique, professional logo for your business or brand.",
            "design",
            "Remote",
            ListingKind::Offer,
        ),
        (
            "listing_2",
            "user_2",
            "Plumbing Help Needed",
            "Looking for someone to help fix a leaky faucet in my kitchen.",
            "home-services",
            "New York, NY",
            ListingKind::Request,
        ),
        (
            "listing_3",
            "user_3",
            "React.js Tutoring",
            "One-on-one React tutoring sessions for beginners to advanced developers.",
            "development",
            "Remote",
            ListingKind::Offer,
        ),
    ];
    for (id, owner, title, description, category, location, kind) in demo_listings {
        store.add_listing(Listing {
            id: ListingId::from(id),
            user_id: UserId::from(owner),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            location: location.to_string(),
            price: None,
            kind,
            images: Vec::new(),
            created_at: now,
            status: ListingStatus::Active,
        });
    }

    tracing::info!("seeded demo data");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_categories_seed_once() {
        let store = RecordStore::in_memory();
        assert!(ensure_default_categories(&store));
        assert!(!ensure_default_categories(&store));

        let categories = store.categories();
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[3].id, CategoryId::from("home-services"));
        assert_eq!(categories[3].name, "Home Services");
    }

    #[test]
    fn existing_categories_are_left_alone() {
        let store = RecordStore::in_memory();
        store.add_category(Category {
            id: CategoryId::from("music"),
            name: "Music".into(),
            icon: None,
        });

        assert!(!ensure_default_categories(&store));
        assert_eq!(store.categories().len(), 1);
    }

    #[test]
    fn demo_data_only_seeds_empty_store() {
        let store = RecordStore::in_memory();
        assert!(seed_demo_data(&store));
        assert!(!seed_demo_data(&store));

        assert_eq!(store.all_users().len(), 4);
        assert_eq!(store.all_listings().len(), 3);
        assert!(store.user_by_email("admin@handee247.com").unwrap().is_admin());
        assert!(store.login("mike@example.com", "password123").is_some());
    }
}

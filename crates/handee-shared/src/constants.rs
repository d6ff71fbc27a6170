use std::time::Duration;

/// Application name
pub const APP_NAME: &str = "Handee 247";

/// Persistence keys, one JSON value per key
pub const KEY_CURRENT_USER: &str = "handee_user";
pub const KEY_USERS: &str = "handee_users";
pub const KEY_LISTINGS: &str = "handee_listings";
pub const KEY_DEALS: &str = "handee_deals";
pub const KEY_MESSAGES: &str = "handee_messages";
pub const KEY_CATEGORIES: &str = "handee_categories";
pub const KEY_ONBOARDING: &str = "handee_onboarding_complete";
pub const KEY_FAVORITES: &str = "handee_favorites";

/// Chat refresh interval
pub const CHAT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Call duration tick
pub const CALL_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long a notification stays visible by default
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);

/// Message attached to deals created by an instant booking
pub const DIRECT_BOOKING_MESSAGE: &str = "Direct booking";

/// Content placeholder stored alongside voice payloads
pub const VOICE_MESSAGE_CONTENT: &str = "Voice message";

/// Location stored when a listing is created without one
pub const UNSPECIFIED_LOCATION: &str = "Not specified";

/// Category filter value that matches everything
pub const ALL_CATEGORIES: &str = "All";

/// Categories written on first start, as `(id, name)`
pub const DEFAULT_CATEGORIES: [(&str, &str); 8] = [
    ("design", "Design"),
    ("development", "Development"),
    ("writing", "Writing"),
    ("home-services", "Home Services"),
    ("lessons", "Lessons"),
    ("wellness", "Wellness"),
    ("photography", "Photography"),
    ("marketing", "Marketing"),
];

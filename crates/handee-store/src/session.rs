//! Current session, sign-in and onboarding flag.

use chrono::Utc;

use handee_shared::constants::{KEY_CURRENT_USER, KEY_ONBOARDING, KEY_USERS};
use handee_shared::{Role, UserId};

use crate::models::User;
use crate::store::RecordStore;

impl RecordStore {
    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.read(KEY_CURRENT_USER)
    }

    pub fn set_current_user(&self, user: Option<&User>) {
        match user {
            Some(user) => self.write(KEY_CURRENT_USER, user),
            None => self.remove(KEY_CURRENT_USER),
        }
    }

    /// Sign in with an exact email/password match.
    ///
    /// Suspended accounts cannot sign in.  On failure the current session is
    /// left as it was.
    pub fn login(&self, email: &str, password: &str) -> Option<User> {
        let user = self
            .all_users()
            .into_iter()
            .find(|u| u.email == email && u.password == password)
            .filter(|u| !u.suspended)?;

        self.set_current_user(Some(&user));
        tracing::info!(user = %user.id, "signed in");
        Some(user)
    }

    pub fn logout(&self) {
        self.set_current_user(None);
    }

    /// Create an account and sign it in.  Returns `None` when the email is
    /// already registered.
    pub fn signup(&self, email: &str, password: &str, name: &str) -> Option<User> {
        let user = User {
            id: UserId::generate(),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            phone: None,
            location: None,
            bio: None,
            avatar: None,
            role: Role::User,
            rating: 0.0,
            created_at: Utc::now(),
            suspended: false,
        };

        // check and append under one lock
        let user = self.modify(KEY_USERS, |users: &mut Vec<User>| {
            if users.iter().any(|u| u.email == email) {
                return None;
            }
            users.push(user.clone());
            Some(user)
        })?;

        self.set_current_user(Some(&user));
        tracing::info!(user = %user.id, "account created");
        Some(user)
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.read(KEY_ONBOARDING).unwrap_or(false)
    }

    pub fn set_onboarding_complete(&self) {
        self.write(KEY_ONBOARDING, &true);
    }
}

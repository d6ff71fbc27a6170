//! Operations on the `handee_users` collection.

use handee_shared::constants::KEY_USERS;
use handee_shared::UserId;

use crate::models::{User, UserPatch};
use crate::store::RecordStore;

impl RecordStore {
    /// All users in registration order.
    pub fn all_users(&self) -> Vec<User> {
        self.read_collection(KEY_USERS)
    }

    /// Append a user.  No uniqueness check is made here.
    pub fn add_user(&self, user: User) {
        self.modify(KEY_USERS, |users: &mut Vec<User>| {
            users.push(user);
            Some(())
        });
    }

    /// Merge `patch` into the user with `id`.
    ///
    /// The session copy is refreshed when it is the same user.  Returns the
    /// updated record, `None` when no user matched.
    pub fn update_user(&self, id: &UserId, patch: UserPatch) -> Option<User> {
        let updated = self.modify(KEY_USERS, |users: &mut Vec<User>| {
            let user = users.iter_mut().find(|u| &u.id == id)?;
            patch.apply(user);
            Some(user.clone())
        })?;

        if self.current_user().is_some_and(|current| &current.id == id) {
            self.set_current_user(Some(&updated));
        }
        Some(updated)
    }

    pub fn user_by_id(&self, id: &UserId) -> Option<User> {
        self.all_users().into_iter().find(|u| &u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.all_users().into_iter().find(|u| u.email == email)
    }
}

//! Application state shared by all commands.
//!
//! [`AppState`] owns the record store, the notification service and the
//! configuration.  The signed-in user lives in the store itself, so the state
//! needs no interior mutability of its own.

use std::sync::Arc;

use handee_store::{seed, Database, RecordStore, StoreError, User};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::events::Notifier;

pub struct AppState {
    /// Record store, shared with background pollers.
    pub store: Arc<RecordStore>,

    /// Publishes transient notifications to whoever is listening.
    pub notifier: Notifier,

    pub config: AppConfig,
}

impl AppState {
    /// Open the configured store and run the startup seeding.
    pub fn open(config: AppConfig) -> Result<Self, StoreError> {
        let store = if config.in_memory {
            RecordStore::in_memory()
        } else if let Some(path) = &config.db_path {
            tracing::info!(path = %path.display(), "opening database");
            RecordStore::new(Database::open_at(path)?)
        } else {
            RecordStore::open_default()?
        };

        Ok(Self::with_store(store, config))
    }

    /// Wrap an already opened store.
    pub fn with_store(store: RecordStore, config: AppConfig) -> Self {
        seed::ensure_default_categories(&store);
        if config.seed_demo_data {
            seed::seed_demo_data(&store);
        }

        Self {
            store: Arc::new(store),
            notifier: Notifier::new(config.toast_duration),
            config,
        }
    }

    /// The signed-in user, refreshed from the user collection.
    ///
    /// A session whose account has been suspended since sign-in is ended.
    pub(crate) fn require_user(&self, action: &'static str) -> AppResult<User> {
        let Some(session) = self.store.current_user() else {
            return self.fail(AppError::NotAuthenticated(action));
        };

        let user = self.store.user_by_id(&session.id).unwrap_or(session);
        if user.suspended {
            tracing::warn!(user = %user.id, "suspended account, ending session");
            self.store.logout();
            return self.fail(AppError::NotAuthenticated(action));
        }
        Ok(user)
    }

    /// Like [`require_user`](Self::require_user), for administrator-only
    /// commands.
    pub(crate) fn require_admin(&self, action: &'static str) -> AppResult<User> {
        let user = self.require_user(action)?;
        if !user.is_admin() {
            return self.fail(AppError::AccessDenied("page"));
        }
        Ok(user)
    }

    /// Log a refused command, tell the user, and return the error.
    pub(crate) fn fail<T>(&self, err: impl Into<AppError>) -> AppResult<T> {
        let err = err.into();
        tracing::warn!(error = %err, "command refused");
        self.notifier.error(err.to_string());
        Err(err)
    }
}

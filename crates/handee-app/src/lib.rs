//! Application layer of the Handee 247 marketplace.
//!
//! Commands in [`commands`] validate user input, enforce the deal lifecycle
//! and access rules, and write through the record store held by
//! [`AppState`].  User-facing feedback goes out through the [`Notifier`].

pub mod chat;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use events::{Notification, Notifier};
pub use state::AppState;

/// Install the global `tracing` subscriber.  `RUST_LOG` overrides the
/// default filter.  Calling it twice is harmless.
///
/// This crate has no entry point of its own: the binary embedding it calls
/// this once at startup, before [`AppState::open`].
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("handee_app=debug,handee_store=info,warn"));

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Starting {}", handee_shared::constants::APP_NAME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::debug!("subscriber installed");
    }
}

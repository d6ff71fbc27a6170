//! # handee-store
//!
//! Local record store for the Handee marketplace.
//!
//! Users, listings, deals, messages, categories and favorites are each kept
//! as one JSON document inside a key-value [`Substrate`].  The default
//! substrate is a SQLite database ([`Database`]) in the platform data
//! directory.  [`RecordStore`] exposes typed operations for every collection
//! as inherent methods split across the modules below.

pub mod database;
pub mod migrations;
pub mod models;
pub mod seed;
pub mod store;
pub mod substrate;

mod categories;
mod deals;
mod error;
mod favorites;
mod listings;
mod messages;
mod session;
mod users;

#[cfg(test)]
mod fixtures;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
pub use store::RecordStore;
pub use substrate::{Detached, MemorySubstrate, Substrate};

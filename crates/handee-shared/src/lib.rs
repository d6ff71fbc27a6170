//! Types shared by the Handee store and application crates: record
//! identifiers, enums persisted inside records, the deal lifecycle and
//! well-known constants.

pub mod constants;
pub mod error;
pub mod lifecycle;
pub mod types;

pub use error::TransitionError;
pub use lifecycle::{DealAction, DealStatus, Party};
pub use types::*;

use thiserror::Error;

use crate::lifecycle::{DealAction, DealStatus};

/// Rejected deal lifecycle step.  The deal is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot {action} a deal that is {from}")]
    Invalid { from: DealStatus, action: DealAction },

    #[error("Only the receiver can {action} a deal")]
    ReceiverOnly { action: DealAction },
}

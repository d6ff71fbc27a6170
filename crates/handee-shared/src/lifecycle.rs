//! Deal status state machine.
//!
//! ```text
//! proposed ──accept──▶ accepted ──start──▶ in_progress ──complete──▶ completed
//!     │
//!     └──reject──▶ rejected
//! ```
//!
//! `accept` and `reject` belong to the receiver (the listing owner).  The two
//! later steps may be taken by either participant.

use serde::{Deserialize, Serialize};

use crate::error::TransitionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    #[default]
    Proposed,
    Accepted,
    InProgress,
    Completed,
    Rejected,
}

/// An explicit user action on a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealAction {
    Accept,
    Reject,
    StartWork,
    Complete,
}

/// The side of the deal an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Proposer,
    Receiver,
}

impl DealStatus {
    /// The four happy-path states in display order.
    pub const STEPS: [DealStatus; 4] = [
        DealStatus::Proposed,
        DealStatus::Accepted,
        DealStatus::InProgress,
        DealStatus::Completed,
    ];

    /// Compute the status reached by `action` taken by `party`.
    pub fn apply(self, action: DealAction, party: Party) -> Result<DealStatus, TransitionError> {
        use DealAction::*;
        use DealStatus::*;

        let next = match (self, action) {
            (Proposed, Accept) => Accepted,
            (Proposed, Reject) => Rejected,
            (Accepted, StartWork) => InProgress,
            (InProgress, Complete) => Completed,
            (from, action) => return Err(TransitionError::Invalid { from, action }),
        };

        if matches!(action, Accept | Reject) && party != Party::Receiver {
            return Err(TransitionError::ReceiverOnly { action });
        }

        Ok(next)
    }

    /// Actions `party` may take from this status.
    pub fn allowed_actions(self, party: Party) -> Vec<DealAction> {
        [
            DealAction::Accept,
            DealAction::Reject,
            DealAction::StartWork,
            DealAction::Complete,
        ]
        .into_iter()
        .filter(|action| self.apply(*action, party).is_ok())
        .collect()
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, DealStatus::Completed | DealStatus::Rejected)
    }

    /// Position on the progress tracker, `None` for `rejected`.
    pub fn step_index(self) -> Option<usize> {
        Self::STEPS.iter().position(|s| *s == self)
    }

    pub fn label(self) -> &'static str {
        match self {
            DealStatus::Proposed => "Proposed",
            DealStatus::Accepted => "Accepted",
            DealStatus::InProgress => "In Progress",
            DealStatus::Completed => "Completed",
            DealStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for DealAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DealAction::Accept => "accept",
            DealAction::Reject => "reject",
            DealAction::StartWork => "start work",
            DealAction::Complete => "complete",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_runs_to_completion() {
        let status = DealStatus::Proposed
            .apply(DealAction::Accept, Party::Receiver)
            .unwrap()
            .apply(DealAction::StartWork, Party::Proposer)
            .unwrap()
            .apply(DealAction::Complete, Party::Receiver)
            .unwrap();
        assert_eq!(status, DealStatus::Completed);
        assert!(status.is_terminal());
    }

    #[test]
    fn only_receiver_can_accept_or_reject() {
        assert!(matches!(
            DealStatus::Proposed.apply(DealAction::Accept, Party::Proposer),
            Err(TransitionError::ReceiverOnly { .. })
        ));
        assert!(matches!(
            DealStatus::Proposed.apply(DealAction::Reject, Party::Proposer),
            Err(TransitionError::ReceiverOnly { .. })
        ));
        assert_eq!(
            DealStatus::Proposed.apply(DealAction::Reject, Party::Receiver).unwrap(),
            DealStatus::Rejected
        );
    }

    #[test]
    fn complete_on_proposed_is_invalid() {
        let err = DealStatus::Proposed
            .apply(DealAction::Complete, Party::Receiver)
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::Invalid {
                from: DealStatus::Proposed,
                action: DealAction::Complete,
            }
        );
    }

    #[test]
    fn accepted_cannot_be_accepted_again() {
        assert!(DealStatus::Accepted
            .apply(DealAction::Accept, Party::Receiver)
            .is_err());
        assert!(DealStatus::Accepted
            .apply(DealAction::Reject, Party::Receiver)
            .is_err());
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for party in [Party::Proposer, Party::Receiver] {
            assert!(DealStatus::Completed.allowed_actions(party).is_empty());
            assert!(DealStatus::Rejected.allowed_actions(party).is_empty());
        }
    }

    #[test]
    fn allowed_actions_depend_on_party() {
        assert_eq!(
            DealStatus::Proposed.allowed_actions(Party::Receiver),
            vec![DealAction::Accept, DealAction::Reject]
        );
        assert!(DealStatus::Proposed.allowed_actions(Party::Proposer).is_empty());
        assert_eq!(
            DealStatus::Accepted.allowed_actions(Party::Proposer),
            vec![DealAction::StartWork]
        );
    }

    #[test]
    fn step_index_tracks_progress() {
        assert_eq!(DealStatus::Proposed.step_index(), Some(0));
        assert_eq!(DealStatus::Completed.step_index(), Some(3));
        assert_eq!(DealStatus::Rejected.step_index(), None);
    }

    #[test]
    fn status_uses_snake_case_on_disk() {
        assert_eq!(
            serde_json::to_string(&DealStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}

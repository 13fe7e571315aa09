//! Upload lifecycle as an explicit state machine.
//!
//! The widget feeds every lifecycle event through [`UploadState::apply`]
//! and only acts on the side effects of an event that [`Step::Advanced`].
//! Overlapping selections are resolved here according to
//! [`OverlapPolicy`], and responses for attempts that are no longer
//! current come back as [`Step::Stale`].

use crate::config::OverlapPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    /// Checking a newly chosen file. `superseding` is the in-flight attempt
    /// this file will replace if it passes.
    Validating { superseding: Option<AttemptId> },
    Submitting(AttemptId),
    /// Response is being applied to the view. Cannot be superseded.
    Settling(AttemptId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadEvent {
    FileChosen,
    ValidationFailed,
    ValidationPassed(AttemptId),
    ResponseReceived(AttemptId),
    RequestSettled(AttemptId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advanced,
    /// Event does not apply in the current state; state unchanged
    Ignored,
    /// Event belongs to an attempt that is no longer current
    Stale,
}

impl UploadState {
    /// Attempt whose request is currently in flight or settling
    pub fn current_attempt(&self) -> Option<AttemptId> {
        match self {
            UploadState::Submitting(id) | UploadState::Settling(id) => Some(*id),
            UploadState::Validating { superseding } => *superseding,
            UploadState::Idle => None,
        }
    }

    pub fn apply(&mut self, event: UploadEvent, policy: OverlapPolicy) -> Step {
        use UploadEvent::*;
        use UploadState::*;

        let next = match (*self, event) {
            (Idle, FileChosen) => Validating { superseding: None },

            (Submitting(current), FileChosen) => match policy {
                OverlapPolicy::Reject => return Step::Ignored,
                OverlapPolicy::LatestWins => Validating {
                    superseding: Some(current),
                },
            },

            (Validating { superseding }, ValidationFailed) => match superseding {
                Some(current) => Submitting(current),
                None => Idle,
            },

            (Validating { .. }, ValidationPassed(id)) => Submitting(id),

            (Submitting(current), ResponseReceived(id)) if current == id => Settling(id),
            (Settling(current), RequestSettled(id)) if current == id => Idle,

            (_, ResponseReceived(_) | RequestSettled(_)) => return Step::Stale,

            _ => return Step::Ignored,
        };

        *self = next;
        Step::Advanced
    }
}

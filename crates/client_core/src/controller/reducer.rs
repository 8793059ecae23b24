//! Pure state transitions for a single registration attempt.

use shared::protocol::AttemptResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn is_in_flight(self) -> bool {
        self == SubmissionState::Submitting
    }

    /// A new attempt may start from any resting state.
    pub fn accepts_trigger(self) -> bool {
        !self.is_in_flight()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SubmissionInput<'a> {
    /// Validation passed and the payload was built.
    Begin,
    Resolved(&'a AttemptResult),
}

pub fn reduce(state: SubmissionState, input: SubmissionInput<'_>) -> SubmissionState {
    match (state, input) {
        (_, SubmissionInput::Begin) => SubmissionState::Submitting,
        (SubmissionState::Submitting, SubmissionInput::Resolved(result)) => {
            if result.is_success() {
                SubmissionState::Succeeded
            } else {
                SubmissionState::Failed
            }
        }
        (state, _) => state,
    }
}

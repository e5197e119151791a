//! WizardState - the step machine as pure `(state, event) -> state` transitions.
//!
//! States are the step positions `1..=N` plus a submitting sub-state that is
//! only reachable from step N. There is no terminal "done" state: a successful
//! submission returns the wizard to step 1.

use serde::Serialize;

use crate::domain::foundation::{DomainError, StateMachine, ValidationError};

/// Whether the wizard accepts edits or is waiting on the booking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    #[default]
    Editing,
    Submitting,
}

impl StateMachine for WizardPhase {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            WizardPhase::Editing => vec![WizardPhase::Submitting],
            WizardPhase::Submitting => vec![WizardPhase::Editing],
        }
    }
}

/// Inputs to [`WizardState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    /// The current step validated and is not the last one.
    Advance,
    /// The user asked to go back.
    Retreat,
    /// The last step validated and the form is being sent.
    SubmissionStarted,
    SubmissionSucceeded,
    SubmissionFailed,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    current_step: usize,
    total_steps: usize,
    phase: WizardPhase,
}

impl WizardState {
    /// Starts at step 1 of `total_steps`.
    pub fn new(total_steps: usize) -> Result<Self, ValidationError> {
        if total_steps == 0 {
            return Err(ValidationError::empty_field("steps"));
        }
        Ok(Self {
            current_step: 1,
            total_steps,
            phase: WizardPhase::Editing,
        })
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.total_steps
    }

    /// Back is offered on every step but the first.
    pub fn can_go_back(&self) -> bool {
        self.current_step > 1 && !self.is_submitting()
    }

    /// Computes the next state. `self` is left untouched.
    pub fn apply(&self, event: WizardEvent) -> Result<WizardState, DomainError> {
        match event {
            WizardEvent::Advance => {
                self.ensure_editing()?;
                if self.is_last_step() {
                    return Err(DomainError::invalid_transition(
                        "The last step submits instead of advancing",
                    ));
                }
                Ok(Self {
                    current_step: self.current_step + 1,
                    ..*self
                })
            }
            WizardEvent::Retreat => {
                self.ensure_editing()?;
                Ok(Self {
                    current_step: self.current_step.saturating_sub(1).max(1),
                    ..*self
                })
            }
            WizardEvent::SubmissionStarted => {
                if !self.is_last_step() {
                    return Err(DomainError::invalid_transition(format!(
                        "Submission is only possible from step {}, wizard is at step {}",
                        self.total_steps, self.current_step
                    )));
                }
                let phase = self.transition_phase(WizardPhase::Submitting)?;
                Ok(Self { phase, ..*self })
            }
            WizardEvent::SubmissionSucceeded => {
                self.transition_phase(WizardPhase::Editing)?;
                Ok(self.initial())
            }
            WizardEvent::SubmissionFailed => {
                let phase = self.transition_phase(WizardPhase::Editing)?;
                Ok(Self { phase, ..*self })
            }
            WizardEvent::Reset => {
                self.ensure_editing()?;
                Ok(self.initial())
            }
        }
    }

    fn initial(&self) -> Self {
        Self {
            current_step: 1,
            total_steps: self.total_steps,
            phase: WizardPhase::Editing,
        }
    }

    fn ensure_editing(&self) -> Result<(), DomainError> {
        if self.is_submitting() {
            return Err(DomainError::submission_in_progress());
        }
        Ok(())
    }

    fn transition_phase(&self, target: WizardPhase) -> Result<WizardPhase, DomainError> {
        self.phase
            .transition_to(target)
            .map_err(|e| DomainError::invalid_transition(e.to_string()))
    }
}

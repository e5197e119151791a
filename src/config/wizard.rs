//! Wizard configuration

use serde::Deserialize;

use crate::application::{SubmissionContract, WheelFilter, WizardSettings};
use crate::domain::booking::{DateChangeReset, ResetPolicy, StepSequence};

use super::error::ValidationError;

/// Reach of a date change, or `auto` to derive it from the step order
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateChangeResetSetting {
    #[default]
    Auto,
    Type,
    Model,
    None,
}

/// Wizard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    /// Comma-separated step kinds, in display order
    #[serde(default = "default_steps")]
    pub steps: String,

    #[serde(default)]
    pub date_change_resets: DateChangeResetSetting,

    #[serde(default)]
    pub wheel_filter: WheelFilter,

    #[serde(default)]
    pub submission: SubmissionContract,
}

impl WizardConfig {
    pub fn step_sequence(&self) -> Result<StepSequence, ValidationError> {
        self.steps
            .parse()
            .map_err(|e: crate::domain::foundation::ValidationError| {
                ValidationError::InvalidSteps(e.to_string())
            })
    }

    pub fn reset_policy(&self, steps: &StepSequence) -> ResetPolicy {
        match self.date_change_resets {
            DateChangeResetSetting::Auto => ResetPolicy::for_steps(steps),
            DateChangeResetSetting::Type => ResetPolicy::new(DateChangeReset::Type),
            DateChangeResetSetting::Model => ResetPolicy::new(DateChangeReset::Model),
            DateChangeResetSetting::None => ResetPolicy::new(DateChangeReset::Nothing),
        }
    }

    /// Builds the controller settings described by this section
    pub fn settings(&self) -> Result<WizardSettings, ValidationError> {
        let steps = self.step_sequence()?;
        let policy = self.reset_policy(&steps);
        Ok(WizardSettings::new(steps).with_reset_policy(policy))
    }

    /// Validate wizard configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.step_sequence().map(|_| ())
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            date_change_resets: DateChangeResetSetting::default(),
            wheel_filter: WheelFilter::default(),
            submission: SubmissionContract::default(),
        }
    }
}

fn default_steps() -> String {
    StepSequence::compact().to_string()
}

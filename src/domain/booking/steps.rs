//! StepKind and StepSequence - the configurable ordering of wizard steps.
//!
//! The number and order of steps is data, not code: the compact layout has
//! five steps, the extended layout adds contact details and moves the rental
//! period forward.
//!
//! ```ignore
//! let steps: StepSequence = "name,contact,dates,wheels,vehicle_type,vehicle_model".parse()?;
//! assert_eq!(steps.len(), 6);
//! assert_eq!(steps.step_at(3), Some(StepKind::DateRange));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

use super::FormField;

/// One screen of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Name,
    Contact,
    DateRange,
    NumberOfWheels,
    VehicleType,
    VehicleModel,
}

impl StepKind {
    /// The fields collected (and validated) on this step.
    pub fn fields(&self) -> &'static [FormField] {
        match self {
            StepKind::Name => &[FormField::FirstName, FormField::LastName],
            StepKind::Contact => &[FormField::Email, FormField::Phone],
            StepKind::DateRange => &[FormField::StartDate, FormField::EndDate],
            StepKind::NumberOfWheels => &[FormField::NumberOfWheels],
            StepKind::VehicleType => &[FormField::VehicleType],
            StepKind::VehicleModel => &[FormField::VehicleModel],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StepKind::Name => "Personal Information",
            StepKind::Contact => "Contact Details",
            StepKind::DateRange => "Rental Period",
            StepKind::NumberOfWheels => "Vehicle Category",
            StepKind::VehicleType => "Vehicle Type",
            StepKind::VehicleModel => "Vehicle Model",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            StepKind::Name => "Please enter your name to get started",
            StepKind::Contact => "How can we reach you about your booking?",
            StepKind::DateRange => "When would you like to rent the vehicle?",
            StepKind::NumberOfWheels => "How many wheels does your vehicle have?",
            StepKind::VehicleType => "What type of vehicle are you looking for?",
            StepKind::VehicleModel => "Choose the specific model you prefer",
        }
    }

    /// Short configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Name => "name",
            StepKind::Contact => "contact",
            StepKind::DateRange => "dates",
            StepKind::NumberOfWheels => "wheels",
            StepKind::VehicleType => "vehicle_type",
            StepKind::VehicleModel => "vehicle_model",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(StepKind::Name),
            "contact" => Ok(StepKind::Contact),
            "dates" | "date_range" => Ok(StepKind::DateRange),
            "wheels" | "number_of_wheels" => Ok(StepKind::NumberOfWheels),
            "vehicle_type" | "type" => Ok(StepKind::VehicleType),
            "vehicle_model" | "model" => Ok(StepKind::VehicleModel),
            other => Err(ValidationError::invalid_format(
                "steps",
                format!("unknown step '{}'", other),
            )),
        }
    }
}

/// Ordered, non-empty list of distinct steps. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSequence(Vec<StepKind>);

impl StepSequence {
    /// Builds a sequence, rejecting empty lists and repeated steps.
    pub fn new(steps: Vec<StepKind>) -> Result<Self, ValidationError> {
        if steps.is_empty() {
            return Err(ValidationError::empty_field("steps"));
        }
        for (i, step) in steps.iter().enumerate() {
            if steps[..i].contains(step) {
                return Err(ValidationError::invalid_format(
                    "steps",
                    format!("step '{}' appears more than once", step),
                ));
            }
        }
        Ok(Self(steps))
    }

    /// name → wheels → type → model → dates
    pub fn compact() -> Self {
        Self(vec![
            StepKind::Name,
            StepKind::NumberOfWheels,
            StepKind::VehicleType,
            StepKind::VehicleModel,
            StepKind::DateRange,
        ])
    }

    /// name → contact → dates → wheels → type → model
    pub fn extended() -> Self {
        Self(vec![
            StepKind::Name,
            StepKind::Contact,
            StepKind::DateRange,
            StepKind::NumberOfWheels,
            StepKind::VehicleType,
            StepKind::VehicleModel,
        ])
    }

    /// Total number of steps (N).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The step at 1-based `position`.
    pub fn step_at(&self, position: usize) -> Option<StepKind> {
        position.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }

    /// The 1-based position of `kind`, if part of this sequence.
    pub fn position_of(&self, kind: StepKind) -> Option<usize> {
        self.0.iter().position(|s| *s == kind).map(|i| i + 1)
    }

    pub fn contains(&self, kind: StepKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepKind> {
        self.0.iter()
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self::compact()
    }
}

impl FromStr for StepSequence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.parse::<StepKind>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(steps)
    }
}

impl fmt::Display for StepSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(StepKind::as_str).collect();
        f.write_str(&names.join(","))
    }
}

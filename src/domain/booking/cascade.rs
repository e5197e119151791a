//! DependencyGraph - which fields go stale when a parent field changes.
//!
//! Edges point from a parent to its direct dependents. A change to a parent
//! clears every field reachable from it:
//!
//! ```text
//! numberOfWheels ─▶ vehicleType ─▶ vehicleModel
//! startDate ─┐
//!            ├──▶ vehicleType   (or vehicleModel, or nothing; see ResetPolicy)
//! endDate ───┘
//! ```

use serde::Deserialize;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

use super::{FieldStore, FormField, StepKind, StepSequence};

/// How far a change of the rental period reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateChangeReset {
    /// Selections stay; the booking service rejects unavailable vehicles.
    Nothing,
    /// The selected model is invalidated.
    Model,
    /// The selected type is invalidated, and with it the model.
    Type,
}

impl FromStr for DateChangeReset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "nothing" => Ok(DateChangeReset::Nothing),
            "model" => Ok(DateChangeReset::Model),
            "type" => Ok(DateChangeReset::Type),
            other => Err(ValidationError::invalid_format(
                "date_change_resets",
                format!("expected none, model or type, got '{}'", other),
            )),
        }
    }
}

/// Tunable parts of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ResetPolicy {
    pub on_date_change: DateChangeReset,
}

impl ResetPolicy {
    pub fn new(on_date_change: DateChangeReset) -> Self {
        Self { on_date_change }
    }

    /// A date change only invalidates selections made on later steps.
    ///
    /// With dates before the type step the type is reset; with dates last
    /// nothing is.
    pub fn for_steps(steps: &StepSequence) -> Self {
        let dates = match steps.position_of(StepKind::DateRange) {
            Some(position) => position,
            None => return Self::new(DateChangeReset::Nothing),
        };
        let after_dates = |kind| steps.position_of(kind).map_or(false, |p| p > dates);

        let on_date_change = if after_dates(StepKind::VehicleType) {
            DateChangeReset::Type
        } else if after_dates(StepKind::VehicleModel) {
            DateChangeReset::Model
        } else {
            DateChangeReset::Nothing
        };
        Self::new(on_date_change)
    }
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self::new(DateChangeReset::Type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: Vec<(FormField, FormField)>,
}

impl DependencyGraph {
    /// A graph without edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// The booking wizard's cascade under `policy`.
    pub fn standard(policy: ResetPolicy) -> Self {
        let graph = Self::new()
            .with_edge(FormField::NumberOfWheels, FormField::VehicleType)
            .with_edge(FormField::VehicleType, FormField::VehicleModel);

        let date_dependent = match policy.on_date_change {
            DateChangeReset::Nothing => return graph,
            DateChangeReset::Model => FormField::VehicleModel,
            DateChangeReset::Type => FormField::VehicleType,
        };
        graph
            .with_edge(FormField::StartDate, date_dependent)
            .with_edge(FormField::EndDate, date_dependent)
    }

    pub fn with_edge(mut self, parent: FormField, child: FormField) -> Self {
        if !self.edges.contains(&(parent, child)) {
            self.edges.push((parent, child));
        }
        self
    }

    /// Returns true if other fields depend on `field`.
    pub fn is_parent(&self, field: FormField) -> bool {
        self.edges.iter().any(|(p, _)| *p == field)
    }

    /// Direct dependents of `field`.
    pub fn children(&self, field: FormField) -> Vec<FormField> {
        self.edges
            .iter()
            .filter(|(p, _)| *p == field)
            .map(|(_, c)| *c)
            .collect()
    }

    /// Every field reachable from `field`, nearest first, without repeats.
    pub fn dependents_of(&self, field: FormField) -> Vec<FormField> {
        let mut found: Vec<FormField> = Vec::new();
        let mut frontier = vec![field];
        while let Some(current) = frontier.pop() {
            for child in self.children(current) {
                if child != field && !found.contains(&child) {
                    found.push(child);
                    frontier.insert(0, child);
                }
            }
        }
        found
    }

    /// Clears every dependent of `field` in `store`; returns what was cleared.
    pub fn cascade(&self, field: FormField, store: &mut FieldStore) -> Vec<FormField> {
        let stale = self.dependents_of(field);
        for dependent in &stale {
            store.clear_field(*dependent);
        }
        stale
    }
}

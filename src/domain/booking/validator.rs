//! StepValidator - declarative per-step rule table.
//!
//! Each step maps to an ordered list of field rules. For every field the
//! first failing rule supplies the message, so a missing end date reports
//! "End date is required" rather than an ordering error.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::domain::foundation::parse_date;

use super::{FormData, FormErrors, FormField, StepKind};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s+\-()]{10,20}$").expect("phone pattern compiles"));

/// Predicate applied to one field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Non-empty after trimming.
    Required,
    /// `local@domain.tld` shape.
    Email,
    /// Digits, spaces, `+`, `-`, parentheses; 10 to 20 characters.
    Phone,
    /// Parses as a calendar date.
    Date,
    /// Not earlier than the date held in another field (inclusive).
    NotBefore(FormField),
}

impl Check {
    /// Empty values only fail `Required`; format checks leave them alone.
    fn passes(&self, value: &str, data: &FormData, field: FormField) -> bool {
        let value = value.trim();
        match self {
            Check::Required => !value.is_empty(),
            _ if value.is_empty() => true,
            Check::Email => EMAIL_PATTERN.is_match(value),
            Check::Phone => PHONE_PATTERN.is_match(value),
            Check::Date => parse_date(field.as_str(), value).is_ok(),
            Check::NotBefore(other) => {
                match (
                    parse_date(field.as_str(), value),
                    parse_date(other.as_str(), data.get(*other)),
                ) {
                    (Ok(this), Ok(that)) => this >= that,
                    // unparseable or missing counterpart is reported by its own rule
                    _ => true,
                }
            }
        }
    }
}

/// A predicate and the message shown when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: FormField,
    pub check: Check,
    pub message: String,
}

impl FieldRule {
    pub fn new(field: FormField, check: Check, message: impl Into<String>) -> Self {
        Self {
            field,
            check,
            message: message.into(),
        }
    }
}

/// Mapping from step kind to its rules.
#[derive(Debug, Clone, Default)]
pub struct RuleTable(HashMap<StepKind, Vec<FieldRule>>);

impl RuleTable {
    /// The booking wizard's standard rules.
    pub fn standard() -> Self {
        use FormField::*;

        let mut table = Self::default();
        table.set(
            StepKind::Name,
            vec![
                FieldRule::new(FirstName, Check::Required, "First name is required"),
                FieldRule::new(LastName, Check::Required, "Last name is required"),
            ],
        );
        table.set(
            StepKind::Contact,
            vec![
                FieldRule::new(Email, Check::Required, "Email is required"),
                FieldRule::new(Email, Check::Email, "Please enter a valid email address"),
                FieldRule::new(Phone, Check::Required, "Phone number is required"),
                FieldRule::new(Phone, Check::Phone, "Please enter a valid phone number"),
            ],
        );
        table.set(
            StepKind::DateRange,
            vec![
                FieldRule::new(StartDate, Check::Required, "Start date is required"),
                FieldRule::new(StartDate, Check::Date, "Please enter a valid start date"),
                FieldRule::new(EndDate, Check::Required, "End date is required"),
                FieldRule::new(EndDate, Check::Date, "Please enter a valid end date"),
                FieldRule::new(
                    EndDate,
                    Check::NotBefore(StartDate),
                    "End date must be after start date",
                ),
            ],
        );
        table.set(
            StepKind::NumberOfWheels,
            vec![FieldRule::new(
                NumberOfWheels,
                Check::Required,
                "Please select number of wheels",
            )],
        );
        table.set(
            StepKind::VehicleType,
            vec![FieldRule::new(VehicleType, Check::Required, "Please select a vehicle type")],
        );
        table.set(
            StepKind::VehicleModel,
            vec![FieldRule::new(VehicleModel, Check::Required, "Please select a vehicle model")],
        );
        table
    }

    /// Replaces the rules of one step.
    pub fn set(&mut self, step: StepKind, rules: Vec<FieldRule>) {
        self.0.insert(step, rules);
    }

    pub fn rules_for(&self, step: StepKind) -> &[FieldRule] {
        self.0.get(&step).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Evaluates one step's rules against the current form values.
#[derive(Debug, Clone)]
pub struct StepValidator {
    rules: RuleTable,
}

impl StepValidator {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Returns the errors of `step` only; empty means the step is valid.
    pub fn validate(&self, step: StepKind, data: &FormData) -> FormErrors {
        let mut errors = FormErrors::new();
        for rule in self.rules.rules_for(step) {
            if errors.contains(rule.field) {
                continue;
            }
            if !rule.check.passes(data.get(rule.field), data, rule.field) {
                errors.insert(rule.field, rule.message.clone());
            }
        }
        errors
    }
}

impl Default for StepValidator {
    fn default() -> Self {
        Self::new(RuleTable::standard())
    }
}

//! Form values and form errors for the booking wizard.

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Every field the wizard can collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    NumberOfWheels,
    VehicleType,
    VehicleModel,
    StartDate,
    EndDate,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Phone,
        FormField::NumberOfWheels,
        FormField::VehicleType,
        FormField::VehicleModel,
        FormField::StartDate,
        FormField::EndDate,
    ];

    /// The wire / display key of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::NumberOfWheels => "numberOfWheels",
            FormField::VehicleType => "vehicleType",
            FormField::VehicleModel => "vehicleModel",
            FormField::StartDate => "startDate",
            FormField::EndDate => "endDate",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("field", format!("unknown field '{}'", s)))
    }
}

/// Current values of every form field.
///
/// Every field is always present; unset fields hold the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub number_of_wheels: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub start_date: String,
    pub end_date: String,
}

impl FormData {
    /// Returns the current value of a field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::NumberOfWheels => &self.number_of_wheels,
            FormField::VehicleType => &self.vehicle_type,
            FormField::VehicleModel => &self.vehicle_model,
            FormField::StartDate => &self.start_date,
            FormField::EndDate => &self.end_date,
        }
    }

    /// Overwrites the value of a field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    /// Returns true if the field holds something other than whitespace.
    pub fn is_filled(&self, field: FormField) -> bool {
        !self.get(field).trim().is_empty()
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::NumberOfWheels => &mut self.number_of_wheels,
            FormField::VehicleType => &mut self.vehicle_type,
            FormField::VehicleModel => &mut self.vehicle_model,
            FormField::StartDate => &mut self.start_date,
            FormField::EndDate => &mut self.end_date,
        }
    }
}

/// Key of an entry in [`FormErrors`]: a field, or the form-level `general` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKey {
    Field(FormField),
    General,
}

impl ErrorKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKey::Field(field) => field.as_str(),
            ErrorKey::General => "general",
        }
    }
}

impl From<FormField> for ErrorKey {
    fn from(field: FormField) -> Self {
        ErrorKey::Field(field)
    }
}

/// Sparse map of human-readable errors. A missing key means "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<ErrorKey, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<ErrorKey>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    pub fn remove(&mut self, key: impl Into<ErrorKey>) -> Option<String> {
        self.0.remove(&key.into())
    }

    pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&str> {
        self.0.get(&key.into()).map(String::as_str)
    }

    pub fn contains(&self, key: impl Into<ErrorKey>) -> bool {
        self.0.contains_key(&key.into())
    }

    /// The form-level error, if any.
    pub fn general(&self) -> Option<&str> {
        self.get(ErrorKey::General)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields that currently carry an error, in declaration order.
    pub fn fields(&self) -> Vec<FormField> {
        self.0
            .keys()
            .filter_map(|k| match k {
                ErrorKey::Field(f) => Some(*f),
                ErrorKey::General => None,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ErrorKey, &String)> {
        self.0.iter()
    }
}

impl Serialize for FormErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl<K: Into<ErrorKey>, V: Into<String>> FromIterator<(K, V)> for FormErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

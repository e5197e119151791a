//! Catalogue entries: vehicle types and the models beneath them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ValidationError, VehicleModelId, VehicleTypeId};

/// A category of vehicle, owning many models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleType {
    pub id: VehicleTypeId,
    pub name: String,
    /// Number of wheels; any positive integer.
    pub wheels: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VehicleType {
    /// Creates a vehicle type, rejecting a zero wheel count.
    pub fn new(
        id: VehicleTypeId,
        name: impl Into<String>,
        wheels: u32,
    ) -> Result<Self, ValidationError> {
        if wheels == 0 {
            return Err(ValidationError::out_of_range("wheels", 1, i64::from(u32::MAX), 0));
        }
        Ok(Self {
            id,
            name: name.into(),
            wheels,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A concrete rentable vehicle, many-to-one with [`VehicleType`].
///
/// The backend has shipped two schemas (`name`/`typeId` and
/// `model_name`/`type_id`); both deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleModel {
    pub id: VehicleModelId,
    #[serde(rename = "model_name", alias = "name")]
    pub name: String,
    #[serde(rename = "type_id", alias = "typeId")]
    pub type_id: VehicleTypeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl VehicleModel {
    pub fn new(id: VehicleModelId, name: impl Into<String>, type_id: VehicleTypeId) -> Self {
        Self {
            id,
            name: name.into(),
            type_id,
            registration_number: None,
            is_active: true,
        }
    }

    pub fn with_registration(mut self, registration_number: impl Into<String>) -> Self {
        self.registration_number = Some(registration_number.into());
        self
    }

    /// Returns true if this model belongs to the given type.
    pub fn belongs_to(&self, type_id: &VehicleTypeId) -> bool {
        &self.type_id == type_id
    }
}

/// Keeps only the types with the requested wheel count.
///
/// Used when the catalogue cannot filter server-side.
pub fn filter_types_by_wheels(types: Vec<VehicleType>, wheels: u32) -> Vec<VehicleType> {
    types.into_iter().filter(|t| t.wheels == wheels).collect()
}

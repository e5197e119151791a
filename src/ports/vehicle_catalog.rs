//! Vehicle Catalog Port - Vehicle types, models and availability.

use async_trait::async_trait;

use crate::domain::foundation::{DateRange, VehicleModelId, VehicleTypeId};
use crate::domain::vehicle::{AvailabilityReport, VehicleModel, VehicleType};

use super::ServiceError;

/// Port for the vehicle catalogue.
///
/// Backends differ in whether they filter types by wheel count themselves;
/// callers check [`supports_wheel_filter`](Self::supports_wheel_filter) and
/// filter on their side when it returns false.
#[async_trait]
pub trait VehicleCatalog: Send + Sync {
    /// Lists vehicle types, restricted to `wheels` when given and supported.
    async fn list_types(&self, wheels: Option<u32>) -> Result<Vec<VehicleType>, ServiceError>;

    /// Whether `list_types(Some(n))` is filtered by the catalogue.
    fn supports_wheel_filter(&self) -> bool {
        true
    }

    /// Lists the models belonging to `type_id`.
    async fn list_models(&self, type_id: &VehicleTypeId)
        -> Result<Vec<VehicleModel>, ServiceError>;

    /// Checks whether `vehicle_id` is free for `period`.
    async fn check_availability(
        &self,
        vehicle_id: &VehicleModelId,
        period: &DateRange,
    ) -> Result<AvailabilityReport, ServiceError>;
}

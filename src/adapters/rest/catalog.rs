//! REST implementation of [`VehicleCatalog`].

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::{BookingId, DateRange, VehicleModelId, VehicleTypeId};
use crate::domain::vehicle::{AvailabilityReport, VehicleModel, VehicleType};
use crate::ports::{ServiceError, VehicleCatalog};

use super::RestClient;

/// Availability payload; conflicting bookings arrive as full booking objects.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityWire {
    available: bool,
    #[serde(default)]
    conflicting_bookings: Vec<BookingRef>,
}

#[derive(Debug, Deserialize)]
struct BookingRef {
    id: BookingId,
}

impl From<AvailabilityWire> for AvailabilityReport {
    fn from(wire: AvailabilityWire) -> Self {
        AvailabilityReport {
            available: wire.available,
            conflicting_bookings: wire.conflicting_bookings.into_iter().map(|b| b.id).collect(),
        }
    }
}

pub struct RestVehicleCatalog {
    client: RestClient,
}

impl RestVehicleCatalog {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VehicleCatalog for RestVehicleCatalog {
    async fn list_types(&self, wheels: Option<u32>) -> Result<Vec<VehicleType>, ServiceError> {
        match wheels {
            Some(n) if self.supports_wheel_filter() => {
                self.client
                    .get(&format!("vehicle-types/wheels/{}", n), &[])
                    .await
            }
            _ => self.client.get("vehicle-types", &[]).await,
        }
    }

    fn supports_wheel_filter(&self) -> bool {
        self.client.config().server_wheel_filter
    }

    async fn list_models(&self, type_id: &VehicleTypeId) -> Result<Vec<VehicleModel>, ServiceError> {
        self.client
            .get(&format!("vehicles/type/{}", type_id), &[])
            .await
    }

    async fn check_availability(
        &self,
        vehicle_id: &VehicleModelId,
        period: &DateRange,
    ) -> Result<AvailabilityReport, ServiceError> {
        let query = [
            ("startDate", period.start_datetime()),
            ("endDate", period.end_datetime()),
        ];
        let wire: AvailabilityWire = self
            .client
            .get(&format!("vehicles/{}/availability", vehicle_id), &query)
            .await?;
        Ok(wire.into())
    }
}

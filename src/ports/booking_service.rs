//! Booking Service Port - Creation of bookings.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::booking::{Booker, BookingConfirmation};
use crate::domain::foundation::{DateRange, VehicleModelId};

use super::ServiceError;

/// Data sent to create a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(flatten)]
    pub booker: Booker,
    pub vehicle_id: VehicleModelId,
    #[serde(skip)]
    pub period: DateRange,
    /// Full ISO-8601 start, e.g. `2024-06-01T00:00:00.000Z`.
    pub start_date: String,
    pub end_date: String,
}

impl CreateBookingRequest {
    pub fn new(booker: Booker, vehicle_id: VehicleModelId, period: DateRange) -> Self {
        Self {
            booker,
            vehicle_id,
            start_date: period.start_datetime(),
            end_date: period.end_datetime(),
            period,
        }
    }
}

/// Port for the booking service.
///
/// Failures carry an HTTP-like status: 409 when the vehicle is already
/// booked for an overlapping period, 400 for invalid data, 404 for an
/// unknown vehicle.
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingConfirmation, ServiceError>;
}

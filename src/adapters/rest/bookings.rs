//! REST implementation of [`BookingService`].

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::booking::BookingConfirmation;
use crate::domain::foundation::{BookingId, BookingStatus, DateRange, UserId, VehicleModelId};
use crate::ports::{BookingService, CreateBookingRequest, ServiceError};

use super::RestClient;

/// Booking as returned by `POST /bookings`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingWire {
    id: BookingId,
    #[serde(default)]
    user_id: Option<UserId>,
    vehicle_id: VehicleModelId,
    start_date: String,
    end_date: String,
    #[serde(default)]
    status: BookingStatus,
}

impl TryFrom<BookingWire> for BookingConfirmation {
    type Error = ServiceError;

    fn try_from(wire: BookingWire) -> Result<Self, Self::Error> {
        let period = DateRange::parse(&wire.start_date, &wire.end_date)
            .map_err(|e| ServiceError::decode(e.to_string()))?;
        Ok(BookingConfirmation {
            booking_id: wire.id,
            vehicle_id: wire.vehicle_id,
            period,
            status: wire.status,
            user_id: wire.user_id,
        })
    }
}

pub struct RestBookingService {
    client: RestClient,
}

impl RestBookingService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BookingService for RestBookingService {
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingConfirmation, ServiceError> {
        let wire: BookingWire = self.client.post("bookings", &request).await?;
        let confirmation = BookingConfirmation::try_from(wire)?;
        tracing::info!(
            booking_id = %confirmation.booking_id,
            vehicle_id = %confirmation.vehicle_id,
            "booking created"
        );
        Ok(confirmation)
    }
}

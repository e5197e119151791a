//! Availability rules: a vehicle is free for a range iff no overlapping,
//! non-cancelled booking exists for it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, BookingStatus, DateRange, VehicleModelId};

/// A booking as seen by the availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedPeriod {
    pub booking_id: BookingId,
    pub vehicle_id: VehicleModelId,
    pub period: DateRange,
    pub status: BookingStatus,
}

impl BookedPeriod {
    /// Returns true if this booking prevents renting `vehicle` for `range`.
    pub fn conflicts_with(&self, vehicle: &VehicleModelId, range: &DateRange) -> bool {
        &self.vehicle_id == vehicle && self.status.blocks_vehicle() && range.overlaps(&self.period)
    }
}

/// Outcome of an availability check for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub available: bool,
    #[serde(default)]
    pub conflicting_bookings: Vec<BookingId>,
}

impl AvailabilityReport {
    pub fn available() -> Self {
        Self {
            available: true,
            conflicting_bookings: Vec::new(),
        }
    }
}

/// Checks `vehicle` against every known booking for `range`.
pub fn check_availability<'a>(
    bookings: impl IntoIterator<Item = &'a BookedPeriod>,
    vehicle: &VehicleModelId,
    range: &DateRange,
) -> AvailabilityReport {
    let conflicting_bookings: Vec<BookingId> = bookings
        .into_iter()
        .filter(|b| b.conflicts_with(vehicle, range))
        .map(|b| b.booking_id.clone())
        .collect();

    AvailabilityReport {
        available: conflicting_bookings.is_empty(),
        conflicting_bookings,
    }
}

//! In-process rental backend implementing every collaborator port.
//!
//! Seeded with the standard catalogue (five types, ten models). Bookings and
//! users live behind `tokio::sync::RwLock`s so the backend can be shared
//! across tasks with an `Arc`.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::booking::{Booker, BookingConfirmation};
use crate::domain::foundation::{
    BookingId, BookingStatus, DateRange, DomainError, ErrorCode, StateMachine, UserId,
    ValidationError, VehicleModelId, VehicleTypeId,
};
use crate::domain::vehicle::{
    check_availability, AvailabilityReport, BookedPeriod, VehicleModel, VehicleType,
};
use crate::ports::{
    BookingService, CreateBookingRequest, NewUser, ServiceError, UserDirectory, UserRecord,
    VehicleCatalog,
};

const FIXTURE_TYPES: [(&str, &str, u32); 5] = [
    ("1", "Motorcycle", 2),
    ("2", "Scooter", 2),
    ("3", "Sedan", 4),
    ("4", "SUV", 4),
    ("5", "Truck", 4),
];

const FIXTURE_MODELS: [(&str, &str, &str); 10] = [
    ("1", "Honda CBR600RR", "1"),
    ("2", "Yamaha YZF-R6", "1"),
    ("3", "Honda PCX 150", "2"),
    ("4", "Vespa Primavera", "2"),
    ("5", "Toyota Camry", "3"),
    ("6", "Honda Accord", "3"),
    ("7", "Toyota RAV4", "4"),
    ("8", "Honda CR-V", "4"),
    ("9", "Ford F-150", "5"),
    ("10", "Chevrolet Silverado", "5"),
];

#[derive(Debug, Clone)]
pub struct InMemoryRentalBackend {
    types: Vec<VehicleType>,
    models: Vec<VehicleModel>,
    bookings: Arc<RwLock<Vec<BookedPeriod>>>,
    users: Arc<RwLock<Vec<UserRecord>>>,
    wheel_filter: bool,
}

impl InMemoryRentalBackend {
    /// Creates a backend over the given catalogue, with no bookings or users.
    pub fn new(types: Vec<VehicleType>, models: Vec<VehicleModel>) -> Self {
        Self {
            types,
            models,
            bookings: Arc::new(RwLock::new(Vec::new())),
            users: Arc::new(RwLock::new(Vec::new())),
            wheel_filter: true,
        }
    }

    /// Creates a backend seeded with the standard catalogue.
    pub fn seeded() -> Result<Self, ValidationError> {
        let types = FIXTURE_TYPES
            .iter()
            .map(|(id, name, wheels)| VehicleType::new(VehicleTypeId::new(*id)?, *name, *wheels))
            .collect::<Result<Vec<_>, _>>()?;
        let models = FIXTURE_MODELS
            .iter()
            .map(|(id, name, type_id)| {
                Ok(VehicleModel::new(
                    VehicleModelId::new(*id)?,
                    *name,
                    VehicleTypeId::new(*type_id)?,
                ))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        Ok(Self::new(types, models))
    }

    /// Makes `list_types` ignore the wheel filter, like older backends.
    pub fn without_wheel_filter(mut self) -> Self {
        self.wheel_filter = false;
        self
    }

    /// Pre-loads existing bookings.
    pub fn with_bookings(self, bookings: Vec<BookedPeriod>) -> Self {
        Self {
            bookings: Arc::new(RwLock::new(bookings)),
            ..self
        }
    }

    /// Snapshot of every booking, including cancelled ones.
    pub async fn bookings(&self) -> Vec<BookedPeriod> {
        self.bookings.read().await.clone()
    }

    pub async fn users(&self) -> Vec<UserRecord> {
        self.users.read().await.clone()
    }

    /// Cancels a booking, freeing its vehicle for the period.
    pub async fn cancel_booking(&self, id: &BookingId) -> Result<BookingStatus, DomainError> {
        self.transition_booking(id, BookingStatus::Cancelled).await
    }

    /// Confirms a pending booking.
    pub async fn confirm_booking(&self, id: &BookingId) -> Result<BookingStatus, DomainError> {
        self.transition_booking(id, BookingStatus::Confirmed).await
    }

    async fn transition_booking(
        &self,
        id: &BookingId,
        target: BookingStatus,
    ) -> Result<BookingStatus, DomainError> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| &b.booking_id == id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::BookingNotFound, format!("Booking {} not found", id))
            })?;

        booking.status = booking.status.transition_to(target).map_err(|e| {
            DomainError::invalid_transition(e.to_string()).with_detail("booking_id", id.to_string())
        })?;
        Ok(booking.status)
    }

    fn find_model(&self, id: &VehicleModelId) -> Option<&VehicleModel> {
        self.models.iter().find(|m| &m.id == id && m.is_active)
    }

    fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl VehicleCatalog for InMemoryRentalBackend {
    async fn list_types(&self, wheels: Option<u32>) -> Result<Vec<VehicleType>, ServiceError> {
        Ok(self
            .types
            .iter()
            .filter(|t| !self.wheel_filter || wheels.map_or(true, |w| t.wheels == w))
            .cloned()
            .collect())
    }

    fn supports_wheel_filter(&self) -> bool {
        self.wheel_filter
    }

    async fn list_models(&self, type_id: &VehicleTypeId) -> Result<Vec<VehicleModel>, ServiceError> {
        Ok(self
            .models
            .iter()
            .filter(|m| m.belongs_to(type_id) && m.is_active)
            .cloned()
            .collect())
    }

    async fn check_availability(
        &self,
        vehicle_id: &VehicleModelId,
        period: &DateRange,
    ) -> Result<AvailabilityReport, ServiceError> {
        if self.find_model(vehicle_id).is_none() {
            return Err(ServiceError::not_found("Vehicle not found"));
        }
        let bookings = self.bookings.read().await;
        Ok(check_availability(bookings.iter(), vehicle_id, period))
    }
}

#[async_trait]
impl BookingService for InMemoryRentalBackend {
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingConfirmation, ServiceError> {
        let user_id = match &request.booker {
            Booker::Named {
                first_name,
                last_name,
            } => {
                if first_name.trim().is_empty() || last_name.trim().is_empty() {
                    return Err(ServiceError::bad_request(
                        "First name and last name are required",
                    ));
                }
                None
            }
            Booker::User { user_id } => {
                if !self.users.read().await.iter().any(|u| &u.id == user_id) {
                    return Err(ServiceError::not_found("User not found"));
                }
                Some(user_id.clone())
            }
        };

        if self.find_model(&request.vehicle_id).is_none() {
            return Err(ServiceError::not_found("Vehicle not found"));
        }

        let mut bookings = self.bookings.write().await;
        let report = check_availability(bookings.iter(), &request.vehicle_id, &request.period);
        if !report.available {
            return Err(ServiceError::conflict(
                "Vehicle is not available for the selected dates",
            ));
        }

        let booking_id =
            BookingId::new(Self::new_id()).map_err(|e| ServiceError::decode(e.to_string()))?;
        bookings.push(BookedPeriod {
            booking_id: booking_id.clone(),
            vehicle_id: request.vehicle_id.clone(),
            period: request.period,
            status: BookingStatus::Pending,
        });

        Ok(BookingConfirmation {
            booking_id,
            vehicle_id: request.vehicle_id,
            period: request.period,
            status: BookingStatus::Pending,
            user_id,
        })
    }
}

#[async_trait]
impl UserDirectory for InMemoryRentalBackend {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, ServiceError> {
        if user.email.trim().is_empty() {
            return Err(ServiceError::bad_request("Email is required"));
        }
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.has_email(&user.email)) {
            return Err(ServiceError::conflict("User with this email already exists"));
        }

        let record = UserRecord {
            id: UserId::new(Self::new_id()).map_err(|e| ServiceError::decode(e.to_string()))?,
            first_name: user.first_name,
            last_name: user.last_name,
            email: Some(user.email.trim().to_string()),
            phone: user.phone,
        };
        users.push(record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ServiceError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.has_email(email))
            .cloned())
    }
}

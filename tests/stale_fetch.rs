//! Integration tests for overlapping fetches and in-flight submissions.
//!
//! Collaborator responses are held back behind oneshot gates so each test
//! decides the order in which they resolve.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use booking_wizard::adapters::InMemoryNotificationCenter;
use booking_wizard::application::{
    AdvanceOutcome, BookingWizard, DependentResourceLoader, LoadOutcome, SubmissionGateway,
    WheelFilter, WizardSettings,
};
use booking_wizard::application::wizard::BOOKING_CREATED;
use booking_wizard::domain::booking::{BookingConfirmation, FormField, StepSequence};
use booking_wizard::domain::foundation::{
    BookingId, BookingStatus, DateRange, ErrorCode, VehicleModelId, VehicleTypeId,
};
use booking_wizard::domain::vehicle::{AvailabilityReport, VehicleModel, VehicleType};
use booking_wizard::ports::{BookingService, CreateBookingRequest, ServiceError, VehicleCatalog};

// ════════════════════════════════════════════════════════════════════════════
// Mock Implementations
// ════════════════════════════════════════════════════════════════════════════

type Gate<T> = oneshot::Receiver<Result<T, ServiceError>>;

/// Catalogue that answers each call with the next queued gate, in call order.
#[derive(Default)]
struct GatedCatalog {
    type_gates: Mutex<VecDeque<Gate<Vec<VehicleType>>>>,
    model_gates: Mutex<VecDeque<Gate<Vec<VehicleModel>>>>,
    checked_periods: Mutex<Vec<DateRange>>,
}

impl GatedCatalog {
    fn gate_types(&self) -> oneshot::Sender<Result<Vec<VehicleType>, ServiceError>> {
        let (tx, rx) = oneshot::channel();
        self.type_gates.lock().unwrap().push_back(rx);
        tx
    }

    fn gate_models(&self) -> oneshot::Sender<Result<Vec<VehicleModel>, ServiceError>> {
        let (tx, rx) = oneshot::channel();
        self.model_gates.lock().unwrap().push_back(rx);
        tx
    }
}

async fn open<T>(gate: Option<Gate<T>>) -> Result<T, ServiceError> {
    match gate {
        Some(rx) => rx
            .await
            .unwrap_or_else(|_| Err(ServiceError::network("gate dropped"))),
        None => Err(ServiceError::network("no gate queued")),
    }
}

#[async_trait]
impl VehicleCatalog for GatedCatalog {
    async fn list_types(&self, _wheels: Option<u32>) -> Result<Vec<VehicleType>, ServiceError> {
        let gate = self.type_gates.lock().unwrap().pop_front();
        open(gate).await
    }

    async fn list_models(&self, _type_id: &VehicleTypeId) -> Result<Vec<VehicleModel>, ServiceError> {
        let gate = self.model_gates.lock().unwrap().pop_front();
        open(gate).await
    }

    async fn check_availability(
        &self,
        _vehicle_id: &VehicleModelId,
        period: &DateRange,
    ) -> Result<AvailabilityReport, ServiceError> {
        self.checked_periods.lock().unwrap().push(*period);
        Ok(AvailabilityReport::available())
    }
}

/// Booking service that holds every request until released.
#[derive(Default)]
struct GatedBookingService {
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    received: Mutex<Vec<CreateBookingRequest>>,
}

impl GatedBookingService {
    fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl BookingService for GatedBookingService {
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingConfirmation, ServiceError> {
        self.received.lock().unwrap().push(request.clone());
        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(rx) = gate {
            rx.await.map_err(|_| ServiceError::network("gate dropped"))?;
        }
        Ok(BookingConfirmation {
            booking_id: BookingId::new("b-1").unwrap(),
            vehicle_id: request.vehicle_id,
            period: request.period,
            status: BookingStatus::Pending,
            user_id: None,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn wizard(catalog: Arc<GatedCatalog>, bookings: Arc<GatedBookingService>) -> BookingWizard {
    BookingWizard::new(
        WizardSettings::new(StepSequence::compact()),
        DependentResourceLoader::new(catalog, WheelFilter::Server),
        SubmissionGateway::direct(bookings),
        Arc::new(InMemoryNotificationCenter::default()),
    )
    .unwrap()
}

fn vehicle_type(id: &str, name: &str, wheels: u32) -> VehicleType {
    VehicleType::new(VehicleTypeId::new(id).unwrap(), name, wheels).unwrap()
}

fn vehicle_model(id: &str, name: &str, type_id: &str) -> VehicleModel {
    VehicleModel::new(
        VehicleModelId::new(id).unwrap(),
        name,
        VehicleTypeId::new(type_id).unwrap(),
    )
}

fn names<T>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|i| name(i).to_string()).collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn older_type_fetch_resolving_last_is_discarded() {
    let catalog = Arc::new(GatedCatalog::default());
    let gate_a = catalog.gate_types();
    let gate_b = catalog.gate_types();
    let wizard = wizard(catalog.clone(), Arc::new(GatedBookingService::default()));

    let (a, b, _) = tokio::join!(
        wizard.set_field(FormField::NumberOfWheels, "2"),
        wizard.set_field(FormField::NumberOfWheels, "4"),
        async {
            gate_b
                .send(Ok(vec![vehicle_type("3", "Sedan", 4)]))
                .unwrap();
            tokio::task::yield_now().await;
            gate_a
                .send(Ok(vec![vehicle_type("1", "Motorcycle", 2)]))
                .unwrap();
        }
    );

    assert_eq!(a.unwrap(), LoadOutcome::Discarded);
    assert_eq!(b.unwrap(), LoadOutcome::Committed(1));

    let snap = wizard.snapshot().await;
    assert_eq!(names(snap.vehicle_types.items(), |t| t.name.as_str()), vec!["Sedan"]);
    assert!(!snap.vehicle_types.is_loading());
    assert_eq!(snap.form_data.number_of_wheels, "4");
}

#[tokio::test]
async fn older_model_fetch_resolving_last_is_discarded() {
    let catalog = Arc::new(GatedCatalog::default());
    let gate_a = catalog.gate_models();
    let gate_b = catalog.gate_models();
    let wizard = wizard(catalog.clone(), Arc::new(GatedBookingService::default()));

    let (a, b, _) = tokio::join!(
        wizard.set_field(FormField::VehicleType, "3"),
        wizard.set_field(FormField::VehicleType, "4"),
        async {
            gate_b
                .send(Ok(vec![vehicle_model("7", "Toyota RAV4", "4")]))
                .unwrap();
            tokio::task::yield_now().await;
            gate_a
                .send(Ok(vec![vehicle_model("5", "Toyota Camry", "3")]))
                .unwrap();
        }
    );

    assert_eq!(a.unwrap(), LoadOutcome::Discarded);
    assert_eq!(b.unwrap(), LoadOutcome::Committed(1));

    let snap = wizard.snapshot().await;
    assert_eq!(
        names(snap.vehicle_models.items(), |m| m.name.as_str()),
        vec!["Toyota RAV4"]
    );
    assert_eq!(snap.form_data.vehicle_type, "4");
}

#[tokio::test]
async fn stale_failure_does_not_raise_an_error() {
    let catalog = Arc::new(GatedCatalog::default());
    let gate_a = catalog.gate_types();
    let gate_b = catalog.gate_types();
    let wizard = wizard(catalog.clone(), Arc::new(GatedBookingService::default()));

    let (a, b, _) = tokio::join!(
        wizard.set_field(FormField::NumberOfWheels, "2"),
        wizard.set_field(FormField::NumberOfWheels, "4"),
        async {
            gate_b
                .send(Ok(vec![vehicle_type("3", "Sedan", 4)]))
                .unwrap();
            tokio::task::yield_now().await;
            gate_a
                .send(Err(ServiceError::Timeout { timeout_secs: 10 }))
                .unwrap();
        }
    );

    assert_eq!(a.unwrap(), LoadOutcome::Discarded);
    assert_eq!(b.unwrap(), LoadOutcome::Committed(1));
    let snap = wizard.snapshot().await;
    assert_eq!(snap.form_errors.general(), None);
    assert_eq!(snap.vehicle_types.error(), None);
}

#[tokio::test]
async fn clearing_the_parent_discards_the_in_flight_fetch() {
    let catalog = Arc::new(GatedCatalog::default());
    let gate = catalog.gate_types();
    let wizard = wizard(catalog.clone(), Arc::new(GatedBookingService::default()));

    let (first, cleared, _) = tokio::join!(
        wizard.set_field(FormField::NumberOfWheels, "2"),
        wizard.set_field(FormField::NumberOfWheels, ""),
        async {
            tokio::task::yield_now().await;
            gate.send(Ok(vec![vehicle_type("1", "Motorcycle", 2)])).unwrap();
        }
    );

    assert_eq!(first.unwrap(), LoadOutcome::Discarded);
    assert_eq!(cleared.unwrap(), LoadOutcome::Skipped);
    assert!(wizard.snapshot().await.vehicle_types.items().is_empty());
}

#[tokio::test]
async fn next_is_disabled_while_a_list_is_loading() {
    let catalog = Arc::new(GatedCatalog::default());
    let gate = catalog.gate_types();
    let wizard = wizard(catalog.clone(), Arc::new(GatedBookingService::default()));

    let (outcome, loading) = tokio::join!(wizard.set_field(FormField::NumberOfWheels, "4"), async {
        let snap = wizard.snapshot().await;
        gate.send(Ok(vec![vehicle_type("3", "Sedan", 4)])).unwrap();
        snap
    });

    assert!(loading.vehicle_types.is_loading());
    assert!(loading.next_disabled);
    assert_eq!(outcome.unwrap(), LoadOutcome::Committed(1));
    assert!(!wizard.snapshot().await.next_disabled);
}

#[tokio::test]
async fn edits_and_navigation_are_refused_while_submitting() {
    let bookings = Arc::new(GatedBookingService::default());
    let release = bookings.gate();
    let wizard = wizard(Arc::new(GatedCatalog::default()), bookings.clone());

    // catalogue calls fail here; the selections themselves are kept
    wizard.set_field(FormField::FirstName, "Jo").await.unwrap();
    wizard.set_field(FormField::LastName, "Doe").await.unwrap();
    wizard.advance().await.unwrap();
    for (field, value) in [
        (FormField::NumberOfWheels, "4"),
        (FormField::VehicleType, "3"),
        (FormField::VehicleModel, "5"),
    ] {
        wizard.set_field(field, value).await.unwrap();
        wizard.advance().await.unwrap();
    }
    wizard.set_field(FormField::StartDate, "2024-06-01").await.unwrap();
    wizard.set_field(FormField::EndDate, "2024-06-05").await.unwrap();

    let (submitted, refused) = tokio::join!(wizard.advance(), async {
        let snap = wizard.snapshot().await;
        let edit = wizard.set_field(FormField::FirstName, "Sam").await;
        let back = wizard.retreat().await;
        let again = wizard.advance().await;
        release.send(()).unwrap();
        (snap, edit, back, again)
    });

    let (snap, edit, back, again) = refused;
    assert!(snap.is_submitting);
    assert!(snap.next_disabled);
    assert!(!snap.can_go_back);
    assert_eq!(edit.unwrap_err().code, ErrorCode::SubmissionInProgress);
    assert_eq!(back.unwrap_err().code, ErrorCode::SubmissionInProgress);
    assert_eq!(again.unwrap_err().code, ErrorCode::SubmissionInProgress);

    assert!(matches!(submitted.unwrap(), AdvanceOutcome::Submitted(_)));
    assert_eq!(bookings.received.lock().unwrap().len(), 1);
    assert_eq!(wizard.snapshot().await.current_step, 1);
}

#[tokio::test]
async fn reset_is_refused_while_submitting_and_the_outcome_still_lands() {
    let bookings = Arc::new(GatedBookingService::default());
    let release = bookings.gate();
    let wizard = wizard(Arc::new(GatedCatalog::default()), bookings.clone());

    wizard.set_field(FormField::FirstName, "Jo").await.unwrap();
    wizard.set_field(FormField::LastName, "Doe").await.unwrap();
    wizard.advance().await.unwrap();
    for (field, value) in [
        (FormField::NumberOfWheels, "4"),
        (FormField::VehicleType, "3"),
        (FormField::VehicleModel, "5"),
    ] {
        wizard.set_field(field, value).await.unwrap();
        wizard.advance().await.unwrap();
    }
    wizard.set_date_range("2024-06-01", "2024-06-05").await.unwrap();

    let (submitted, (reset, edit, during)) = tokio::join!(wizard.advance(), async {
        let reset = wizard.reset().await;
        let edit = wizard.set_field(FormField::FirstName, "Sam").await;
        let during = wizard.snapshot().await;
        release.send(()).unwrap();
        (reset, edit, during)
    });

    assert_eq!(reset.unwrap_err().code, ErrorCode::SubmissionInProgress);
    assert_eq!(edit.unwrap_err().code, ErrorCode::SubmissionInProgress);
    assert!(during.is_submitting);
    assert_eq!(during.current_step, 5);
    assert_eq!(during.form_data.first_name, "Jo");

    assert!(matches!(submitted.unwrap(), AdvanceOutcome::Submitted(_)));
    assert_eq!(bookings.received.lock().unwrap().len(), 1);

    let after = wizard.snapshot().await;
    assert_eq!(after.current_step, 1);
    assert!(after.form_data.first_name.is_empty());
    let messages: Vec<_> = wizard.notifications().await.into_iter().map(|n| n.message).collect();
    assert!(messages.iter().any(|m| m == BOOKING_CREATED));
}

#[tokio::test]
async fn date_reaction_checks_the_period_held_by_the_store() {
    let catalog = Arc::new(GatedCatalog::default());
    for _ in 0..3 {
        catalog
            .gate_models()
            .send(Ok(vec![vehicle_model("5", "Toyota Camry", "3")]))
            .unwrap();
    }
    let wizard = wizard(catalog.clone(), Arc::new(GatedBookingService::default()));

    assert_eq!(
        wizard.set_field(FormField::VehicleType, "3").await.unwrap(),
        LoadOutcome::Committed(1)
    );
    wizard.set_field(FormField::StartDate, "2024-06-01").await.unwrap();
    assert_eq!(
        wizard.set_field(FormField::EndDate, "2024-06-05").await.unwrap(),
        LoadOutcome::Committed(1)
    );
    wizard.set_field(FormField::EndDate, "2024-06-09").await.unwrap();

    let checked = catalog.checked_periods.lock().unwrap().clone();
    assert_eq!(
        checked,
        vec![
            DateRange::parse("2024-06-01", "2024-06-05").unwrap(),
            DateRange::parse("2024-06-01", "2024-06-09").unwrap(),
        ]
    );
}

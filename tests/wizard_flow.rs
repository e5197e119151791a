//! End-to-end tests for the booking wizard against the in-memory backend.
//!
//! These tests drive the public controller API the way a display layer
//! would: set fields, advance, and inspect snapshots and notifications.

use std::sync::Arc;

use booking_wizard::adapters::{InMemoryNotificationCenter, InMemoryRentalBackend};
use booking_wizard::application::{
    AdvanceOutcome, BookingWizard, DependentResourceLoader, LoadOutcome, SubmissionGateway,
    WheelFilter, WizardSettings,
};
use booking_wizard::domain::booking::{
    BookingError, FormData, FormField, NotificationKind, StepKind, StepSequence,
};
use booking_wizard::domain::foundation::{BookingId, BookingStatus, DateRange, VehicleModelId};
use booking_wizard::domain::vehicle::BookedPeriod;
use booking_wizard::ports::NotificationSink;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Fixture {
    wizard: BookingWizard,
    backend: InMemoryRentalBackend,
    notifications: Arc<InMemoryNotificationCenter>,
}

impl Fixture {
    fn direct(steps: StepSequence, backend: InMemoryRentalBackend) -> Self {
        let shared = Arc::new(backend.clone());
        Self::build(steps, backend, SubmissionGateway::direct(shared))
    }

    fn upsert_user(steps: StepSequence, backend: InMemoryRentalBackend) -> Self {
        let shared = Arc::new(backend.clone());
        Self::build(
            steps,
            backend,
            SubmissionGateway::upsert_user(shared.clone(), shared),
        )
    }

    fn build(steps: StepSequence, backend: InMemoryRentalBackend, gateway: SubmissionGateway) -> Self {
        let notifications = Arc::new(InMemoryNotificationCenter::default());
        let wizard = BookingWizard::new(
            WizardSettings::new(steps),
            DependentResourceLoader::new(Arc::new(backend.clone()), WheelFilter::Server),
            gateway,
            notifications.clone(),
        )
        .expect("wizard builds");
        Self {
            wizard,
            backend,
            notifications,
        }
    }

    /// Fills every step with the given values and advances up to the last one.
    async fn fill_until_last(&self, values: &Values) {
        let steps: Vec<StepKind> = self.wizard.steps().iter().copied().collect();
        let last = steps.len();
        for (index, step) in steps.into_iter().enumerate() {
            self.fill(step, values).await;
            if index + 1 < last {
                let outcome = self.wizard.advance().await.unwrap();
                assert_eq!(outcome, AdvanceOutcome::Advanced { step: index + 2 });
            }
        }
    }

    async fn fill(&self, step: StepKind, values: &Values) {
        let w = &self.wizard;
        match step {
            StepKind::Name => {
                w.set_field(FormField::FirstName, values.first_name).await.unwrap();
                w.set_field(FormField::LastName, values.last_name).await.unwrap();
            }
            StepKind::Contact => {
                w.set_field(FormField::Email, values.email).await.unwrap();
                w.set_field(FormField::Phone, values.phone).await.unwrap();
            }
            StepKind::DateRange => {
                w.set_date_range(values.start, values.end).await.unwrap();
            }
            StepKind::NumberOfWheels => {
                w.set_field(FormField::NumberOfWheels, values.wheels).await.unwrap();
            }
            StepKind::VehicleType => {
                w.set_field(FormField::VehicleType, values.vehicle_type).await.unwrap();
            }
            StepKind::VehicleModel => {
                w.set_field(FormField::VehicleModel, values.vehicle_model).await.unwrap();
            }
        }
    }
}

struct Values {
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    phone: &'static str,
    wheels: &'static str,
    vehicle_type: &'static str,
    vehicle_model: &'static str,
    start: &'static str,
    end: &'static str,
}

const CAMRY_IN_JUNE: Values = Values {
    first_name: "Jo",
    last_name: "Doe",
    email: "jo.doe@example.com",
    phone: "+1 555 0100",
    wheels: "4",
    vehicle_type: "3",
    vehicle_model: "5",
    start: "2024-06-01",
    end: "2024-06-05",
};

fn seeded() -> InMemoryRentalBackend {
    InMemoryRentalBackend::seeded().expect("fixture catalogue is valid")
}

fn camry_booked(start: &str, end: &str) -> BookedPeriod {
    BookedPeriod {
        booking_id: BookingId::new("existing").unwrap(),
        vehicle_id: VehicleModelId::new("5").unwrap(),
        period: DateRange::parse(start, end).unwrap(),
        status: BookingStatus::Confirmed,
    }
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn successful_booking_resets_wizard_to_first_step() {
    let fx = Fixture::direct(StepSequence::compact(), seeded());
    fx.fill_until_last(&CAMRY_IN_JUNE).await;

    let outcome = fx.wizard.advance().await.unwrap();

    let confirmation = match outcome {
        AdvanceOutcome::Submitted(confirmation) => confirmation,
        other => panic!("expected a confirmation, got {:?}", other),
    };
    assert_eq!(confirmation.vehicle_id.as_str(), "5");
    assert_eq!(confirmation.status, BookingStatus::Pending);

    let snap = fx.wizard.snapshot().await;
    assert_eq!(snap.current_step, 1);
    assert_eq!(snap.form_data, FormData::default());
    assert!(snap.form_errors.is_empty());
    assert!(snap.vehicle_types.items().is_empty());

    let active = fx.notifications.active().await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, NotificationKind::Success);
    assert_eq!(active[0].message, "Booking created successfully!");
}

#[tokio::test]
async fn conflicting_booking_keeps_last_step_and_form_data() {
    let backend = seeded().with_bookings(vec![camry_booked("2024-06-04", "2024-06-08")]);
    let fx = Fixture::direct(StepSequence::compact(), backend);
    fx.fill_until_last(&CAMRY_IN_JUNE).await;
    let before = fx.wizard.snapshot().await.form_data;

    let outcome = fx.wizard.advance().await.unwrap();

    assert_eq!(outcome, AdvanceOutcome::SubmissionFailed(BookingError::Unavailable));
    let snap = fx.wizard.snapshot().await;
    assert_eq!(snap.current_step, snap.total_steps);
    assert_eq!(snap.form_data, before);
    assert_eq!(
        snap.form_errors.general(),
        Some("Vehicle is not available for the selected dates. Please choose different dates.")
    );

    let active = fx.notifications.active().await;
    assert_eq!(active.last().map(|n| n.kind), Some(NotificationKind::Error));
    assert_eq!(fx.backend.bookings().await.len(), 1);
}

#[tokio::test]
async fn user_can_retry_after_choosing_other_dates() {
    let backend = seeded().with_bookings(vec![camry_booked("2024-06-04", "2024-06-08")]);
    let fx = Fixture::direct(StepSequence::compact(), backend);
    fx.fill_until_last(&CAMRY_IN_JUNE).await;
    fx.wizard.advance().await.unwrap();

    fx.wizard.set_date_range("2024-06-10", "2024-06-12").await.unwrap();
    let outcome = fx.wizard.advance().await.unwrap();

    assert!(matches!(outcome, AdvanceOutcome::Submitted(_)));
    assert_eq!(fx.backend.bookings().await.len(), 2);
}

#[tokio::test]
async fn unknown_vehicle_reports_not_found() {
    let fx = Fixture::direct(StepSequence::compact(), seeded());
    let values = Values {
        vehicle_model: "99",
        ..CAMRY_IN_JUNE
    };
    fx.fill_until_last(&values).await;

    let outcome = fx.wizard.advance().await.unwrap();

    assert_eq!(outcome, AdvanceOutcome::SubmissionFailed(BookingError::VehicleNotFound));
    assert_eq!(
        fx.wizard.snapshot().await.form_errors.general(),
        Some("Selected vehicle not found. Please refresh and try again.")
    );
}

#[tokio::test]
async fn six_step_flow_registers_user_then_reuses_it() {
    let fx = Fixture::upsert_user(StepSequence::extended(), seeded());

    fx.fill_until_last(&CAMRY_IN_JUNE).await;
    let first = fx.wizard.advance().await.unwrap();
    assert!(matches!(first, AdvanceOutcome::Submitted(_)));

    let later = Values {
        start: "2024-07-01",
        end: "2024-07-03",
        ..CAMRY_IN_JUNE
    };
    fx.fill_until_last(&later).await;
    let second = fx.wizard.advance().await.unwrap();

    let (a, b) = match (first, second) {
        (AdvanceOutcome::Submitted(a), AdvanceOutcome::Submitted(b)) => (a, b),
        other => panic!("expected two confirmations, got {:?}", other),
    };
    assert!(a.user_id.is_some());
    assert_eq!(a.user_id, b.user_id);
    assert_eq!(fx.backend.users().await.len(), 1);
    assert_eq!(fx.backend.bookings().await.len(), 2);
}

// =============================================================================
// Validation and navigation
// =============================================================================

#[tokio::test]
async fn every_step_reports_exactly_its_missing_fields() {
    let fx = Fixture::direct(StepSequence::extended(), seeded());
    let steps: Vec<StepKind> = fx.wizard.steps().iter().copied().collect();

    for (index, step) in steps.iter().enumerate() {
        let outcome = fx.wizard.advance().await.unwrap();
        let errors = match outcome {
            AdvanceOutcome::Invalid(errors) => errors,
            other => panic!("step {} should be invalid, got {:?}", step, other),
        };
        assert_eq!(errors.fields(), step.fields().to_vec(), "step {}", step);
        assert_eq!(fx.wizard.snapshot().await.current_step, index + 1);

        fx.fill(*step, &CAMRY_IN_JUNE).await;
        if index + 1 < steps.len() {
            fx.wizard.advance().await.unwrap();
        }
    }
}

#[tokio::test]
async fn failing_step_leaves_other_steps_errors_alone() {
    let fx = Fixture::direct(StepSequence::compact(), seeded());
    fx.fill(StepKind::Name, &CAMRY_IN_JUNE).await;
    fx.wizard.advance().await.unwrap();
    fx.wizard.advance().await.unwrap();
    fx.wizard.retreat().await.unwrap();
    fx.wizard.set_field(FormField::LastName, "").await.unwrap();

    fx.wizard.advance().await.unwrap();

    let errors = fx.wizard.snapshot().await.form_errors;
    assert_eq!(
        errors.fields(),
        vec![FormField::LastName, FormField::NumberOfWheels]
    );
}

#[tokio::test]
async fn retreat_never_validates_and_stops_at_first_step() {
    let fx = Fixture::direct(StepSequence::compact(), seeded());
    fx.fill(StepKind::Name, &CAMRY_IN_JUNE).await;
    fx.wizard.advance().await.unwrap();
    fx.wizard.set_field(FormField::FirstName, "").await.unwrap();

    assert_eq!(fx.wizard.retreat().await.unwrap(), 1);
    assert_eq!(fx.wizard.retreat().await.unwrap(), 1);
    assert!(fx.wizard.snapshot().await.form_errors.is_empty());
}

// =============================================================================
// Cascades
// =============================================================================

#[tokio::test]
async fn any_wheel_change_clears_type_and_model() {
    let fx = Fixture::direct(StepSequence::compact(), seeded());

    for (from, to) in [("4", "2"), ("2", "4"), ("4", "4"), ("4", ""), ("", "3")] {
        fx.wizard.set_field(FormField::NumberOfWheels, from).await.unwrap();
        fx.wizard.set_field(FormField::VehicleType, "3").await.unwrap();
        fx.wizard.set_field(FormField::VehicleModel, "5").await.unwrap();

        fx.wizard.set_field(FormField::NumberOfWheels, to).await.unwrap();

        let data = fx.wizard.snapshot().await.form_data;
        assert_eq!(data.vehicle_type, "", "{} -> {}", from, to);
        assert_eq!(data.vehicle_model, "", "{} -> {}", from, to);
    }
}

#[tokio::test]
async fn wheel_count_without_matching_types_commits_empty_list() {
    let fx = Fixture::direct(StepSequence::compact(), seeded());

    let outcome = fx.wizard.set_field(FormField::NumberOfWheels, "3").await.unwrap();

    assert_eq!(outcome, LoadOutcome::Committed(0));
    assert!(fx.wizard.snapshot().await.vehicle_types.items().is_empty());
}

#[tokio::test]
async fn type_change_always_clears_model_and_lists_its_models() {
    let fx = Fixture::direct(StepSequence::compact(), seeded());
    fx.wizard.set_field(FormField::VehicleType, "3").await.unwrap();
    fx.wizard.set_field(FormField::VehicleModel, "5").await.unwrap();

    fx.wizard.set_field(FormField::VehicleType, "4").await.unwrap();

    let snap = fx.wizard.snapshot().await;
    assert_eq!(snap.form_data.vehicle_model, "");
    let names: Vec<_> = snap.vehicle_models.items().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Toyota RAV4", "Honda CR-V"]);
}

#[tokio::test]
async fn booked_model_is_hidden_for_overlapping_dates_only() {
    let backend = seeded().with_bookings(vec![camry_booked("2024-01-10", "2024-01-15")]);
    let fx = Fixture::direct(StepSequence::extended(), backend);
    fx.wizard.set_field(FormField::VehicleType, "3").await.unwrap();

    fx.wizard.set_date_range("2024-01-12", "2024-01-20").await.unwrap();
    fx.wizard.set_field(FormField::VehicleType, "3").await.unwrap();
    let overlapping = fx.wizard.snapshot().await.vehicle_models;

    fx.wizard.set_date_range("2024-01-16", "2024-01-20").await.unwrap();
    fx.wizard.set_field(FormField::VehicleType, "3").await.unwrap();
    let clear = fx.wizard.snapshot().await.vehicle_models;

    let ids = |models: &[booking_wizard::domain::vehicle::VehicleModel]| -> Vec<String> {
        models.iter().map(|m| m.id.to_string()).collect()
    };
    assert_eq!(ids(overlapping.items()), vec!["6"]);
    assert_eq!(ids(clear.items()), vec!["5", "6"]);
}

//! Scripted demo: fills in and submits one booking through the wizard.
//!
//! The backend, step order and submission contract come from the
//! `BOOKING_WIZARD__*` environment; with no configuration the in-memory
//! backend is used.

use std::error::Error;
use std::sync::Arc;

use booking_wizard::adapters::{
    InMemoryNotificationCenter, InMemoryRentalBackend, RestBookingService, RestClient, RestConfig,
    RestUserDirectory, RestVehicleCatalog,
};
use booking_wizard::application::{
    AdvanceOutcome, BookingWizard, DependentResourceLoader, SubmissionContract, SubmissionGateway,
};
use booking_wizard::config::{AppConfig, BackendConfig};
use booking_wizard::domain::booking::{FormField, StepKind};
use booking_wizard::ports::{BookingService, UserDirectory, VehicleCatalog};
use booking_wizard::telemetry::init_tracing;

const DEMO_START: &str = "2030-06-01";
const DEMO_END: &str = "2030-06-05";

struct Collaborators {
    catalog: Arc<dyn VehicleCatalog>,
    bookings: Arc<dyn BookingService>,
    users: Arc<dyn UserDirectory>,
}

fn collaborators(config: &BackendConfig) -> Result<Collaborators, Box<dyn Error>> {
    if config.is_http() {
        let client = RestClient::new(
            RestConfig::new(config.base_url.clone())
                .with_timeout(config.timeout())
                .with_server_wheel_filter(config.server_wheel_filter),
        )?;
        return Ok(Collaborators {
            catalog: Arc::new(RestVehicleCatalog::new(client.clone())),
            bookings: Arc::new(RestBookingService::new(client.clone())),
            users: Arc::new(RestUserDirectory::new(client)),
        });
    }

    let backend = Arc::new(InMemoryRentalBackend::seeded()?);
    Ok(Collaborators {
        catalog: backend.clone(),
        bookings: backend.clone(),
        users: backend,
    })
}

/// Enters demo values for one step, picking the first listed type and model.
async fn fill_step(wizard: &BookingWizard, step: StepKind) -> Result<(), Box<dyn Error>> {
    match step {
        StepKind::Name => {
            wizard.set_field(FormField::FirstName, "Jo").await?;
            wizard.set_field(FormField::LastName, "Doe").await?;
        }
        StepKind::Contact => {
            wizard.set_field(FormField::Email, "jo.doe@example.com").await?;
            wizard.set_field(FormField::Phone, "+1 555 0100").await?;
        }
        StepKind::DateRange => {
            wizard.set_date_range(DEMO_START, DEMO_END).await?;
        }
        StepKind::NumberOfWheels => {
            wizard.set_field(FormField::NumberOfWheels, "4").await?;
        }
        StepKind::VehicleType => {
            let types = wizard.snapshot().await.vehicle_types;
            if let Some(first) = types.items().first() {
                wizard.set_field(FormField::VehicleType, first.id.as_str()).await?;
            }
        }
        StepKind::VehicleModel => {
            let models = wizard.snapshot().await.vehicle_models;
            if let Some(first) = models.items().first() {
                wizard.set_field(FormField::VehicleModel, first.id.as_str()).await?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging).map_err(|e| e as Box<dyn Error>)?;

    tracing::info!(
        backend = ?config.backend.kind,
        steps = %config.wizard.steps,
        submission = ?config.wizard.submission,
        "starting booking wizard demo"
    );

    let ports = collaborators(&config.backend)?;
    let gateway = match config.wizard.submission {
        SubmissionContract::Direct => SubmissionGateway::direct(ports.bookings),
        SubmissionContract::UpsertUser => SubmissionGateway::upsert_user(ports.bookings, ports.users),
    };
    let notifications = Arc::new(InMemoryNotificationCenter::new(config.notifications.ttl_ms));
    let wizard = BookingWizard::new(
        config.wizard.settings()?,
        DependentResourceLoader::new(ports.catalog, config.wizard.wheel_filter),
        gateway,
        notifications,
    )?;

    let steps: Vec<StepKind> = wizard.steps().iter().copied().collect();
    for step in steps {
        fill_step(&wizard, step).await?;
        match wizard.advance().await? {
            AdvanceOutcome::Advanced { step } => tracing::info!(step, "step completed"),
            AdvanceOutcome::Invalid(errors) => {
                tracing::error!(step = %step, errors = ?errors, "demo data rejected");
                break;
            }
            AdvanceOutcome::Submitted(confirmation) => {
                tracing::info!(
                    booking_id = %confirmation.booking_id,
                    vehicle_id = %confirmation.vehicle_id,
                    period = %confirmation.period,
                    "booking confirmed"
                );
            }
            AdvanceOutcome::SubmissionFailed(err) => {
                tracing::warn!(error = %err, "booking refused");
            }
        }
    }

    for notification in wizard.notifications().await {
        println!("[{}] {}", notification.kind, notification.message);
    }
    Ok(())
}

//! BookingWizard - the controller that owns the wizard's state.
//!
//! All state sits behind one `tokio::sync::Mutex` that is never held across
//! an await: a fetch takes a ticket under the lock, awaits the collaborator
//! unlocked, then re-locks to commit. Overlapping fetches therefore interleave
//! freely and the resource slots decide which result wins.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::booking::{
    BookingConfirmation, BookingError, DependencyGraph, ErrorKey, FieldStore, FormData,
    FormErrors, FormField, Notification, ResetPolicy, RuleTable, StepKind, StepSequence, StepValidator,
    WizardEvent, WizardState,
};
use crate::domain::foundation::{
    DateRange, DomainError, ErrorCode, ValidationError, VehicleTypeId,
};
use crate::domain::vehicle::{VehicleModel, VehicleType};
use crate::ports::NotificationSink;

use super::{DependentResourceLoader, ResourceSlot, SubmissionGateway};

pub const TYPES_LOAD_FAILED: &str = "Failed to load vehicle types";
pub const MODELS_LOAD_FAILED: &str = "Failed to load vehicle models";
pub const BOOKING_CREATED: &str = "Booking created successfully!";

/// Static shape of a wizard: its steps, cascade policy and rules.
#[derive(Debug, Clone)]
pub struct WizardSettings {
    pub steps: StepSequence,
    pub reset_policy: ResetPolicy,
    pub rules: RuleTable,
}

impl WizardSettings {
    /// Standard rules, and a reset policy derived from the step order.
    pub fn new(steps: StepSequence) -> Self {
        Self {
            reset_policy: ResetPolicy::for_steps(&steps),
            steps,
            rules: RuleTable::standard(),
        }
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self::new(StepSequence::default())
    }
}

/// What a fetch triggered by a parent field ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list was replaced with this many items.
    Committed(usize),
    /// A newer fetch was issued meanwhile; the result was dropped.
    Discarded,
    /// The fetch failed; prior items were kept.
    Failed,
    /// Nothing to fetch (parent empty or unusable).
    Skipped,
}

/// Result of [`BookingWizard::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The current step has errors; the step did not change.
    Invalid(FormErrors),
    Advanced { step: usize },
    /// The booking was created and the wizard reset to step 1.
    Submitted(BookingConfirmation),
    /// The booking was refused; the wizard stays on the last step.
    SubmissionFailed(BookingError),
}

/// Everything a display layer needs to render the wizard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub form_data: FormData,
    pub form_errors: FormErrors,
    pub is_dirty: bool,
    pub current_step: usize,
    pub total_steps: usize,
    pub is_submitting: bool,
    pub step: Option<StepKind>,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub can_go_back: bool,
    pub is_last_step: bool,
    pub next_disabled: bool,
    pub vehicle_types: ResourceSlot<VehicleType>,
    pub vehicle_models: ResourceSlot<VehicleModel>,
}

struct WizardInner {
    store: FieldStore,
    wizard: WizardState,
    types: ResourceSlot<VehicleType>,
    models: ResourceSlot<VehicleModel>,
}

impl WizardInner {
    fn ensure_editing(&self) -> Result<(), DomainError> {
        if self.wizard.is_submitting() {
            return Err(DomainError::submission_in_progress());
        }
        Ok(())
    }
}

pub struct BookingWizard {
    state: Mutex<WizardInner>,
    steps: StepSequence,
    validator: StepValidator,
    graph: DependencyGraph,
    loader: DependentResourceLoader,
    gateway: SubmissionGateway,
    notifications: Arc<dyn NotificationSink>,
}

impl BookingWizard {
    pub fn new(
        settings: WizardSettings,
        loader: DependentResourceLoader,
        gateway: SubmissionGateway,
        notifications: Arc<dyn NotificationSink>,
    ) -> Result<Self, ValidationError> {
        let wizard = WizardState::new(settings.steps.len())?;
        Ok(Self {
            state: Mutex::new(WizardInner {
                store: FieldStore::new(),
                wizard,
                types: ResourceSlot::new(),
                models: ResourceSlot::new(),
            }),
            graph: DependencyGraph::standard(settings.reset_policy),
            validator: StepValidator::new(settings.rules),
            steps: settings.steps,
            loader,
            gateway,
            notifications,
        })
    }

    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    // ───────────────────────────────────────────────────────────────
    // Field edits
    // ───────────────────────────────────────────────────────────────

    /// Writes a field value and runs the loader when the field is a parent.
    ///
    /// Refused while a submission is in flight.
    pub async fn set_field(
        &self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<LoadOutcome, DomainError> {
        let value = value.into();
        {
            let mut inner = self.state.lock().await;
            inner.ensure_editing()?;
            inner.store.set_field(field, value.clone());
        }

        let outcome = match field {
            FormField::NumberOfWheels => self.on_wheel_count_changed(&value).await,
            FormField::VehicleType => self.on_vehicle_type_changed(&value).await,
            FormField::StartDate | FormField::EndDate => self.on_date_range_changed().await,
            _ => LoadOutcome::Skipped,
        };
        Ok(outcome)
    }

    /// Writes both dates, then reacts once.
    pub async fn set_date_range(
        &self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<LoadOutcome, DomainError> {
        {
            let mut inner = self.state.lock().await;
            inner.ensure_editing()?;
            inner.store.update_many([
                (FormField::StartDate, start.into()),
                (FormField::EndDate, end.into()),
            ]);
        }
        Ok(self.on_date_range_changed().await)
    }

    // ───────────────────────────────────────────────────────────────
    // Dependent resources
    // ───────────────────────────────────────────────────────────────

    /// Reloads the vehicle types for a new wheel count.
    ///
    /// Type and model selections are cleared right away and again once the
    /// new list is committed; the model list is emptied.
    pub async fn on_wheel_count_changed(&self, wheels: &str) -> LoadOutcome {
        let (wheels, ticket) = {
            let mut inner = self.state.lock().await;
            self.graph.cascade(FormField::NumberOfWheels, &mut inner.store);
            inner.models.invalidate();
            match wheels.trim().parse::<u32>().ok().filter(|w| *w > 0) {
                Some(w) => (w, inner.types.issue()),
                None => {
                    inner.types.invalidate();
                    return LoadOutcome::Skipped;
                }
            }
        };

        tracing::debug!(wheels, generation = ticket, "fetching vehicle types");
        let result = self.loader.fetch_types(wheels).await;

        let mut inner = self.state.lock().await;
        match result {
            Ok(types) => {
                let count = types.len();
                if !inner.types.commit(ticket, types) {
                    tracing::debug!(wheels, generation = ticket, "discarding stale vehicle types");
                    return LoadOutcome::Discarded;
                }
                self.graph.cascade(FormField::NumberOfWheels, &mut inner.store);
                inner.models.invalidate();
                tracing::debug!(wheels, count, "vehicle types loaded");
                LoadOutcome::Committed(count)
            }
            Err(e) => {
                if !inner.types.fail(ticket, TYPES_LOAD_FAILED) {
                    return LoadOutcome::Discarded;
                }
                tracing::warn!(wheels, error = %e, "failed to load vehicle types");
                inner.store.set_general_error(TYPES_LOAD_FAILED);
                drop(inner);
                self.notifications.push(Notification::error(TYPES_LOAD_FAILED)).await;
                LoadOutcome::Failed
            }
        }
    }

    /// Reloads the models of a newly selected type.
    ///
    /// The model selection is always cleared. With a complete rental period
    /// only the models free for it are listed.
    pub async fn on_vehicle_type_changed(&self, type_id: &str) -> LoadOutcome {
        let (ticket, type_id, period) = {
            let mut inner = self.state.lock().await;
            self.graph.cascade(FormField::VehicleType, &mut inner.store);
            let type_id = match VehicleTypeId::new(type_id.trim()) {
                Ok(id) => id,
                Err(_) => {
                    inner.models.invalidate();
                    return LoadOutcome::Skipped;
                }
            };
            let period = DateRange::parse(
                inner.store.value(FormField::StartDate),
                inner.store.value(FormField::EndDate),
            )
            .ok();
            (inner.models.issue(), type_id, period)
        };

        self.load_models(ticket, type_id, period).await
    }

    /// Applies the date-change cascade and, when a type was selected,
    /// reloads its models for the new period.
    ///
    /// The period is read from the store in the same critical section as the
    /// cascade, so the fetch always uses the latest dates.
    pub async fn on_date_range_changed(&self) -> LoadOutcome {
        let (ticket, type_id, period) = {
            let mut inner = self.state.lock().await;
            let selected = VehicleTypeId::new(inner.store.value(FormField::VehicleType).trim()).ok();
            let cleared = self.graph.cascade(FormField::StartDate, &mut inner.store);
            let period = DateRange::parse(
                inner.store.value(FormField::StartDate),
                inner.store.value(FormField::EndDate),
            )
            .ok();

            match (selected, period) {
                (Some(type_id), Some(period)) => (inner.models.issue(), type_id, Some(period)),
                _ => {
                    if cleared.contains(&FormField::VehicleType) {
                        inner.models.invalidate();
                    }
                    return LoadOutcome::Skipped;
                }
            }
        };

        self.load_models(ticket, type_id, period).await
    }

    async fn load_models(
        &self,
        ticket: u64,
        type_id: VehicleTypeId,
        period: Option<DateRange>,
    ) -> LoadOutcome {
        tracing::debug!(
            type_id = %type_id,
            period = ?period,
            generation = ticket,
            "fetching vehicle models"
        );
        let result = self.loader.fetch_models(&type_id, period.as_ref()).await;

        let mut inner = self.state.lock().await;
        match result {
            Ok(models) => {
                let count = models.len();
                if !inner.models.commit(ticket, models) {
                    tracing::debug!(type_id = %type_id, generation = ticket, "discarding stale vehicle models");
                    return LoadOutcome::Discarded;
                }
                tracing::debug!(type_id = %type_id, count, "vehicle models loaded");
                LoadOutcome::Committed(count)
            }
            Err(e) => {
                if !inner.models.fail(ticket, MODELS_LOAD_FAILED) {
                    return LoadOutcome::Discarded;
                }
                tracing::warn!(type_id = %type_id, error = %e, "failed to load vehicle models");
                inner.store.set_general_error(MODELS_LOAD_FAILED);
                drop(inner);
                self.notifications.push(Notification::error(MODELS_LOAD_FAILED)).await;
                LoadOutcome::Failed
            }
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Validates the current step, then moves forward or submits.
    pub async fn advance(&self) -> Result<AdvanceOutcome, DomainError> {
        let data = {
            let mut inner = self.state.lock().await;
            inner.ensure_editing()?;

            let position = inner.wizard.current_step();
            let step = self.steps.step_at(position).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("No step configured at position {}", position),
                )
            })?;

            let errors = self.validator.validate(step, inner.store.data());
            inner.store.replace_errors_in(step.fields(), errors.clone());
            if !errors.is_empty() {
                tracing::debug!(step = position, failing = errors.len(), "step invalid");
                return Ok(AdvanceOutcome::Invalid(errors));
            }

            if !inner.wizard.is_last_step() {
                inner.wizard = inner.wizard.apply(WizardEvent::Advance)?;
                let step = inner.wizard.current_step();
                tracing::debug!(step, "advanced");
                return Ok(AdvanceOutcome::Advanced { step });
            }

            inner.wizard = inner.wizard.apply(WizardEvent::SubmissionStarted)?;
            inner.store.clear_field_error(ErrorKey::General);
            inner.store.data().clone()
        };

        tracing::info!(step = self.steps.len(), "submitting booking");
        let result = self.gateway.submit(&data).await;

        let mut inner = self.state.lock().await;
        match result {
            Ok(confirmation) => {
                inner.wizard = inner.wizard.apply(WizardEvent::SubmissionSucceeded)?;
                inner.store.reset();
                inner.types.invalidate();
                inner.models.invalidate();
                drop(inner);

                tracing::info!(booking_id = %confirmation.booking_id, "booking created");
                self.notifications.push(Notification::success(BOOKING_CREATED)).await;
                Ok(AdvanceOutcome::Submitted(confirmation))
            }
            Err(err) => {
                inner.wizard = inner.wizard.apply(WizardEvent::SubmissionFailed)?;
                let message = err.user_message();
                inner.store.set_general_error(message.clone());
                drop(inner);

                tracing::warn!(error = %err, "booking submission failed");
                self.notifications.push(Notification::error(message)).await;
                Ok(AdvanceOutcome::SubmissionFailed(err))
            }
        }
    }

    /// Goes back one step without validating. Stays on step 1.
    pub async fn retreat(&self) -> Result<usize, DomainError> {
        let mut inner = self.state.lock().await;
        inner.wizard = inner.wizard.apply(WizardEvent::Retreat)?;
        Ok(inner.wizard.current_step())
    }

    /// Restores empty values, no errors, step 1 and empty lists.
    ///
    /// Refused while a submission is in flight.
    pub async fn reset(&self) -> Result<(), DomainError> {
        let mut inner = self.state.lock().await;
        inner.wizard = inner.wizard.apply(WizardEvent::Reset)?;
        inner.store.reset();
        inner.types.invalidate();
        inner.models.invalidate();
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> WizardSnapshot {
        let inner = self.state.lock().await;
        let step = self.steps.step_at(inner.wizard.current_step());
        WizardSnapshot {
            form_data: inner.store.data().clone(),
            form_errors: inner.store.errors().clone(),
            is_dirty: inner.store.is_dirty(),
            current_step: inner.wizard.current_step(),
            total_steps: inner.wizard.total_steps(),
            is_submitting: inner.wizard.is_submitting(),
            step,
            title: step.map_or("", |s| s.title()),
            subtitle: step.map_or("", |s| s.subtitle()),
            can_go_back: inner.wizard.can_go_back(),
            is_last_step: inner.wizard.is_last_step(),
            next_disabled: inner.types.is_loading()
                || inner.models.is_loading()
                || inner.wizard.is_submitting(),
            vehicle_types: inner.types.clone(),
            vehicle_models: inner.models.clone(),
        }
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.active().await
    }
}

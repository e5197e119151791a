//! DependentResourceLoader - fetches the vehicle type and model lists that
//! depend on the wheel count, the selected type and the rental period.
//!
//! The loader itself is stateless. Each list lives in a [`ResourceSlot`]
//! owned by the wizard; a slot hands out a generation ticket when a fetch is
//! issued and only accepts the result carrying the latest ticket. Results of
//! superseded fetches are discarded, not cancelled.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{DateRange, ValidationError, VehicleTypeId};
use crate::domain::vehicle::{filter_types_by_wheels, VehicleModel, VehicleType};
use crate::ports::{ServiceError, VehicleCatalog};

/// A cached list plus the bookkeeping of the fetch that fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSlot<T> {
    items: Vec<T>,
    generation: u64,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for ResourceSlot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            generation: 0,
            loading: false,
            error: None,
        }
    }
}

impl<T> ResourceSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Starts a fetch and returns its ticket. Earlier tickets become stale.
    pub fn issue(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.generation
    }

    /// Replaces the items wholesale if `ticket` is current.
    pub fn commit(&mut self, ticket: u64, items: Vec<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.items = items;
        self.loading = false;
        self.error = None;
        true
    }

    /// Records a failure if `ticket` is current. Prior items are kept.
    pub fn fail(&mut self, ticket: u64, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    /// Empties the list and makes every outstanding ticket stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.loading = false;
        self.error = None;
    }
}

/// Where the wheel-count filter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelFilter {
    /// Ask the catalogue for matching types, falling back to the client when
    /// the catalogue cannot filter.
    #[default]
    Server,
    /// Always fetch every type and filter locally.
    Client,
}

impl FromStr for WheelFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(WheelFilter::Server),
            "client" => Ok(WheelFilter::Client),
            other => Err(ValidationError::invalid_format(
                "wheel_filter",
                format!("expected server or client, got '{}'", other),
            )),
        }
    }
}

pub struct DependentResourceLoader {
    catalog: Arc<dyn VehicleCatalog>,
    wheel_filter: WheelFilter,
}

impl DependentResourceLoader {
    pub fn new(catalog: Arc<dyn VehicleCatalog>, wheel_filter: WheelFilter) -> Self {
        Self {
            catalog,
            wheel_filter,
        }
    }

    /// Vehicle types with exactly `wheels` wheels.
    pub async fn fetch_types(&self, wheels: u32) -> Result<Vec<VehicleType>, ServiceError> {
        let server_side =
            self.wheel_filter == WheelFilter::Server && self.catalog.supports_wheel_filter();
        if server_side {
            return self.catalog.list_types(Some(wheels)).await;
        }

        let all = self.catalog.list_types(None).await?;
        tracing::debug!(wheels, total = all.len(), "filtering vehicle types client-side");
        Ok(filter_types_by_wheels(all, wheels))
    }

    /// Models of `type_id`; with a period, only the models free for it.
    ///
    /// Availability is checked per candidate, concurrently. Any failed check
    /// fails the whole fetch.
    pub async fn fetch_models(
        &self,
        type_id: &VehicleTypeId,
        period: Option<&DateRange>,
    ) -> Result<Vec<VehicleModel>, ServiceError> {
        let models = self.catalog.list_models(type_id).await?;
        let period = match period {
            Some(period) => period,
            None => return Ok(models),
        };

        let checks = models
            .iter()
            .map(|model| self.catalog.check_availability(&model.id, period));
        let reports = join_all(checks).await;

        let mut available = Vec::with_capacity(models.len());
        for (model, report) in models.into_iter().zip(reports) {
            if report?.available {
                available.push(model);
            } else {
                tracing::debug!(vehicle_id = %model.id, period = %period, "model unavailable");
            }
        }
        Ok(available)
    }
}

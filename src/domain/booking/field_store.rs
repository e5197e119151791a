//! FieldStore - the single owner of form values and form errors.
//!
//! Display layers never mutate [`FormData`] directly; every change goes
//! through the operations below. The store performs no validation and no IO.

use serde::Serialize;

use super::{ErrorKey, FormData, FormErrors, FormField};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStore {
    data: FormData,
    errors: FormErrors,
    dirty: bool,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from pre-filled values. The store is not dirty.
    pub fn with_data(data: FormData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn value(&self, field: FormField) -> &str {
        self.data.get(field)
    }

    /// True once any field has been written since the last reset.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The form is valid iff the error map is empty.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Overwrites `field`, clears its error and marks the form dirty.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.data.set(field, value);
        self.errors.remove(field);
        self.dirty = true;
    }

    /// Applies several values at once.
    pub fn update_many<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (FormField, V)>,
        V: Into<String>,
    {
        for (field, value) in values {
            self.set_field(field, value);
        }
    }

    /// Empties a dependent field that went stale, along with its error.
    ///
    /// Unlike [`set_field`](Self::set_field) this is not a user edit and
    /// does not touch the dirty flag.
    pub fn clear_field(&mut self, field: FormField) {
        self.data.set(field, String::new());
        self.errors.remove(field);
    }

    /// Replaces the whole error map.
    pub fn set_errors(&mut self, errors: FormErrors) {
        self.errors = errors;
    }

    /// Replaces the errors of `scope` only; entries outside it are kept.
    ///
    /// `general` is part of every scope: a new validation pass supersedes
    /// any earlier form-level message.
    pub fn replace_errors_in(&mut self, scope: &[FormField], errors: FormErrors) {
        for field in scope {
            self.errors.remove(*field);
        }
        self.errors.remove(ErrorKey::General);
        for (key, message) in errors.iter() {
            self.errors.insert(*key, message.clone());
        }
    }

    pub fn set_general_error(&mut self, message: impl Into<String>) {
        self.errors.insert(ErrorKey::General, message);
    }

    pub fn clear_field_error(&mut self, key: impl Into<ErrorKey>) {
        self.errors.remove(key);
    }

    pub fn clear_errors(&mut self) {
        self.errors = FormErrors::new();
    }

    /// Restores empty values, no errors, not dirty.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

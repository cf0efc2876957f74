//! Intake session: the form state and error map owned by one form instance

use crate::intake::{self, ErrorMap, FieldChange, IntakeFormState, SchemaError, ValidatedIntake};

/// Lifecycle of a form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// Nothing entered yet
    #[default]
    Empty,
    Editing,
    ValidatedSuccess,
    ValidatedFailure,
}

/// Exclusively-owned form state plus the errors of the last validation.
///
/// Errors are only recomputed by [`IntakeSession::submit`], so messages from
/// a failed submit stay visible while the user edits. With
/// `revalidate_on_change` set, every edit after the first submit recomputes
/// them instead.
#[derive(Debug, Clone)]
pub struct IntakeSession {
    form: IntakeFormState,
    errors: ErrorMap,
    phase: FormPhase,
    revalidate_on_change: bool,
    submit_count: usize,
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::new(false)
    }
}

impl IntakeSession {
    pub fn new(revalidate_on_change: bool) -> Self {
        Self {
            form: IntakeFormState::new(),
            errors: ErrorMap::default(),
            phase: FormPhase::Empty,
            revalidate_on_change,
            submit_count: 0,
        }
    }

    pub fn form(&self) -> &IntakeFormState {
        &self.form
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Apply one widget edit and move to `Editing`
    pub fn apply(&mut self, change: FieldChange) -> Result<(), SchemaError> {
        let field = change.field();
        self.form.apply(change)?;
        self.phase = FormPhase::Editing;
        tracing::debug!(field = %field, "Intake field changed");

        if self.revalidate_on_change && self.submit_count > 0 {
            self.errors = match intake::validate(&self.form)? {
                Ok(_) => ErrorMap::default(),
                Err(errors) => errors,
            };
        }
        Ok(())
    }

    /// Validate the current snapshot and store the outcome.
    ///
    /// Returns the typed record on success. Field failures are kept in
    /// [`IntakeSession::errors`]; schema bugs propagate.
    pub fn submit(&mut self) -> Result<Option<ValidatedIntake>, SchemaError> {
        self.submit_count += 1;
        match intake::validate(&self.form)? {
            Ok(intake) => {
                self.errors = ErrorMap::default();
                self.phase = FormPhase::ValidatedSuccess;
                tracing::info!("Intake form validated");
                Ok(Some(intake))
            }
            Err(errors) => {
                tracing::info!(failing = errors.len(), "Intake form has errors");
                self.errors = errors;
                self.phase = FormPhase::ValidatedFailure;
                Ok(None)
            }
        }
    }

    /// Discard everything and start over with an empty form
    pub fn reset(&mut self) {
        self.form = IntakeFormState::new();
        self.errors = ErrorMap::default();
        self.phase = FormPhase::Empty;
        self.submit_count = 0;
    }
}

//! Validation engine for the intake form
//!
//! - `form_state`: the partial record widgets edit
//! - `schema`: per-field constraints and the one-pass evaluator
//! - `validated`: the typed record produced on success
//! - `error`: error map and schema errors
//! - `time_input`: digits-to-`HH:MM` formatting for the time control

mod error;
mod form_state;
mod schema;
pub mod time_input;
mod validated;

pub use error::{ErrorMap, SchemaError};
pub use form_state::{FieldChange, FieldValue, IntakeFormState};
pub use schema::validate;
pub use validated::ValidatedIntake;

//! Form domain layer
//!
//! Widget-side state for the intake form: one control per field plus
//! focus handling. Values themselves live in [`crate::intake::IntakeFormState`].

mod field;
mod form_state;

pub use field::{Control, FieldKey, FormField};
pub use form_state::{Form, IntakeForm, SECTIONS};

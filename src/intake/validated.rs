//! The fully-typed result of a successful validation pass

use super::error::SchemaError;
use super::form_state::IntakeFormState;
use super::time_input::format_time;
use crate::catalog::{BloodType, BodyType, CatalogToken, FieldId, OrganType, YesOrNo};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Intake record with every field present and typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedIntake {
    pub organ_types: BTreeSet<OrganType>,
    pub blood_type: BloodType,
    pub body_type: BodyType,
    pub extraction_date: NaiveDate,
    pub extraction_time: String,
    pub hla_class1: String,
    pub hla_class2: String,
    pub email_address: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub ready_for_transplant: YesOrNo,
    pub able_to_be_contacted: YesOrNo,
}

impl ValidatedIntake {
    /// Convert a state that passed every constraint.
    ///
    /// Fails only when the schema let through a value it should have
    /// rejected.
    pub(crate) fn from_checked(state: &IntakeFormState) -> Result<Self, SchemaError> {
        let organ_tokens = required(FieldId::OrganTypes, state.organ_types.as_ref())?;
        if organ_tokens.is_empty() {
            return Err(SchemaError::MissingValue {
                field: FieldId::OrganTypes,
            });
        }
        let organ_types = organ_tokens
            .iter()
            .map(|t| lookup(FieldId::OrganTypes, t))
            .collect::<Result<BTreeSet<OrganType>, _>>()?;

        Ok(Self {
            organ_types,
            blood_type: token(FieldId::BloodType, &state.blood_type)?,
            body_type: token(FieldId::BodyType, &state.body_type)?,
            extraction_date: *required(FieldId::ExtractionDate, state.extraction_date.as_ref())?,
            extraction_time: text(FieldId::ExtractionTime, &state.extraction_time)?,
            hla_class1: text(FieldId::HlaClass1, &state.hla_class1)?,
            hla_class2: text(FieldId::HlaClass2, &state.hla_class2)?,
            email_address: text(FieldId::EmailAddress, &state.email_address)?,
            phone_number: text(FieldId::PhoneNumber, &state.phone_number)?,
            date_of_birth: *required(FieldId::DateOfBirth, state.date_of_birth.as_ref())?,
            ready_for_transplant: token(FieldId::ReadyForTransplant, &state.ready_for_transplant)?,
            able_to_be_contacted: token(FieldId::AbleToBeContacted, &state.able_to_be_contacted)?,
        })
    }

    /// `(label, value)` rows for a human-readable summary
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let organs = self
            .organ_types
            .iter()
            .map(|o| o.label())
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            (FieldId::OrganTypes.label(), organs),
            (FieldId::BloodType.label(), self.blood_type.label().to_string()),
            (FieldId::BodyType.label(), self.body_type.label().to_string()),
            (
                FieldId::ExtractionDate.label(),
                self.extraction_date.format("%Y-%m-%d").to_string(),
            ),
            (
                FieldId::ExtractionTime.label(),
                format_time(&self.extraction_time),
            ),
            (FieldId::HlaClass1.label(), self.hla_class1.clone()),
            (FieldId::HlaClass2.label(), self.hla_class2.clone()),
            (FieldId::EmailAddress.label(), self.email_address.clone()),
            (FieldId::PhoneNumber.label(), self.phone_number.clone()),
            (
                FieldId::DateOfBirth.label(),
                self.date_of_birth.format("%Y-%m-%d").to_string(),
            ),
            (
                FieldId::ReadyForTransplant.label(),
                self.ready_for_transplant.label().to_string(),
            ),
            (
                FieldId::AbleToBeContacted.label(),
                self.able_to_be_contacted.label().to_string(),
            ),
        ]
    }
}

fn required<T>(field: FieldId, value: Option<&T>) -> Result<&T, SchemaError> {
    value.ok_or(SchemaError::MissingValue { field })
}

fn text(field: FieldId, value: &Option<String>) -> Result<String, SchemaError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SchemaError::MissingValue { field }),
    }
}

fn token<T: CatalogToken>(field: FieldId, value: &Option<String>) -> Result<T, SchemaError> {
    let raw = required(field, value.as_ref())?;
    lookup(field, raw)
}

fn lookup<T: CatalogToken>(field: FieldId, raw: &str) -> Result<T, SchemaError> {
    T::from_token(raw).ok_or_else(|| SchemaError::UnknownToken {
        field,
        token: raw.to_string(),
    })
}

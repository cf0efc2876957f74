//! Partial intake record edited one field at a time

use super::error::SchemaError;
use crate::catalog::FieldId;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// A fully-formed value reported by a widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Set of catalog tokens (multi-select)
    Tokens(BTreeSet<String>),
    /// Single catalog token (select, radio)
    Token(String),
    Date(NaiveDate),
    /// Free text, including the digits of a time of day
    Text(String),
}

/// A single edit to the form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Set(FieldId, FieldValue),
    Clear(FieldId),
}

impl FieldChange {
    pub fn field(&self) -> FieldId {
        match self {
            Self::Set(field, _) | Self::Clear(field) => *field,
        }
    }
}

/// Current, possibly incomplete, contents of the intake form.
///
/// Categorical fields hold raw tokens as reported by the widgets; checking
/// them against the catalog is the schema's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeFormState {
    pub organ_types: Option<BTreeSet<String>>,
    pub blood_type: Option<String>,
    pub body_type: Option<String>,
    pub extraction_date: Option<NaiveDate>,
    /// Digits only; see [`super::time_input`]
    pub extraction_time: Option<String>,
    pub hla_class1: Option<String>,
    pub hla_class2: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub ready_for_transplant: Option<String>,
    pub able_to_be_contacted: Option<String>,
}

impl IntakeFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first field is populated
    pub fn is_empty(&self) -> bool {
        FieldId::ALL.iter().all(|field| !self.is_set(*field))
    }

    pub fn is_set(&self, field: FieldId) -> bool {
        match field {
            FieldId::OrganTypes => self.organ_types.is_some(),
            FieldId::ExtractionDate => self.extraction_date.is_some(),
            FieldId::DateOfBirth => self.date_of_birth.is_some(),
            _ => self.text_slot(field).is_some_and(|slot| slot.is_some()),
        }
    }

    /// Apply one widget edit
    pub fn apply(&mut self, change: FieldChange) -> Result<(), SchemaError> {
        match change {
            FieldChange::Set(field, value) => self.set(field, value),
            FieldChange::Clear(field) => {
                self.clear(field);
                Ok(())
            }
        }
    }

    /// Store a value; the value kind must match the field
    pub fn set(&mut self, field: FieldId, value: FieldValue) -> Result<(), SchemaError> {
        let mismatch = || SchemaError::ValueMismatch {
            field,
            expected: field.kind(),
        };

        match (field, value) {
            (FieldId::OrganTypes, FieldValue::Tokens(tokens)) => {
                self.organ_types = Some(tokens);
            }
            (FieldId::ExtractionDate, FieldValue::Date(date)) => {
                self.extraction_date = Some(date);
            }
            (FieldId::DateOfBirth, FieldValue::Date(date)) => {
                self.date_of_birth = Some(date);
            }
            (
                FieldId::BloodType
                | FieldId::BodyType
                | FieldId::ReadyForTransplant
                | FieldId::AbleToBeContacted,
                FieldValue::Token(token),
            ) => {
                let slot = self.text_slot_mut(field).ok_or_else(mismatch)?;
                *slot = Some(token);
            }
            (
                FieldId::ExtractionTime
                | FieldId::HlaClass1
                | FieldId::HlaClass2
                | FieldId::EmailAddress
                | FieldId::PhoneNumber,
                FieldValue::Text(text),
            ) => {
                let slot = self.text_slot_mut(field).ok_or_else(mismatch)?;
                *slot = Some(text);
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    pub fn clear(&mut self, field: FieldId) {
        match field {
            FieldId::OrganTypes => self.organ_types = None,
            FieldId::ExtractionDate => self.extraction_date = None,
            FieldId::DateOfBirth => self.date_of_birth = None,
            _ => {
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = None;
                }
            }
        }
    }

    /// Current value of a field, in widget terms
    #[allow(dead_code)]
    pub fn value(&self, field: FieldId) -> Option<FieldValue> {
        match field {
            FieldId::OrganTypes => self.organ_types.clone().map(FieldValue::Tokens),
            FieldId::ExtractionDate => self.extraction_date.map(FieldValue::Date),
            FieldId::DateOfBirth => self.date_of_birth.map(FieldValue::Date),
            FieldId::BloodType
            | FieldId::BodyType
            | FieldId::ReadyForTransplant
            | FieldId::AbleToBeContacted => self.text(field).map(|t| FieldValue::Token(t.into())),
            _ => self.text(field).map(|t| FieldValue::Text(t.into())),
        }
    }

    /// String content of a token or text field
    pub fn text(&self, field: FieldId) -> Option<&str> {
        self.text_slot(field).and_then(|slot| slot.as_deref())
    }

    #[allow(dead_code)]
    pub fn date(&self, field: FieldId) -> Option<NaiveDate> {
        match field {
            FieldId::ExtractionDate => self.extraction_date,
            FieldId::DateOfBirth => self.date_of_birth,
            _ => None,
        }
    }

    pub fn tokens(&self, field: FieldId) -> Option<&BTreeSet<String>> {
        match field {
            FieldId::OrganTypes => self.organ_types.as_ref(),
            _ => None,
        }
    }

    fn text_slot(&self, field: FieldId) -> Option<&Option<String>> {
        match field {
            FieldId::BloodType => Some(&self.blood_type),
            FieldId::BodyType => Some(&self.body_type),
            FieldId::ExtractionTime => Some(&self.extraction_time),
            FieldId::HlaClass1 => Some(&self.hla_class1),
            FieldId::HlaClass2 => Some(&self.hla_class2),
            FieldId::EmailAddress => Some(&self.email_address),
            FieldId::PhoneNumber => Some(&self.phone_number),
            FieldId::ReadyForTransplant => Some(&self.ready_for_transplant),
            FieldId::AbleToBeContacted => Some(&self.able_to_be_contacted),
            FieldId::OrganTypes | FieldId::ExtractionDate | FieldId::DateOfBirth => None,
        }
    }

    fn text_slot_mut(&mut self, field: FieldId) -> Option<&mut Option<String>> {
        match field {
            FieldId::BloodType => Some(&mut self.blood_type),
            FieldId::BodyType => Some(&mut self.body_type),
            FieldId::ExtractionTime => Some(&mut self.extraction_time),
            FieldId::HlaClass1 => Some(&mut self.hla_class1),
            FieldId::HlaClass2 => Some(&mut self.hla_class2),
            FieldId::EmailAddress => Some(&mut self.email_address),
            FieldId::PhoneNumber => Some(&mut self.phone_number),
            FieldId::ReadyForTransplant => Some(&mut self.ready_for_transplant),
            FieldId::AbleToBeContacted => Some(&mut self.able_to_be_contacted),
            FieldId::OrganTypes | FieldId::ExtractionDate | FieldId::DateOfBirth => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldKind;

    fn tokens(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = IntakeFormState::new();
        assert!(state.is_empty());
        for field in FieldId::ALL {
            assert!(!state.is_set(field));
            assert!(state.value(field).is_none());
        }
    }

    #[test]
    fn test_set_token_field() {
        let mut state = IntakeFormState::new();
        state
            .set(FieldId::BloodType, FieldValue::Token("opos".into()))
            .unwrap();
        assert_eq!(state.blood_type.as_deref(), Some("opos"));
        assert!(!state.is_empty());
        assert_eq!(
            state.value(FieldId::BloodType),
            Some(FieldValue::Token("opos".into()))
        );
    }

    #[test]
    fn test_set_tokens_collapses_duplicates() {
        let mut state = IntakeFormState::new();
        let set = tokens(&["liver", "heart", "liver"]);
        state.set(FieldId::OrganTypes, FieldValue::Tokens(set)).unwrap();
        assert_eq!(state.tokens(FieldId::OrganTypes).unwrap().len(), 2);
    }

    #[test]
    fn test_set_dates() {
        let mut state = IntakeFormState::new();
        let date = NaiveDate::from_ymd_opt(1980, 2, 29).unwrap();
        state.set(FieldId::DateOfBirth, FieldValue::Date(date)).unwrap();
        assert_eq!(state.date(FieldId::DateOfBirth), Some(date));
        assert_eq!(state.date(FieldId::ExtractionDate), None);
    }

    #[test]
    fn test_set_text_fields() {
        let mut state = IntakeFormState::new();
        state
            .set(FieldId::HlaClass2, FieldValue::Text("DR4".into()))
            .unwrap();
        state
            .set(FieldId::ExtractionTime, FieldValue::Text("0930".into()))
            .unwrap();
        assert_eq!(state.text(FieldId::HlaClass2), Some("DR4"));
        assert_eq!(state.text(FieldId::ExtractionTime), Some("0930"));
    }

    #[test]
    fn test_set_wrong_kind_is_rejected() {
        let mut state = IntakeFormState::new();
        let err = state
            .set(FieldId::ExtractionDate, FieldValue::Text("2024-01-01".into()))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::ValueMismatch {
                field: FieldId::ExtractionDate,
                expected: FieldKind::Date,
            }
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_token_into_text_field_is_rejected() {
        let mut state = IntakeFormState::new();
        assert!(state
            .set(FieldId::EmailAddress, FieldValue::Token("yes".into()))
            .is_err());
        assert!(state
            .set(FieldId::ReadyForTransplant, FieldValue::Text("yes".into()))
            .is_err());
    }

    #[test]
    fn test_apply_and_clear() {
        let mut state = IntakeFormState::new();
        state
            .apply(FieldChange::Set(
                FieldId::PhoneNumber,
                FieldValue::Text("5551234567".into()),
            ))
            .unwrap();
        assert!(state.is_set(FieldId::PhoneNumber));

        state.apply(FieldChange::Clear(FieldId::PhoneNumber)).unwrap();
        assert!(!state.is_set(FieldId::PhoneNumber));
        assert!(state.is_empty());
    }

    #[test]
    fn test_field_change_field() {
        let change = FieldChange::Set(FieldId::BodyType, FieldValue::Token("child".into()));
        assert_eq!(change.field(), FieldId::BodyType);
        assert_eq!(FieldChange::Clear(FieldId::HlaClass1).field(), FieldId::HlaClass1);
    }
}

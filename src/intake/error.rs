//! Validation failures and schema errors

use crate::catalog::{FieldId, FieldKind};
use std::collections::BTreeMap;
use thiserror::Error;

/// Programming errors raised while evaluating the schema.
///
/// These never describe bad user input; they mean the schema, the catalog
/// and the widgets disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A field passed its constraints but holds no value
    #[error("field '{field}' passed validation without a value")]
    MissingValue { field: FieldId },

    /// A field passed its constraints but holds a token outside its catalog
    #[error("field '{field}' passed validation with unknown token '{token}'")]
    UnknownToken { field: FieldId, token: String },

    /// A widget reported a value of the wrong kind for a field
    #[error("field '{field}' expects a {expected:?} value")]
    ValueMismatch { field: FieldId, expected: FieldKind },
}

/// One message per failing field, keyed and ordered by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<FieldId, String>);

impl ErrorMap {
    pub(crate) fn insert(&mut self, field: FieldId, message: String) {
        self.0.insert(field, message);
    }

    /// Message for a field, if it failed
    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.keys().copied()
    }

    /// All messages in declaration order
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchemaError::UnknownToken {
            field: FieldId::BloodType,
            token: "zpos".into(),
        };
        assert_eq!(
            err.to_string(),
            "field 'bloodType' passed validation with unknown token 'zpos'"
        );
    }

    #[test]
    fn test_mismatch_display() {
        let err = SchemaError::ValueMismatch {
            field: FieldId::ExtractionDate,
            expected: FieldKind::Date,
        };
        assert!(err.to_string().contains("extractionDate"));
        assert!(err.to_string().contains("Date"));
    }

    #[test]
    fn test_error_map_orders_by_field() {
        let mut map = ErrorMap::default();
        map.insert(FieldId::PhoneNumber, "phone".into());
        map.insert(FieldId::OrganTypes, "organ".into());
        map.insert(FieldId::EmailAddress, "email".into());

        let fields: Vec<_> = map.fields().collect();
        assert_eq!(
            fields,
            vec![FieldId::OrganTypes, FieldId::EmailAddress, FieldId::PhoneNumber]
        );
        let messages: Vec<_> = map.messages().collect();
        assert_eq!(messages, vec!["organ", "email", "phone"]);
    }

    #[test]
    fn test_error_map_lookup() {
        let mut map = ErrorMap::default();
        assert!(map.is_empty());
        map.insert(FieldId::BodyType, "Body Type is a required field".into());
        assert_eq!(map.len(), 1);
        assert!(map.contains(FieldId::BodyType));
        assert_eq!(map.get(FieldId::BodyType), Some("Body Type is a required field"));
        assert_eq!(map.get(FieldId::BloodType), None);
    }
}

//! Declarative intake schema and its evaluator
//!
//! The schema is a static table: one entry per field, each holding an
//! ordered list of constraints. Evaluation runs every field, records the
//! first violated constraint's message per field, and only builds the typed
//! record when nothing failed.

use super::error::{ErrorMap, SchemaError};
use super::form_state::IntakeFormState;
use super::validated::ValidatedIntake;
use crate::catalog::{is_legal_token, options_for, FieldId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Outcome of one validation pass: the typed record or per-field messages
pub type Validation = Result<ValidatedIntake, ErrorMap>;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("Failed to compile email regex")
});

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Failed to compile phone regex"));

/// What a constraint demands; determines the failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    OneOfCatalog,
    EmailShape,
    TenDigits,
}

impl Rule {
    /// Message reported when this rule fails for `field`
    pub fn message(self, field: FieldId) -> String {
        match self {
            Rule::Required => format!("{} is a required field", field.label()),
            Rule::OneOfCatalog => {
                let values: Vec<_> = options_for(field).iter().map(|o| o.value).collect();
                format!(
                    "{} must be one of the following values: {}",
                    field.label(),
                    values.join(", ")
                )
            }
            Rule::EmailShape => format!("{} must be a valid email", field.label()),
            Rule::TenDigits => "Phone number is not valid".to_string(),
        }
    }
}

/// A single predicate over the form state
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub rule: Rule,
    pub check: fn(&IntakeFormState) -> bool,
}

/// The ordered constraints of one field
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: FieldId,
    pub constraints: &'static [Constraint],
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn legal(field: FieldId, value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| is_legal_token(field, v))
}

fn matches(pattern: &Regex, value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| pattern.is_match(v))
}

/// The intake schema, in declaration order
pub static INTAKE_RULES: &[FieldRules] = &[
    FieldRules {
        field: FieldId::OrganTypes,
        constraints: &[
            Constraint {
                rule: Rule::Required,
                check: |s| s.organ_types.as_ref().is_some_and(|set| !set.is_empty()),
            },
            Constraint {
                rule: Rule::OneOfCatalog,
                check: |s| {
                    s.organ_types.as_ref().is_some_and(|set| {
                        set.iter().all(|t| is_legal_token(FieldId::OrganTypes, t))
                    })
                },
            },
        ],
    },
    FieldRules {
        field: FieldId::BloodType,
        constraints: &[
            Constraint {
                rule: Rule::Required,
                check: |s| filled(&s.blood_type),
            },
            Constraint {
                rule: Rule::OneOfCatalog,
                check: |s| legal(FieldId::BloodType, &s.blood_type),
            },
        ],
    },
    FieldRules {
        field: FieldId::BodyType,
        constraints: &[
            Constraint {
                rule: Rule::Required,
                check: |s| filled(&s.body_type),
            },
            Constraint {
                rule: Rule::OneOfCatalog,
                check: |s| legal(FieldId::BodyType, &s.body_type),
            },
        ],
    },
    FieldRules {
        field: FieldId::ExtractionDate,
        constraints: &[Constraint {
            rule: Rule::Required,
            check: |s| s.extraction_date.is_some(),
        }],
    },
    FieldRules {
        field: FieldId::ExtractionTime,
        constraints: &[Constraint {
            rule: Rule::Required,
            check: |s| filled(&s.extraction_time),
        }],
    },
    FieldRules {
        field: FieldId::HlaClass1,
        constraints: &[Constraint {
            rule: Rule::Required,
            check: |s| filled(&s.hla_class1),
        }],
    },
    FieldRules {
        field: FieldId::HlaClass2,
        constraints: &[Constraint {
            rule: Rule::Required,
            check: |s| filled(&s.hla_class2),
        }],
    },
    FieldRules {
        field: FieldId::EmailAddress,
        constraints: &[
            Constraint {
                rule: Rule::Required,
                check: |s| filled(&s.email_address),
            },
            Constraint {
                rule: Rule::EmailShape,
                check: |s| matches(&EMAIL_PATTERN, &s.email_address),
            },
        ],
    },
    FieldRules {
        field: FieldId::PhoneNumber,
        constraints: &[
            Constraint {
                rule: Rule::Required,
                check: |s| filled(&s.phone_number),
            },
            Constraint {
                rule: Rule::TenDigits,
                check: |s| matches(&PHONE_PATTERN, &s.phone_number),
            },
        ],
    },
    FieldRules {
        field: FieldId::DateOfBirth,
        constraints: &[Constraint {
            rule: Rule::Required,
            check: |s| s.date_of_birth.is_some(),
        }],
    },
    FieldRules {
        field: FieldId::ReadyForTransplant,
        constraints: &[
            Constraint {
                rule: Rule::Required,
                check: |s| filled(&s.ready_for_transplant),
            },
            Constraint {
                rule: Rule::OneOfCatalog,
                check: |s| legal(FieldId::ReadyForTransplant, &s.ready_for_transplant),
            },
        ],
    },
    FieldRules {
        field: FieldId::AbleToBeContacted,
        constraints: &[
            Constraint {
                rule: Rule::Required,
                check: |s| filled(&s.able_to_be_contacted),
            },
            Constraint {
                rule: Rule::OneOfCatalog,
                check: |s| legal(FieldId::AbleToBeContacted, &s.able_to_be_contacted),
            },
        ],
    },
];

/// Evaluates a form state against a rules table
#[derive(Debug, Clone, Copy)]
pub struct IntakeSchema {
    rules: &'static [FieldRules],
}

impl Default for IntakeSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeSchema {
    pub fn new() -> Self {
        Self::with_rules(INTAKE_RULES)
    }

    pub fn with_rules(rules: &'static [FieldRules]) -> Self {
        Self { rules }
    }

    /// First violated rule of a single field, if any
    #[allow(dead_code)]
    pub fn check_field(&self, field: FieldId, state: &IntakeFormState) -> Option<Rule> {
        self.rules
            .iter()
            .filter(|r| r.field == field)
            .flat_map(|r| r.constraints)
            .find(|c| !(c.check)(state))
            .map(|c| c.rule)
    }

    /// Evaluate every field of `state` in one pass.
    ///
    /// The inner result carries user-facing failures; the outer error is
    /// reserved for schema bugs and must not be shown as a field message.
    pub fn validate(&self, state: &IntakeFormState) -> Result<Validation, SchemaError> {
        let mut errors = ErrorMap::default();

        for rules in self.rules {
            let failed = rules.constraints.iter().find(|c| !(c.check)(state));
            if let Some(constraint) = failed {
                errors.insert(rules.field, constraint.rule.message(rules.field));
            }
        }

        if !errors.is_empty() {
            tracing::debug!(failing = errors.len(), "Intake validation failed");
            return Ok(Err(errors));
        }

        ValidatedIntake::from_checked(state).map(Ok)
    }
}

/// Validate against the standard intake schema
pub fn validate(state: &IntakeFormState) -> Result<Validation, SchemaError> {
    IntakeSchema::new().validate(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn tokens(values: &[&str]) -> Option<BTreeSet<String>> {
        Some(values.iter().map(|v| v.to_string()).collect())
    }

    fn valid_state() -> IntakeFormState {
        IntakeFormState {
            organ_types: tokens(&["heart", "liver"]),
            blood_type: Some("oneg".into()),
            body_type: Some("largemale".into()),
            extraction_date: NaiveDate::from_ymd_opt(2024, 5, 2),
            extraction_time: Some("1415".into()),
            hla_class1: Some("A1 A2 B8 B44".into()),
            hla_class2: Some("DR3 DR4".into()),
            email_address: Some("a@b.com".into()),
            phone_number: Some("5551234567".into()),
            date_of_birth: NaiveDate::from_ymd_opt(1979, 11, 23),
            ready_for_transplant: Some("yes".into()),
            able_to_be_contacted: Some("yes".into()),
        }
    }

    fn errors_for(state: &IntakeFormState) -> ErrorMap {
        match validate(state).unwrap() {
            Ok(intake) => panic!("expected failure, got {intake:?}"),
            Err(errors) => errors,
        }
    }

    fn without(field: FieldId) -> IntakeFormState {
        let mut state = valid_state();
        state.clear(field);
        state
    }

    mod whole_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_state_passes() {
            let intake = validate(&valid_state()).unwrap().unwrap();
            assert_eq!(intake.hla_class2, "DR3 DR4");
        }

        #[test]
        fn test_empty_state_reports_every_field() {
            let errors = errors_for(&IntakeFormState::new());
            assert_eq!(errors.len(), 12);
            let fields: Vec<_> = errors.fields().collect();
            assert_eq!(fields, FieldId::ALL.to_vec());
            for field in FieldId::ALL {
                assert_eq!(
                    errors.get(field),
                    Some(format!("{} is a required field", field.label()).as_str())
                );
            }
        }

        #[test]
        fn test_missing_single_field_reports_only_that_field() {
            for field in FieldId::ALL {
                let errors = errors_for(&without(field));
                assert_eq!(errors.len(), 1, "field {field}");
                assert!(errors.contains(field), "field {field}");
            }
        }

        #[test]
        fn test_all_failures_in_one_pass() {
            let mut state = valid_state();
            state.email_address = Some("not-an-email".into());
            state.phone_number = Some("123".into());
            state.blood_type = None;

            let errors = errors_for(&state);
            let fields: Vec<_> = errors.fields().collect();
            assert_eq!(
                fields,
                vec![
                    FieldId::BloodType,
                    FieldId::EmailAddress,
                    FieldId::PhoneNumber
                ]
            );
        }

        #[test]
        fn test_validate_is_idempotent() {
            let mut state = valid_state();
            state.organ_types = tokens(&[]);
            state.phone_number = Some("555-1234567".into());
            let first = validate(&state).unwrap();
            let second = validate(&state).unwrap();
            assert_eq!(first, second);

            let ok = valid_state();
            assert_eq!(validate(&ok).unwrap(), validate(&ok).unwrap());
        }
    }

    mod organ_types {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_set_is_required_failure() {
            let mut state = valid_state();
            state.organ_types = tokens(&[]);
            let errors = errors_for(&state);
            assert_eq!(
                errors.get(FieldId::OrganTypes),
                Some("Organ Type(s) is a required field")
            );
        }

        #[test]
        fn test_unknown_token_fails() {
            let mut state = valid_state();
            state.organ_types = tokens(&["heart", "unknown-token"]);
            let errors = errors_for(&state);
            let message = errors.get(FieldId::OrganTypes).unwrap();
            assert!(message.starts_with("Organ Type(s) must be one of the following values:"));
            assert!(message.contains("heartandlungs"));
        }
    }

    mod catalog_fields {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_illegal_blood_type() {
            let mut state = valid_state();
            state.blood_type = Some("o+".into());
            let errors = errors_for(&state);
            assert_eq!(
                errors.get(FieldId::BloodType),
                Some(
                    "Blood Type must be one of the following values: \
                     aneg, apos, bneg, bpos, oneg, opos, abneg, abpos"
                )
            );
        }

        #[test]
        fn test_empty_token_is_missing() {
            let mut state = valid_state();
            state.body_type = Some(String::new());
            assert_eq!(
                errors_for(&state).get(FieldId::BodyType),
                Some("Body Type is a required field")
            );
        }

        #[test]
        fn test_yes_no_only() {
            let mut state = valid_state();
            state.able_to_be_contacted = Some("maybe".into());
            assert_eq!(
                errors_for(&state).get(FieldId::AbleToBeContacted),
                Some(
                    "Is the donor able to be contacted? must be one of the following values: yes, no"
                )
            );
        }
    }

    mod contact_fields {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_phone_with_dash_fails() {
            let mut state = valid_state();
            state.phone_number = Some("555-1234567".into());
            assert_eq!(
                errors_for(&state).get(FieldId::PhoneNumber),
                Some("Phone number is not valid")
            );
        }

        #[test]
        fn test_phone_wrong_length_fails() {
            for bad in ["555123456", "55512345678", "555 123 4567", "(555)1234567"] {
                let mut state = valid_state();
                state.phone_number = Some(bad.into());
                assert!(errors_for(&state).contains(FieldId::PhoneNumber), "{bad}");
            }
        }

        #[test]
        fn test_phone_rejects_non_ascii_digits() {
            let mut state = valid_state();
            state.phone_number = Some("٥٥٥١٢٣٤٥٦٧".into());
            assert!(errors_for(&state).contains(FieldId::PhoneNumber));
        }

        #[test]
        fn test_missing_phone_is_required_failure() {
            let errors = errors_for(&without(FieldId::PhoneNumber));
            assert_eq!(
                errors.get(FieldId::PhoneNumber),
                Some("Phone Number is a required field")
            );
        }

        #[test]
        fn test_ten_digit_phone_passes() {
            let mut state = valid_state();
            state.phone_number = Some("5551234567".into());
            assert!(validate(&state).unwrap().is_ok());
        }

        #[test]
        fn test_malformed_email_fails() {
            for bad in ["not-an-email", "a@b", "@b.com", "a b@c.com", "a@b."] {
                let mut state = valid_state();
                state.email_address = Some(bad.into());
                assert_eq!(
                    errors_for(&state).get(FieldId::EmailAddress),
                    Some("Email Address must be a valid email"),
                    "{bad}"
                );
            }
        }

        #[test]
        fn test_valid_emails_pass() {
            for good in ["a@b.com", "first.last+tag@example.co.uk"] {
                let mut state = valid_state();
                state.email_address = Some(good.into());
                assert!(validate(&state).unwrap().is_ok(), "{good}");
            }
        }

        #[test]
        fn test_whitespace_text_counts_as_present() {
            let mut state = valid_state();
            state.hla_class1 = Some("   ".into());
            let intake = validate(&state).unwrap().unwrap();
            assert_eq!(intake.hla_class1, "   ");
        }

        #[test]
        fn test_empty_text_is_missing() {
            let mut state = valid_state();
            state.hla_class1 = Some(String::new());
            assert_eq!(
                errors_for(&state).get(FieldId::HlaClass1),
                Some("HLA Type Information, Class I is a required field")
            );
        }
    }

    mod check_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_reports_first_rule() {
            let schema = IntakeSchema::new();
            let state = IntakeFormState::new();
            assert_eq!(
                schema.check_field(FieldId::EmailAddress, &state),
                Some(Rule::Required)
            );

            let mut state = valid_state();
            state.email_address = Some("nope".into());
            assert_eq!(
                schema.check_field(FieldId::EmailAddress, &state),
                Some(Rule::EmailShape)
            );
            assert_eq!(schema.check_field(FieldId::BloodType, &state), None);
        }
    }

    mod schema_bugs {
        use super::*;
        use pretty_assertions::assert_eq;

        static LOOSE_RULES: &[FieldRules] = &[FieldRules {
            field: FieldId::BloodType,
            constraints: &[],
        }];

        #[test]
        fn test_schema_gap_is_not_a_field_error() {
            let schema = IntakeSchema::with_rules(LOOSE_RULES);
            let result = schema.validate(&IntakeFormState::new());
            assert_eq!(
                result,
                Err(SchemaError::MissingValue {
                    field: FieldId::OrganTypes
                })
            );
        }

        #[test]
        fn test_unchecked_token_is_schema_error() {
            let schema = IntakeSchema::with_rules(LOOSE_RULES);
            let mut state = valid_state();
            state.blood_type = Some("zz".into());
            assert_eq!(
                schema.validate(&state),
                Err(SchemaError::UnknownToken {
                    field: FieldId::BloodType,
                    token: "zz".into()
                })
            );
        }
    }
}

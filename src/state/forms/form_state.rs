//! Form navigation and the intake form layout

use super::field::{FieldKey, FormField};
use crate::catalog::FieldId;
use crate::intake::{FieldChange, IntakeFormState};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// A titled group of fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub fields: &'static [FieldId],
}

pub const SECTIONS: [Section; 2] = [
    Section {
        title: "Basic Intake Information",
        subtitle: "Basic information about the donor and donor organ(s).",
        fields: &[
            FieldId::OrganTypes,
            FieldId::BloodType,
            FieldId::BodyType,
            FieldId::ExtractionDate,
            FieldId::ExtractionTime,
            FieldId::HlaClass1,
            FieldId::HlaClass2,
        ],
    },
    Section {
        title: "Living Donor (Optional)",
        subtitle: "Information about the living donor, if applicable.",
        fields: &[
            FieldId::EmailAddress,
            FieldId::PhoneNumber,
            FieldId::DateOfBirth,
            FieldId::ReadyForTransplant,
            FieldId::AbleToBeContacted,
        ],
    },
];

/// Every intake control followed by the submit button row
#[derive(Debug, Clone)]
pub struct IntakeForm {
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl IntakeForm {
    pub fn new(checkbox_columns: usize) -> Self {
        let fields = SECTIONS
            .iter()
            .flat_map(|section| section.fields.iter())
            .map(|field| FormField::for_field(*field, checkbox_columns))
            .collect();

        Self {
            fields,
            active_field_index: 0,
        }
    }

    /// Index of the submit button row
    pub fn submit_index(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the submit button is currently active
    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == self.submit_index()
    }

    pub fn active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }

    /// Id of the field under focus, if any
    pub fn active_field_id(&self) -> Option<FieldId> {
        self.fields.get(self.active_field_index).map(|f| f.field)
    }

    /// Move focus to a field, e.g. the first one with an error
    pub fn focus(&mut self, field: FieldId) {
        if let Some(index) = self.fields.iter().position(|f| f.field == field) {
            self.active_field_index = index;
        }
    }

    /// Route a key to the focused control
    pub fn handle_key(&mut self, key: FieldKey, form: &IntakeFormState) -> Option<FieldChange> {
        self.active_field_mut()?.handle_key(key, form)
    }

    /// Clear UI-local state and focus the first field
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active_field_index = 0;
    }
}

impl Form for IntakeForm {
    fn field_count(&self) -> usize {
        self.fields.len() + 1
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index;
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_cover_every_field_once() {
        let mut listed: Vec<FieldId> = SECTIONS
            .iter()
            .flat_map(|s| s.fields.iter().copied())
            .collect();
        listed.sort();
        assert_eq!(listed, FieldId::ALL.to_vec());
    }

    #[test]
    fn test_sections_carry_subtitles() {
        assert_eq!(
            SECTIONS.map(|s| s.subtitle),
            [
                "Basic information about the donor and donor organ(s).",
                "Information about the living donor, if applicable.",
            ]
        );
    }

    #[test]
    fn test_form_has_field_per_id_plus_submit() {
        let form = IntakeForm::new(2);
        assert_eq!(form.fields.len(), 12);
        assert_eq!(form.field_count(), 13);
        assert_eq!(form.submit_index(), 12);
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_next_field_wraps() {
            let mut form = IntakeForm::new(2);
            form.set_active_field(12);
            assert!(form.is_submit_active());
            form.next_field();
            assert_eq!(form.active_field(), 0);
        }

        #[test]
        fn test_prev_field_wraps() {
            let mut form = IntakeForm::new(2);
            form.prev_field();
            assert!(form.is_submit_active());
            form.prev_field();
            assert_eq!(form.active_field_id(), Some(FieldId::AbleToBeContacted));
        }

        #[test]
        fn test_focus_jumps_to_field() {
            let mut form = IntakeForm::new(2);
            form.focus(FieldId::PhoneNumber);
            assert_eq!(form.active_field_id(), Some(FieldId::PhoneNumber));
        }

        #[test]
        fn test_submit_row_has_no_field() {
            let mut form = IntakeForm::new(2);
            form.set_active_field(12);
            assert!(form.active_field_mut().is_none());
            assert!(form.get_field(12).is_none());
            assert!(form
                .handle_key(FieldKey::Char('a'), &IntakeFormState::new())
                .is_none());
        }
    }

    #[test]
    fn test_handle_key_routes_to_active_field() {
        let mut form = IntakeForm::new(2);
        form.focus(FieldId::HlaClass1);
        let change = form.handle_key(FieldKey::Char('A'), &IntakeFormState::new());
        assert_eq!(change.map(|c| c.field()), Some(FieldId::HlaClass1));
    }

    #[test]
    fn test_reset_focuses_first_field() {
        let mut form = IntakeForm::new(2);
        form.focus(FieldId::DateOfBirth);
        form.reset();
        assert_eq!(form.active_field(), 0);
    }
}

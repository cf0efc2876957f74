//! Field catalog
//!
//! Closed sets of legal values for every categorical intake field, each
//! paired with the label shown by selection widgets. The validation schema
//! uses the same tables as its source of truth for "is this token legal".

use serde::{Deserialize, Serialize};

/// A single `(token, label)` pair offered by a selection widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Identifies one field of the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    OrganTypes,
    BloodType,
    BodyType,
    ExtractionDate,
    ExtractionTime,
    HlaClass1,
    HlaClass2,
    EmailAddress,
    PhoneNumber,
    DateOfBirth,
    ReadyForTransplant,
    AbleToBeContacted,
}

/// The kind of control a field is edited with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    MultiSelect,
    Select,
    Radio,
    Date,
    Time,
    Text,
}

impl FieldId {
    /// All fields, in declaration (and validation) order
    pub const ALL: [FieldId; 12] = [
        FieldId::OrganTypes,
        FieldId::BloodType,
        FieldId::BodyType,
        FieldId::ExtractionDate,
        FieldId::ExtractionTime,
        FieldId::HlaClass1,
        FieldId::HlaClass2,
        FieldId::EmailAddress,
        FieldId::PhoneNumber,
        FieldId::DateOfBirth,
        FieldId::ReadyForTransplant,
        FieldId::AbleToBeContacted,
    ];

    /// Wire name of the field (the key used in error maps)
    pub fn name(self) -> &'static str {
        match self {
            Self::OrganTypes => "organTypes",
            Self::BloodType => "bloodType",
            Self::BodyType => "bodyType",
            Self::ExtractionDate => "extractionDate",
            Self::ExtractionTime => "extractionTime",
            Self::HlaClass1 => "hlaClass1",
            Self::HlaClass2 => "hlaClass2",
            Self::EmailAddress => "emailAddress",
            Self::PhoneNumber => "phoneNumber",
            Self::DateOfBirth => "dateOfBirth",
            Self::ReadyForTransplant => "readyForTransplant",
            Self::AbleToBeContacted => "ableToBeContacted",
        }
    }

    /// Human-readable label shown above the control
    pub fn label(self) -> &'static str {
        match self {
            Self::OrganTypes => "Organ Type(s)",
            Self::BloodType => "Blood Type",
            Self::BodyType => "Body Type",
            Self::ExtractionDate => "Extraction Date",
            Self::ExtractionTime => "Extraction Time",
            Self::HlaClass1 => "HLA Type Information, Class I",
            Self::HlaClass2 => "HLA Type Information, Class II",
            Self::EmailAddress => "Email Address",
            Self::PhoneNumber => "Phone Number",
            Self::DateOfBirth => "Date of Birth",
            Self::ReadyForTransplant => "Is the donor ready for transplant?",
            Self::AbleToBeContacted => "Is the donor able to be contacted?",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::OrganTypes => FieldKind::MultiSelect,
            Self::BloodType | Self::BodyType => FieldKind::Select,
            Self::ExtractionDate | Self::DateOfBirth => FieldKind::Date,
            Self::ExtractionTime => FieldKind::Time,
            Self::HlaClass1 | Self::HlaClass2 | Self::EmailAddress | Self::PhoneNumber => {
                FieldKind::Text
            }
            Self::ReadyForTransplant | Self::AbleToBeContacted => FieldKind::Radio,
        }
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A categorical value backed by one of the catalogs
pub trait CatalogToken: Sized + Copy + 'static {
    /// Every value, in catalog order
    const ALL: &'static [Self];

    fn token(self) -> &'static str;
    fn label(self) -> &'static str;

    /// Look a value up by its token
    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.token() == token)
    }
}

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $name:ident => $options:ident {
            $($variant:ident => ($token:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        pub const $options: &[CatalogOption] = &[
            $(CatalogOption { value: $token, label: $label },)+
        ];

        impl CatalogToken for $name {
            const ALL: &'static [Self] = &[$($name::$variant,)+];

            fn token(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }
    };
}

catalog! {
    /// Organs that can be offered for intake
    OrganType => ORGAN_TYPES {
        Heart => ("heart", "Heart"),
        HeartAndLungs => ("heartandlungs", "Heart and Lungs"),
        RightLung => ("rightlung", "Lateral Right Lung"),
        LeftLung => ("leftlung", "Lateral Left Lung"),
        Lungs => ("lungs", "Bilateral Lungs"),
        Kidneys => ("kidneys", "Dual Kidneys"),
        RightKidney => ("rightkidney", "Right Kidney"),
        LeftKidney => ("leftkidney", "Left Kidney"),
        Pancreas => ("pancreas", "Pancreas"),
        Liver => ("liver", "Liver"),
        Intestines => ("intestines", "Intestines"),
    }
}

catalog! {
    /// ABO/Rh blood group
    BloodType => BLOOD_TYPES {
        ANeg => ("aneg", "A Negative"),
        APos => ("apos", "A Positive"),
        BNeg => ("bneg", "B Negative"),
        BPos => ("bpos", "B Positive"),
        ONeg => ("oneg", "O Negative"),
        OPos => ("opos", "O Positive"),
        AbNeg => ("abneg", "AB Negative"),
        AbPos => ("abpos", "AB Positive"),
    }
}

catalog! {
    /// Donor body size category
    BodyType => BODY_TYPES {
        Infant => ("infant", "Infant"),
        Toddler => ("toddler", "Toddler"),
        Child => ("child", "Child"),
        SmallMale => ("smallmale", "Small Male"),
        SmallFemale => ("smallfemale", "Small Female"),
        AverageMale => ("averagemale", "Average Male"),
        AverageFemale => ("averagefemale", "Average Female"),
        LargeMale => ("largemale", "Large Male"),
        LargeFemale => ("largefemale", "Large Female"),
    }
}

catalog! {
    YesOrNo => YES_NO {
        Yes => ("yes", "Yes"),
        No => ("no", "No"),
    }
}

/// Ordered options for a field; empty for fields that are not categorical
pub fn options_for(field: FieldId) -> &'static [CatalogOption] {
    match field {
        FieldId::OrganTypes => ORGAN_TYPES,
        FieldId::BloodType => BLOOD_TYPES,
        FieldId::BodyType => BODY_TYPES,
        FieldId::ReadyForTransplant | FieldId::AbleToBeContacted => YES_NO,
        _ => &[],
    }
}

/// Whether `token` is one of the legal values of `field`
pub fn is_legal_token(field: FieldId, token: &str) -> bool {
    options_for(field).iter().any(|o| o.value == token)
}

/// Label for a token of `field`, if the token is legal
pub fn label_for(field: FieldId, token: &str) -> Option<&'static str> {
    options_for(field)
        .iter()
        .find(|o| o.value == token)
        .map(|o| o.label)
}

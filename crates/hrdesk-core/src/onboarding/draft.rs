// ── Employee onboarding draft ──
//
// The raw, string-typed values an operator enters across the wizard tabs,
// plus attached documents. `validate` runs every per-field validator and
// the cross-field rules; `metadata` produces the `employeeData` JSON part.

use std::fmt;

use chrono::NaiveDate;
use hrdesk_api::{Attachment, AttachmentField};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use super::salary::{SalaryBreakdown, derive_salary};
use super::validation::{
    FieldError, normalize_ifsc, parse_amount, validate_aadhaar, validate_account_number,
    validate_email, validate_ifsc, validate_name, validate_pan, validate_phone, validate_pincode,
    validate_uan, validate_upi,
};

// ── Tabs and fields ──────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Tab {
    Personal,
    Identity,
    Employment,
    Bank,
    Salary,
}

/// Text inputs of the onboarding form. Names match the backend's keys.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Gender,
    Address,
    City,
    State,
    Pincode,
    EmergencyContactName,
    EmergencyContactPhone,
    AadharNumber,
    PanNumber,
    PassportNumber,
    DrivingLicenseNumber,
    VoterIdNumber,
    DepartmentId,
    DesignationId,
    JoiningDate,
    EmploymentType,
    ReportingManagerId,
    UanNumber,
    AccountNumber,
    AccountHolderName,
    IfscCode,
    BankName,
    BranchName,
    UpiId,
    UpiContactName,
    AnnualCtc,
    BasicSalary,
}

impl Field {
    pub fn tab(self) -> Tab {
        match self {
            Self::FirstName
            | Self::LastName
            | Self::Email
            | Self::Phone
            | Self::DateOfBirth
            | Self::Gender
            | Self::Address
            | Self::City
            | Self::State
            | Self::Pincode
            | Self::EmergencyContactName
            | Self::EmergencyContactPhone => Tab::Personal,
            Self::AadharNumber
            | Self::PanNumber
            | Self::PassportNumber
            | Self::DrivingLicenseNumber
            | Self::VoterIdNumber => Tab::Identity,
            Self::DepartmentId
            | Self::DesignationId
            | Self::JoiningDate
            | Self::EmploymentType
            | Self::ReportingManagerId
            | Self::UanNumber => Tab::Employment,
            Self::AccountNumber
            | Self::AccountHolderName
            | Self::IfscCode
            | Self::BankName
            | Self::BranchName
            | Self::UpiId
            | Self::UpiContactName => Tab::Bank,
            Self::AnnualCtc | Self::BasicSalary => Tab::Salary,
        }
    }

    fn is_required(self) -> bool {
        matches!(
            self,
            Self::FirstName
                | Self::LastName
                | Self::Email
                | Self::Phone
                | Self::DepartmentId
                | Self::DesignationId
                | Self::JoiningDate
                | Self::AnnualCtc
                | Self::BasicSalary
        )
    }
}

/// Where a validation error is reported: a text input or a file input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKey {
    Field(Field),
    Attachment(AttachmentField),
}

impl FormKey {
    pub fn tab(self) -> Tab {
        match self {
            Self::Field(field) => field.tab(),
            Self::Attachment(AttachmentField::ProfileImage) => Tab::Personal,
            Self::Attachment(AttachmentField::PassbookImage) => Tab::Bank,
            Self::Attachment(_) => Tab::Identity,
        }
    }

    /// Every key on a tab, fields first.
    pub fn on_tab(tab: Tab) -> Vec<Self> {
        Field::iter()
            .filter(|f| f.tab() == tab)
            .map(Self::Field)
            .chain(
                FILE_INPUTS
                    .iter()
                    .map(|&a| Self::Attachment(a))
                    .filter(|k| k.tab() == tab),
            )
            .collect()
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(field.as_ref()),
            Self::Attachment(attachment) => f.write_str(attachment.as_ref()),
        }
    }
}

impl From<Field> for FormKey {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<AttachmentField> for FormKey {
    fn from(field: AttachmentField) -> Self {
        Self::Attachment(field)
    }
}

/// File inputs on the onboarding form.
const FILE_INPUTS: [AttachmentField; 7] = [
    AttachmentField::ProfileImage,
    AttachmentField::AadharImage,
    AttachmentField::PanImage,
    AttachmentField::PassportImage,
    AttachmentField::DrivingLicenseImage,
    AttachmentField::VoterIdImage,
    AttachmentField::PassbookImage,
];

/// Each ID-proof number and the document that backs it.
const ID_PROOFS: [(Field, AttachmentField); 5] = [
    (Field::AadharNumber, AttachmentField::AadharImage),
    (Field::PanNumber, AttachmentField::PanImage),
    (Field::PassportNumber, AttachmentField::PassportImage),
    (Field::DrivingLicenseNumber, AttachmentField::DrivingLicenseImage),
    (Field::VoterIdNumber, AttachmentField::VoterIdImage),
];

const BANK_GROUP: [Field; 5] = [
    Field::AccountNumber,
    Field::AccountHolderName,
    Field::IfscCode,
    Field::BankName,
    Field::BranchName,
];

const UPI_GROUP: [Field; 2] = [Field::UpiId, Field::UpiContactName];

pub type Errors = IndexMap<FormKey, FieldError>;

// ── Draft ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct EmployeeDraft {
    values: IndexMap<Field, String>,
    pub pf_enrolled: bool,
    attachments: IndexMap<AttachmentField, Attachment>,
}

impl EmployeeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let mut value = value.into();
        if field == Field::IfscCode {
            value = normalize_ifsc(&value);
        }
        self.values.insert(field, value);
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Trimmed value; blank is `None`.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values
            .get(&field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn filled(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.attachments.insert(attachment.field, attachment);
    }

    pub fn detach(&mut self, field: AttachmentField) -> Option<Attachment> {
        self.attachments.shift_remove(&field)
    }

    pub fn has_attachment(&self, field: AttachmentField) -> bool {
        self.attachments.contains_key(&field)
    }

    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.values()
    }

    pub fn into_attachments(self) -> Vec<Attachment> {
        self.attachments.into_values().collect()
    }

    // ── Derived values ───────────────────────────────────────────────

    /// Recomputed from the current CTC, basic and PF enrolment.
    /// `None` until both amounts parse.
    pub fn salary(&self) -> Option<SalaryBreakdown> {
        let annual = parse_amount(self.get(Field::AnnualCtc)?).ok()??;
        let basic = parse_amount(self.get(Field::BasicSalary)?).ok()??;
        Some(derive_salary(annual, basic, self.pf_enrolled))
    }

    // ── Validation ───────────────────────────────────────────────────

    /// Format check for one filled field, ignoring required-ness.
    fn check_format(field: Field, value: &str) -> Result<(), FieldError> {
        match field {
            Field::FirstName
            | Field::LastName
            | Field::EmergencyContactName
            | Field::AccountHolderName
            | Field::UpiContactName => validate_name(value),
            Field::Email => validate_email(value),
            Field::Phone | Field::EmergencyContactPhone => validate_phone(value),
            Field::Pincode => validate_pincode(value),
            Field::AadharNumber => validate_aadhaar(value),
            Field::PanNumber => validate_pan(value),
            Field::UanNumber => validate_uan(value),
            Field::AccountNumber => validate_account_number(value),
            Field::IfscCode => validate_ifsc(value),
            Field::UpiId => validate_upi(value),
            Field::DateOfBirth | Field::JoiningDate => {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map(|_| ())
                    .map_err(|_| FieldError::InvalidDate)
            }
            Field::AnnualCtc | Field::BasicSalary => parse_amount(value).map(|_| ()),
            Field::Gender
            | Field::Address
            | Field::City
            | Field::State
            | Field::PassportNumber
            | Field::DrivingLicenseNumber
            | Field::VoterIdNumber
            | Field::DepartmentId
            | Field::DesignationId
            | Field::EmploymentType
            | Field::ReportingManagerId
            | Field::BankName
            | Field::BranchName => Ok(()),
        }
    }

    /// Run every rule, keyed by where the error is shown.
    pub fn validate(&self) -> Errors {
        let mut errors = Errors::new();

        for field in Field::iter() {
            match self.get(field) {
                Some(value) => {
                    if let Err(e) = Self::check_format(field, value) {
                        errors.insert(field.into(), e);
                    }
                }
                None if field.is_required() => {
                    errors.insert(field.into(), FieldError::Required);
                }
                None => {}
            }
        }

        self.check_id_proofs(&mut errors);
        self.check_bank_group(&mut errors);
        self.check_upi_group(&mut errors);
        self.check_salary(&mut errors);
        errors
    }

    /// A number needs its document and a document needs its number.
    fn check_id_proofs(&self, errors: &mut Errors) {
        for (number, document) in ID_PROOFS {
            match (self.filled(number), self.has_attachment(document)) {
                (true, false) => {
                    errors.insert(document.into(), FieldError::MissingDocument);
                }
                (false, true) => {
                    errors
                        .entry(number.into())
                        .or_insert(FieldError::MissingDocumentNumber);
                }
                _ => {}
            }
        }
    }

    /// Any bank detail (or the passbook) makes all of them required.
    fn check_bank_group(&self, errors: &mut Errors) {
        let passbook = self.has_attachment(AttachmentField::PassbookImage);
        let any = passbook || BANK_GROUP.iter().any(|&f| self.filled(f));
        if !any {
            return;
        }
        for field in BANK_GROUP {
            if !self.filled(field) {
                errors.entry(field.into()).or_insert(FieldError::Required);
            }
        }
        if !passbook {
            errors
                .entry(AttachmentField::PassbookImage.into())
                .or_insert(FieldError::MissingDocument);
        }
    }

    fn check_upi_group(&self, errors: &mut Errors) {
        if !UPI_GROUP.iter().any(|&f| self.filled(f)) {
            return;
        }
        for field in UPI_GROUP {
            if !self.filled(field) {
                errors.entry(field.into()).or_insert(FieldError::Required);
            }
        }
    }

    fn check_salary(&self, errors: &mut Errors) {
        if let Some(breakdown) = self.salary() {
            if breakdown.basic_salary > breakdown.monthly_ctc {
                errors
                    .entry(Field::BasicSalary.into())
                    .or_insert(FieldError::BasicExceedsCtc);
            }
        }
    }

    // ── Wire format ──────────────────────────────────────────────────

    /// The JSON sent as the `employeeData` multipart part.
    pub fn metadata(&self) -> Value {
        let mut map = Map::new();
        for field in Field::iter() {
            let Some(value) = self.get(field) else {
                continue;
            };
            let value = match field {
                Field::AnnualCtc | Field::BasicSalary => match parse_amount(value) {
                    Ok(Some(n)) => Value::from(n),
                    _ => Value::from(value),
                },
                Field::PanNumber => Value::from(value.to_ascii_uppercase()),
                Field::AadharNumber => {
                    Value::from(value.split_whitespace().collect::<String>())
                }
                _ => Value::from(value),
            };
            map.insert(field.as_ref().to_owned(), value);
        }

        map.insert("pfEnrolled".into(), Value::Bool(self.pf_enrolled));
        if let Some(salary) = self.salary() {
            map.insert("monthlyCtc".into(), Value::from(salary.monthly_ctc));
            map.insert("hra".into(), Value::from(salary.hra));
            map.insert(
                "employerPfContribution".into(),
                Value::from(salary.employer_pf_contribution),
            );
            map.insert(
                "employeePfContribution".into(),
                Value::from(salary.employee_pf_contribution),
            );
            map.insert("allowances".into(), Value::from(salary.allowances));
        }
        Value::Object(map)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn doc(field: AttachmentField) -> Attachment {
        Attachment::new(field, "scan.pdf", None, Bytes::from_static(b"%PDF")).unwrap()
    }

    fn complete() -> EmployeeDraft {
        EmployeeDraft::new()
            .with(Field::FirstName, "Asha")
            .with(Field::LastName, "Rao")
            .with(Field::Email, "asha@example.com")
            .with(Field::Phone, "9876543210")
            .with(Field::DepartmentId, "D1")
            .with(Field::DesignationId, "G1")
            .with(Field::JoiningDate, "2026-11-02")
            .with(Field::AnnualCtc, "600000")
            .with(Field::BasicSalary, "20000")
    }

    #[test]
    fn complete_draft_is_clean() {
        assert!(complete().validate().is_empty());
    }

    #[test]
    fn required_fields_are_reported() {
        let errors = EmployeeDraft::new().validate();
        assert_eq!(
            errors.get(&FormKey::Field(Field::FirstName)),
            Some(&FieldError::Required)
        );
        assert!(!errors.contains_key(&FormKey::Field(Field::City)));
    }

    #[test]
    fn id_number_requires_document_and_vice_versa() {
        let mut draft = complete().with(Field::PanNumber, "ABCDE1234F");
        assert_eq!(
            draft.validate().get(&FormKey::Attachment(AttachmentField::PanImage)),
            Some(&FieldError::MissingDocument)
        );

        draft.attach(doc(AttachmentField::PanImage));
        assert!(draft.validate().is_empty());

        let mut draft = complete();
        draft.attach(doc(AttachmentField::AadharImage));
        assert_eq!(
            draft.validate().get(&FormKey::Field(Field::AadharNumber)),
            Some(&FieldError::MissingDocumentNumber)
        );
    }

    #[test]
    fn invalid_id_number_wins_over_missing_document_number() {
        let mut draft = complete().with(Field::AadharNumber, "1234");
        draft.attach(doc(AttachmentField::AadharImage));
        assert_eq!(
            draft.validate().get(&FormKey::Field(Field::AadharNumber)),
            Some(&FieldError::InvalidAadhaar)
        );
    }

    #[test]
    fn one_bank_field_requires_the_group() {
        let errors = complete().with(Field::BankName, "SBI").validate();
        for field in [
            Field::AccountNumber,
            Field::AccountHolderName,
            Field::IfscCode,
            Field::BranchName,
        ] {
            assert_eq!(errors.get(&FormKey::Field(field)), Some(&FieldError::Required));
        }
        assert_eq!(
            errors.get(&FormKey::Attachment(AttachmentField::PassbookImage)),
            Some(&FieldError::MissingDocument)
        );
        assert!(!errors.contains_key(&FormKey::Field(Field::BankName)));
    }

    #[test]
    fn passbook_alone_requires_the_group() {
        let mut draft = complete();
        draft.attach(doc(AttachmentField::PassbookImage));
        let errors = draft.validate();
        assert_eq!(
            errors.get(&FormKey::Field(Field::IfscCode)),
            Some(&FieldError::Required)
        );
    }

    #[test]
    fn full_bank_group_passes() {
        let mut draft = complete()
            .with(Field::AccountNumber, "123456789012")
            .with(Field::AccountHolderName, "Asha Rao")
            .with(Field::IfscCode, "sbin0001234")
            .with(Field::BankName, "State Bank")
            .with(Field::BranchName, "MG Road");
        draft.attach(doc(AttachmentField::PassbookImage));
        assert!(draft.validate().is_empty());
        assert_eq!(draft.get(Field::IfscCode), Some("SBIN0001234"));
    }

    #[test]
    fn upi_group_rules() {
        let errors = complete().with(Field::UpiId, "asha@okbank").validate();
        assert_eq!(
            errors.get(&FormKey::Field(Field::UpiContactName)),
            Some(&FieldError::Required)
        );

        let draft = complete()
            .with(Field::UpiId, "asha@okbank")
            .with(Field::UpiContactName, "Asha Rao");
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn basic_above_monthly_ctc_is_rejected() {
        let errors = complete().with(Field::BasicSalary, "60000").validate();
        assert_eq!(
            errors.get(&FormKey::Field(Field::BasicSalary)),
            Some(&FieldError::BasicExceedsCtc)
        );
    }

    #[test]
    fn salary_recomputes_on_pf_toggle() {
        let mut draft = complete();
        assert_eq!(draft.salary().unwrap().employee_pf_contribution, 0.0);
        draft.pf_enrolled = true;
        assert_eq!(draft.salary().unwrap().employee_pf_contribution, 2_400.0);
    }

    #[test]
    fn metadata_uses_backend_keys() {
        let mut draft = complete().with(Field::AadharNumber, "1234 5678 9012");
        draft.pf_enrolled = true;
        let meta = draft.metadata();
        assert_eq!(meta["firstName"], "Asha");
        assert_eq!(meta["aadharNumber"], "123456789012");
        assert_eq!(meta["annualCtc"], 600_000.0);
        assert_eq!(meta["employeePfContribution"], 2_400.0);
        assert_eq!(meta["pfEnrolled"], true);
        assert!(meta.get("city").is_none());
    }

    #[test]
    fn tabs_group_keys() {
        let bank = FormKey::on_tab(Tab::Bank);
        assert!(bank.contains(&FormKey::Field(Field::IfscCode)));
        assert!(bank.contains(&FormKey::Attachment(AttachmentField::PassbookImage)));
        assert!(!bank.contains(&FormKey::Field(Field::Phone)));
    }
}

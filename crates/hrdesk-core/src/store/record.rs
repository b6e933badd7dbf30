// ── Entity identity ──
//
// Every backend entity names its ID field differently (`departmentId`,
// `assetId`, ...). `Record` maps each onto one accessor so the slice
// reducers can insert, update and remove by key without knowing the type.

use hrdesk_api::models::{
    Activity, Asset, AttendanceRecord, Customer, Department, Designation, DocumentPreview,
    DocumentSettings, Employee, Lead, Note, Payroll, Tag,
};

use crate::model::CustomForm;

/// A keyed entity held in a slice collection.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in success messages.
    const KIND: &'static str;

    /// Backend-assigned identifier.
    fn key(&self) -> &str;
}

/// An entity that lives under a parent lead.
pub trait Child: Record {
    fn parent_key(&self) -> &str;
}

macro_rules! impl_record {
    ($($ty:ty => $kind:literal, $field:ident;)*) => {
        $(
            impl Record for $ty {
                const KIND: &'static str = $kind;

                fn key(&self) -> &str {
                    &self.$field
                }
            }
        )*
    };
}

impl_record! {
    Department => "Department", department_id;
    Designation => "Designation", designation_id;
    Employee => "Employee", employee_id;
    Asset => "Asset", asset_id;
    Lead => "Lead", lead_id;
    Activity => "Activity", activity_id;
    Note => "Note", note_id;
    Tag => "Tag", tag_id;
    Customer => "Customer", customer_id;
    Payroll => "Payroll", payroll_id;
    AttendanceRecord => "Attendance", attendance_id;
    CustomForm => "Form", form_id;
}

// Document series are keyed by kind: one settings row per series.
impl Record for DocumentSettings {
    const KIND: &'static str = "Document settings";

    fn key(&self) -> &str {
        self.kind.as_ref()
    }
}

impl Record for DocumentPreview {
    const KIND: &'static str = "Document preview";

    fn key(&self) -> &str {
        self.kind.as_ref()
    }
}

impl Child for Activity {
    fn parent_key(&self) -> &str {
        &self.lead_id
    }
}

impl Child for Note {
    fn parent_key(&self) -> &str {
        &self.lead_id
    }
}

// ── Slice store ──
//
// One slice per domain. Every slice is independently observable; the
// store itself holds no cross-slice state.

mod record;
mod slice;

use hrdesk_api::models::{
    Activity, Asset, AttendanceRecord, AttendanceSummary, Customer, Department, Designation,
    DocumentPreview, DocumentSettings, Employee, Lead, Note, Payroll, Tag,
};

pub use record::{Child, Record};
pub use slice::{
    GroupMutation, GroupedState, Lifecycle, ListMutation, ListState, Phase, Slice, SliceState,
    ValueMutation, ValueState, reduce,
};

use crate::model::{CustomForm, DashboardSummary};

/// Every domain slice the console drives.
pub struct Store {
    pub departments: Slice<ListState<Department>>,
    pub designations: Slice<ListState<Designation>>,
    pub employees: Slice<ListState<Employee>>,
    pub assets: Slice<ListState<Asset>>,
    pub leads: Slice<ListState<Lead>>,
    pub activities: Slice<GroupedState<Activity>>,
    pub notes: Slice<GroupedState<Note>>,
    pub tags: Slice<ListState<Tag>>,
    pub customers: Slice<ListState<Customer>>,
    pub payroll: Slice<ListState<Payroll>>,
    pub attendance: Slice<ListState<AttendanceRecord>>,
    pub attendance_summary: Slice<ValueState<AttendanceSummary>>,
    pub forms: Slice<ListState<CustomForm>>,
    pub document_settings: Slice<ListState<DocumentSettings>>,
    pub document_previews: Slice<ListState<DocumentPreview>>,
    pub dashboard: Slice<ValueState<DashboardSummary>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            departments: Slice::new("departments"),
            designations: Slice::new("designations"),
            employees: Slice::new("employees"),
            assets: Slice::new("assets"),
            leads: Slice::new("leads"),
            activities: Slice::new("activities"),
            notes: Slice::new("notes"),
            tags: Slice::new("tags"),
            customers: Slice::new("customers"),
            payroll: Slice::new("payroll"),
            attendance: Slice::new("attendance"),
            attendance_summary: Slice::new("attendance_summary"),
            forms: Slice::new("forms"),
            document_settings: Slice::new("document_settings"),
            document_previews: Slice::new("document_previews"),
            dashboard: Slice::new("dashboard"),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

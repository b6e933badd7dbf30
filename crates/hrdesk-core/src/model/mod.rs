// ── Domain types owned by the core ──
//
// Backend wire types are re-exported from `hrdesk_api::models`; the types
// here exist only where the core reshapes data.

pub mod custom_form;
pub mod dashboard;

pub use custom_form::{CustomForm, FieldType, FormField, FormIdSource};
pub use dashboard::DashboardSummary;

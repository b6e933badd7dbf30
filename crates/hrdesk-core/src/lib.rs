//! Request-lifecycle state and business logic between `hrdesk-api` and the
//! `hrdesk` CLI.
//!
//! - **[`Console`]** is the facade. Each domain operation drives one slice
//!   through pending, fulfilled or rejected and hands the typed result back.
//!
//! - **[`Store`]** holds one [`Slice`] per domain. A slice is a
//!   `tokio::sync::watch` channel over an immutable snapshot, so readers
//!   never block writers. Subscribe with [`Slice::subscribe`] to get a
//!   [`SliceStream`].
//!
//! - **[`onboarding`]** validates employee drafts, navigates the wizard tabs
//!   and derives salary components. No I/O.
//!
//! - **[`convert`]** reshapes the several custom-form payload shapes the
//!   backend has produced into one [`CustomForm`].

pub mod config;
pub mod console;
pub mod convert;
pub mod debounce;
pub mod error;
pub mod model;
pub mod onboarding;
mod ops;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConsoleConfig, DEFAULT_AVAILABILITY_DEBOUNCE, TlsVerification};
pub use console::Console;
pub use debounce::Debouncer;
pub use error::CoreError;
pub use model::{CustomForm, DashboardSummary, FieldType, FormField, FormIdSource};
pub use onboarding::{EmployeeDraft, Field, OnboardingForm, SalaryBreakdown, Tab};
pub use store::{
    GroupMutation, GroupedState, Lifecycle, ListMutation, ListState, Phase, Slice, SliceState,
    Store, ValueMutation, ValueState,
};
pub use stream::{SliceStream, SliceWatchStream};

// Wire types, so consumers need only this crate.
pub use hrdesk_api::AuthContext;
pub use hrdesk_api::models::{
    Activity, ActivityRequest, ActivityType, Asset, AssetRequest, AssetStatus, AttendanceRecord,
    AttendanceSummary, Availability, Customer, CustomerRequest, Department, DepartmentRequest,
    Designation, DesignationRequest, DocumentKind, DocumentPreview, DocumentSettings, Employee,
    Lead, LeadRequest, LeadStatus, Note, NoteRequest, Payroll, PayrollStatus, Tag, TagRequest,
};
pub use hrdesk_api::{Attachment, AttachmentField, ContentKind};

// ── Employee onboarding ──
//
// Form validation, wizard navigation and salary derivation. Pure logic:
// nothing here performs I/O. `Console::onboard_employee` submits a draft.

pub mod draft;
pub mod salary;
pub mod validation;
pub mod wizard;

pub use draft::{EmployeeDraft, Errors, Field, FormKey, Tab};
pub use salary::{SalaryBreakdown, derive_salary, round2};
pub use validation::FieldError;
pub use wizard::{Blocked, OnboardingForm};

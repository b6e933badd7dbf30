// Endpoint groups, each an `impl HrClient` block.

mod assets;
mod attendance;
mod crm;
mod documents;
mod employees;
mod forms;
mod organization;
mod payroll;

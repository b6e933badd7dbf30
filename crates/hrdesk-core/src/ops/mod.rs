// Domain operations, one `impl Console` block per area.

mod assets;
mod attendance;
mod crm;
mod dashboard;
mod documents;
mod employees;
mod forms;
mod organization;
mod payroll;

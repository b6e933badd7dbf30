pub mod assets;
pub mod attendance;
pub mod config_cmd;
pub mod crm;
pub mod dashboard;
pub mod documents;
pub mod employees;
pub mod forms;
pub mod organization;
pub mod payroll;
pub mod session_cmd;
pub mod util;

use hrdesk_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a backend command to its handler.
pub async fn dispatch(cmd: Command, console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Departments(args) => organization::handle_departments(console, args, global).await,
        Command::Designations(args) => {
            organization::handle_designations(console, args, global).await
        }
        Command::Employees(args) => employees::handle(console, args, global).await,
        Command::Assets(args) => assets::handle(console, args, global).await,
        Command::Leads(args) => crm::handle_leads(console, args, global).await,
        Command::Activities(args) => crm::handle_activities(console, args, global).await,
        Command::Notes(args) => crm::handle_notes(console, args, global).await,
        Command::Tags(args) => crm::handle_tags(console, args, global).await,
        Command::Customers(args) => crm::handle_customers(console, args, global).await,
        Command::Payroll(args) => payroll::handle(console, args, global).await,
        Command::Attendance(args) => attendance::handle(console, args, global).await,
        Command::Forms(args) => forms::handle(console, args, global).await,
        Command::Documents(args) => documents::handle(console, args, global).await,
        Command::Dashboard(args) => dashboard::handle(console, &args, global).await,

        // Handled before a console is built
        Command::Config(_)
        | Command::Session(_)
        | Command::Validate(_)
        | Command::Salary(_)
        | Command::Completions(_) => unreachable!("local commands are handled in main"),
    }
}

//! Dashboard handler.

use owo_colors::OwoColorize;

use hrdesk_core::{Console, DashboardSummary};

use crate::cli::{DashboardArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(d: &DashboardSummary, color: bool) -> String {
    let heading = |s: &str| {
        if color {
            s.bold().to_string()
        } else {
            s.to_owned()
        }
    };
    let att = &d.attendance;
    format!(
        "{}\n{}\n\n{}\n{}\n\n{}\n{}",
        heading("People"),
        output::detail(&[
            ("Employees", d.employees.to_string()),
            ("Active", d.active_employees.to_string()),
            ("Departments", d.departments.to_string()),
        ]),
        heading("Pipeline"),
        output::detail(&[
            ("Leads", d.leads.to_string()),
            ("Open", d.open_leads.to_string()),
            ("Won", d.won_leads.to_string()),
        ]),
        heading(&format!("Attendance {}", att.date)),
        output::detail(&[
            ("Present", att.present.to_string()),
            ("Absent", att.absent.to_string()),
            ("On leave", att.on_leave.to_string()),
            ("Late", att.late.to_string()),
        ]),
    )
}

pub async fn handle(
    console: &Console,
    args: &DashboardArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let date = util::date_or_today("date", args.date.as_deref())?;
    let summary = console.fetch_dashboard(date).await?;
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &summary,
        |d| detail(d, color),
        |d| d.employees.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

//! Payroll command handlers.

use tabled::Tabled;

use hrdesk_core::{Console, Payroll, PayrollStatus};

use crate::cli::{GlobalOpts, PayrollArgs, PayrollCommand, PayrollStatusArg};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PayrollRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Deductions")]
    deductions: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Payroll> for PayrollRow {
    fn from(p: &Payroll) -> Self {
        Self {
            id: p.payroll_id.clone(),
            employee: p.employee_id.clone(),
            period: format!("{}-{:02}", p.year, p.month),
            gross: util::money(p.gross_pay),
            deductions: util::money(p.deductions),
            net: util::money(p.net_pay),
            status: p.status.to_string(),
        }
    }
}

fn payroll_status(arg: PayrollStatusArg) -> PayrollStatus {
    match arg {
        PayrollStatusArg::Draft => PayrollStatus::Draft,
        PayrollStatusArg::Processed => PayrollStatus::Processed,
        PayrollStatusArg::Approved => PayrollStatus::Approved,
        PayrollStatusArg::Paid => PayrollStatus::Paid,
    }
}

fn print_entries(entries: &[Payroll], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        entries,
        |p| PayrollRow::from(p),
        |p| p.payroll_id.clone(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle(
    console: &Console,
    args: PayrollArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PayrollCommand::List { month, year } => {
            let entries = console.fetch_payroll(month, year).await?;
            print_entries(&entries, global);
            Ok(())
        }

        PayrollCommand::Employee { id } => {
            let entries = console.fetch_employee_payroll(id.as_deref()).await?;
            print_entries(&entries, global);
            Ok(())
        }

        PayrollCommand::Generate { month, year } => {
            if !util::confirm(
                &format!("Generate payroll for {year}-{month:02}?"),
                global.yes,
            )? {
                return Ok(());
            }
            let entries = console.generate_payroll(month, year).await?;
            output::success(
                &format!("Generated {} payroll entries", entries.len()),
                &global.color,
                global.quiet,
            );
            print_entries(&entries, global);
            Ok(())
        }

        PayrollCommand::Status { id, status } => {
            let entry = console
                .update_payroll_status(&id, payroll_status(status))
                .await?;
            output::success(
                &format!("Payroll {id} is now {}", entry.status),
                &global.color,
                global.quiet,
            );
            Ok(())
        }
    }
}

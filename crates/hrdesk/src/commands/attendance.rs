//! Attendance command handlers (served by the attendance service).

use tabled::Tabled;

use hrdesk_core::{AttendanceRecord, AttendanceSummary, Console};

use crate::cli::{AttendanceArgs, AttendanceCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AttendanceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "In")]
    check_in: String,
    #[tabled(rename = "Out")]
    check_out: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&AttendanceRecord> for AttendanceRow {
    fn from(r: &AttendanceRecord) -> Self {
        Self {
            date: r.date.clone(),
            employee: r.employee_id.clone(),
            check_in: util::or_dash(r.check_in.as_deref()),
            check_out: util::or_dash(r.check_out.as_deref()),
            status: util::or_dash(r.status.as_deref()),
        }
    }
}

fn summary_detail(s: &AttendanceSummary) -> String {
    output::detail(&[
        ("Date", s.date.clone()),
        ("Present", s.present.to_string()),
        ("Absent", s.absent.to_string()),
        ("On leave", s.on_leave.to_string()),
        ("Late", s.late.to_string()),
    ])
}

pub async fn handle(
    console: &Console,
    args: AttendanceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AttendanceCommand::List { employee, from, to } => {
            let from = util::parse_date("from", &from)?;
            let to = util::parse_date("to", &to)?;
            let records = console
                .fetch_attendance(employee.as_deref(), from, to)
                .await?;
            let out = output::render_list(
                &global.output,
                &records,
                |r| AttendanceRow::from(r),
                |r| r.attendance_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AttendanceCommand::Summary { date } => {
            let date = util::date_or_today("date", date.as_deref())?;
            let summary = console.fetch_attendance_summary(date).await?;
            let out = output::render_single(&global.output, &summary, summary_detail, |s| {
                s.present.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AttendanceCommand::CheckIn { employee } => {
            let record = console.check_in(employee.as_deref()).await?;
            output::success(
                &format!(
                    "Checked in at {}",
                    record.check_in.as_deref().unwrap_or("now")
                ),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        AttendanceCommand::CheckOut { employee } => {
            let record = console.check_out(employee.as_deref()).await?;
            output::success(
                &format!(
                    "Checked out at {}",
                    record.check_out.as_deref().unwrap_or("now")
                ),
                &global.color,
                global.quiet,
            );
            Ok(())
        }
    }
}

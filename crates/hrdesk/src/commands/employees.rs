//! Employee handlers, plus the offline `validate` and `salary` commands.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tabled::Tabled;

use hrdesk_core::onboarding::{Blocked, derive_salary};
use hrdesk_core::{
    Attachment, AttachmentField, Availability, Console, CoreError, Employee, EmployeeDraft, Field,
    OnboardingForm, SalaryBreakdown,
};

use crate::cli::{EmployeesArgs, EmployeesCommand, GlobalOpts, SalaryArgs, ValidateArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Draft file ──────────────────────────────────────────────────────

/// On-disk onboarding draft.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct DraftFile {
    #[serde(default)]
    values: BTreeMap<String, String>,
    #[serde(default)]
    pf_enrolled: bool,
    /// File input -> path, relative to the draft file.
    #[serde(default)]
    attachments: BTreeMap<String, String>,
}

/// Load a draft file into an `EmployeeDraft`. Attachments are read and
/// checked (type, size) here, so bad files fail before any request.
pub fn load_draft(path: &Path) -> Result<EmployeeDraft, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let file: DraftFile = serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "draft".into(),
        reason: e.to_string(),
    })?;

    let mut draft = EmployeeDraft::new();
    draft.pf_enrolled = file.pf_enrolled;
    for (key, value) in file.values {
        let field = Field::from_str(&key).map_err(|_| CliError::Validation {
            field: key.clone(),
            reason: "not an onboarding form field".into(),
        })?;
        draft.set(field, value);
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    for (key, rel) in file.attachments {
        let field = AttachmentField::from_str(&key).map_err(|_| CliError::Validation {
            field: key.clone(),
            reason: "not an onboarding file input".into(),
        })?;
        let attachment =
            Attachment::from_path(field, &base.join(rel)).map_err(CoreError::from)?;
        draft.attach(attachment);
    }
    Ok(draft)
}

/// Run full-form validation; on failure print every error grouped by tab.
fn check_draft(draft: EmployeeDraft) -> Result<EmployeeDraft, CliError> {
    let mut form = OnboardingForm::new(draft);
    if let Err(Blocked { tab, errors }) = form.submit() {
        let mut listed: Vec<_> = errors.iter().collect();
        listed.sort_by_key(|(key, _)| key.tab());
        let mut current = None;
        for (key, err) in &listed {
            if current != Some(key.tab()) {
                current = Some(key.tab());
                eprintln!("{}:", key.tab());
            }
            eprintln!("  {key}: {err}");
        }
        return Err(CliError::InvalidDraft {
            count: errors.len(),
            tab: tab.to_string(),
        });
    }
    Ok(form.into_draft())
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Employee> for EmployeeRow {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.employee_id.clone(),
            name: e.full_name(),
            email: util::or_dash(e.email.as_deref()),
            phone: util::or_dash(e.phone.as_deref()),
            department: util::or_dash(e.department_id.as_deref()),
            status: util::or_dash(e.status.as_deref()),
        }
    }
}

fn employee_detail(e: &Employee) -> String {
    output::detail(&[
        ("ID", e.employee_id.clone()),
        ("Name", e.full_name()),
        ("Email", e.email.clone().unwrap_or_default()),
        ("Phone", e.phone.clone().unwrap_or_default()),
        ("Department", e.department_id.clone().unwrap_or_default()),
        ("Designation", e.designation_id.clone().unwrap_or_default()),
        ("Joined", e.joining_date.clone().unwrap_or_default()),
        ("Status", e.status.clone().unwrap_or_default()),
    ])
}

fn salary_detail(s: &SalaryBreakdown) -> String {
    output::detail(&[
        ("Monthly CTC", util::money(s.monthly_ctc)),
        ("Basic", util::money(s.basic_salary)),
        ("HRA", util::money(s.hra)),
        ("Employer PF", util::money(s.employer_pf_contribution)),
        ("Employee PF", util::money(s.employee_pf_contribution)),
        ("Allowances", util::money(s.allowances)),
    ])
}

fn report_availability(what: &str, value: &str, result: Option<Availability>, global: &GlobalOpts) {
    match result {
        Some(a) if a.available => {
            output::success(&format!("{what} {value} is available"), &global.color, false);
        }
        Some(a) => output::warn(
            &a.message
                .unwrap_or_else(|| format!("{what} {value} is already in use")),
            &global.color,
        ),
        None => output::warn("Check superseded by a newer one", &global.color),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: EmployeesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        EmployeesCommand::List => {
            let employees = console.fetch_employees().await?;
            let out = output::render_list(
                &global.output,
                &employees,
                |e| EmployeeRow::from(e),
                |e| e.employee_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EmployeesCommand::Get { id } => {
            let employee = console.fetch_employee(&id).await?;
            let out = output::render_single(&global.output, &employee, employee_detail, |e| {
                e.employee_id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EmployeesCommand::Onboard { draft } => {
            let draft = check_draft(load_draft(&draft)?)?;
            let employee = console.onboard_employee(draft).await?;
            output::success(
                &format!(
                    "Onboarded {} ({})",
                    employee.full_name(),
                    employee.employee_id
                ),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        EmployeesCommand::Update { id, draft } => {
            let draft = load_draft(&draft)?;
            console.update_employee(&id, draft).await?;
            output::success("Employee updated", &global.color, global.quiet);
            Ok(())
        }

        EmployeesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete employee {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_employee(&id).await?;
            output::success("Employee deleted", &global.color, global.quiet);
            Ok(())
        }

        EmployeesCommand::CheckEmail { email } => {
            let result = console.check_email_available(&email).await?;
            report_availability("Email", &email, result, global);
            Ok(())
        }

        EmployeesCommand::CheckPhone { phone } => {
            let result = console.check_phone_available(&phone).await?;
            report_availability("Phone", &phone, result, global);
            Ok(())
        }
    }
}

/// `hrdesk validate <DRAFT>`: full-form validation without a backend.
pub fn validate(args: &ValidateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let draft = check_draft(load_draft(&args.draft)?)?;
    output::success("Draft is valid", &global.color, global.quiet);
    if let Some(breakdown) = draft.salary() {
        let out = output::render_single(&global.output, &breakdown, salary_detail, |s| {
            util::money(s.monthly_ctc)
        });
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

/// `hrdesk salary <CTC> <BASIC>`: the Salary tab's derived figures.
pub fn salary(args: &SalaryArgs, global: &GlobalOpts) {
    let breakdown = derive_salary(args.annual_ctc, args.basic, !args.no_pf);
    let out = output::render_single(&global.output, &breakdown, salary_detail, |s| {
        util::money(s.allowances)
    });
    output::print_output(&out, global.quiet);
}

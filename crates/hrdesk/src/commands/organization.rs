//! Department and designation command handlers.

use tabled::Tabled;

use hrdesk_core::{Console, Department, DepartmentRequest, Designation, DesignationRequest};

use crate::cli::{
    DepartmentsArgs, DepartmentsCommand, DesignationsArgs, DesignationsCommand, GlobalOpts,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DepartmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Head")]
    head: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Department> for DepartmentRow {
    fn from(d: &Department) -> Self {
        Self {
            id: d.department_id.clone(),
            name: d.name.clone(),
            head: util::or_dash(d.head_employee_id.as_deref()),
            description: d.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct DesignationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Level")]
    level: String,
}

impl From<&Designation> for DesignationRow {
    fn from(d: &Designation) -> Self {
        Self {
            id: d.designation_id.clone(),
            name: d.name.clone(),
            department: util::or_dash(d.department_id.as_deref()),
            level: d.level.map(|l| l.to_string()).unwrap_or_default(),
        }
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle_departments(
    console: &Console,
    args: DepartmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DepartmentsCommand::List => {
            let departments = console.fetch_departments().await?;
            let out = output::render_list(
                &global.output,
                &departments,
                |d| DepartmentRow::from(d),
                |d| d.department_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DepartmentsCommand::Create {
            name,
            description,
            head,
        } => {
            let body = DepartmentRequest {
                name,
                description,
                company_id: console.company_id().to_owned(),
                head_employee_id: head,
            };
            let created = console.create_department(&body).await?;
            output::success(
                &format!("Department created ({})", created.department_id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        DepartmentsCommand::Update {
            id,
            name,
            description,
            head,
        } => {
            let body = DepartmentRequest {
                name,
                description,
                company_id: console.company_id().to_owned(),
                head_employee_id: head,
            };
            console.update_department(&id, &body).await?;
            output::success("Department updated", &global.color, global.quiet);
            Ok(())
        }

        DepartmentsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete department {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_department(&id).await?;
            output::success("Department deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}

pub async fn handle_designations(
    console: &Console,
    args: DesignationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DesignationsCommand::List { department } => {
            let designations = match department {
                Some(ref id) => console.fetch_designations_by_department(id).await?,
                None => console.fetch_designations().await?,
            };
            let out = output::render_list(
                &global.output,
                &designations,
                |d| DesignationRow::from(d),
                |d| d.designation_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DesignationsCommand::Create {
            name,
            department,
            level,
            description,
        } => {
            let body = DesignationRequest {
                name,
                department_id: department,
                company_id: console.company_id().to_owned(),
                level,
                description,
            };
            let created = console.create_designation(&body).await?;
            output::success(
                &format!("Designation created ({})", created.designation_id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        DesignationsCommand::Update {
            id,
            name,
            department,
            level,
            description,
        } => {
            let body = DesignationRequest {
                name,
                department_id: department,
                company_id: console.company_id().to_owned(),
                level,
                description,
            };
            console.update_designation(&id, &body).await?;
            output::success("Designation updated", &global.color, global.quiet);
            Ok(())
        }

        DesignationsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete designation {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_designation(&id).await?;
            output::success("Designation deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}

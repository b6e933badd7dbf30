//! Custom form command handlers.

use chrono::Utc;
use tabled::Tabled;

use hrdesk_core::convert::canonicalize_form;
use hrdesk_core::{Console, CustomForm};

use crate::cli::{FormsArgs, FormsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct FormRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Fields")]
    fields: usize,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&CustomForm> for FormRow {
    fn from(f: &CustomForm) -> Self {
        Self {
            id: f.form_id.clone(),
            title: f.title.clone(),
            fields: f.fields.len(),
            active: if f.is_active { "yes" } else { "no" }.into(),
        }
    }
}

fn detail(f: &CustomForm) -> String {
    let mut out = output::detail(&[
        ("ID", f.form_id.clone()),
        ("Title", f.title.clone()),
        ("Description", f.description.clone().unwrap_or_default()),
        ("Active", f.is_active.to_string()),
        ("Created", f.created_at.clone().unwrap_or_default()),
    ]);
    for field in &f.fields {
        let required = if field.required { " *" } else { "" };
        out.push_str(&format!(
            "\n  {} ({}){required}: {}",
            field.field_name, field.field_type, field.label
        ));
        if !field.options.is_empty() {
            out.push_str(&format!(" [{}]", field.options.join(" | ")));
        }
    }
    out
}

pub async fn handle(
    console: &Console,
    args: FormsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FormsCommand::List => {
            let forms = console.fetch_forms().await?;
            let out = output::render_list(
                &global.output,
                &forms,
                |f| FormRow::from(f),
                |f| f.form_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FormsCommand::Get { id } => {
            let form = console.fetch_form(&id).await?;
            let out = output::render_single(&global.output, &form, detail, |f| f.form_id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FormsCommand::Create { from_file } => {
            let form = canonicalize_form(&util::read_json_file(&from_file)?, Utc::now());
            let created = console.create_form(&form).await?;
            output::success(
                &format!("Form created ({})", created.form_id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        FormsCommand::Update { id, from_file } => {
            let mut form = canonicalize_form(&util::read_json_file(&from_file)?, Utc::now());
            form.form_id = id;
            console.update_form(&form).await?;
            output::success("Form updated", &global.color, global.quiet);
            Ok(())
        }

        FormsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete form {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_form(&id).await?;
            output::success("Form deleted", &global.color, global.quiet);
            Ok(())
        }

        FormsCommand::Submit { id, from_file } => {
            let answers = util::read_json_file(&from_file)?;
            console.submit_form(&id, &answers).await?;
            output::success("Form submitted", &global.color, global.quiet);
            Ok(())
        }
    }
}

//! CRM handlers: leads, activities, notes, tags and customers.

use tabled::Tabled;

use hrdesk_core::{
    Activity, ActivityRequest, ActivityType, Console, Customer, CustomerRequest, Lead,
    LeadRequest, LeadStatus, Note, Tag, TagRequest,
};

use crate::cli::{
    ActivitiesArgs, ActivitiesCommand, ActivityTypeArg, CustomersArgs, CustomersCommand,
    GlobalOpts, LeadStatusArg, LeadsArgs, LeadsCommand, NotesArgs, NotesCommand, TagsArgs,
    TagsCommand,
};
use crate::error::CliError;
use crate::output;

use super::util;

fn lead_status(arg: LeadStatusArg) -> LeadStatus {
    match arg {
        LeadStatusArg::New => LeadStatus::New,
        LeadStatusArg::Contacted => LeadStatus::Contacted,
        LeadStatusArg::Qualified => LeadStatus::Qualified,
        LeadStatusArg::Proposal => LeadStatus::Proposal,
        LeadStatusArg::Won => LeadStatus::Won,
        LeadStatusArg::Lost => LeadStatus::Lost,
    }
}

fn activity_type(arg: ActivityTypeArg) -> ActivityType {
    match arg {
        ActivityTypeArg::Call => ActivityType::Call,
        ActivityTypeArg::Email => ActivityType::Email,
        ActivityTypeArg::Meeting => ActivityType::Meeting,
        ActivityTypeArg::Task => ActivityType::Task,
    }
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct LeadRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Lead> for LeadRow {
    fn from(l: &Lead) -> Self {
        Self {
            id: l.lead_id.clone(),
            name: l.name.clone(),
            company: util::or_dash(l.company_name.as_deref()),
            status: l.status.to_string(),
            value: l.value.map(util::money).unwrap_or_default(),
            tags: l.tags.join(", "),
        }
    }
}

fn lead_detail(l: &Lead) -> String {
    output::detail(&[
        ("ID", l.lead_id.clone()),
        ("Name", l.name.clone()),
        ("Email", l.email.clone().unwrap_or_default()),
        ("Phone", l.phone.clone().unwrap_or_default()),
        ("Company", l.company_name.clone().unwrap_or_default()),
        ("Status", l.status.to_string()),
        ("Source", l.source.clone().unwrap_or_default()),
        ("Owner", l.owner_id.clone().unwrap_or_default()),
        ("Value", l.value.map(util::money).unwrap_or_default()),
        ("Tags", l.tags.join(", ")),
    ])
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Scheduled")]
    scheduled: String,
    #[tabled(rename = "Done")]
    done: String,
}

impl From<&Activity> for ActivityRow {
    fn from(a: &Activity) -> Self {
        Self {
            id: a.activity_id.clone(),
            kind: a.activity_type.to_string(),
            subject: a.subject.clone(),
            scheduled: util::or_dash(a.scheduled_at.as_deref()),
            done: if a.completed { "yes" } else { "no" }.into(),
        }
    }
}

#[derive(Tabled)]
struct NoteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Note")]
    content: String,
    #[tabled(rename = "By")]
    by: String,
    #[tabled(rename = "At")]
    at: String,
}

impl From<&Note> for NoteRow {
    fn from(n: &Note) -> Self {
        Self {
            id: n.note_id.clone(),
            content: n.content.clone(),
            by: util::or_dash(n.created_by.as_deref()),
            at: util::or_dash(n.created_at.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
}

impl From<&Tag> for TagRow {
    fn from(t: &Tag) -> Self {
        Self {
            id: t.tag_id.clone(),
            name: t.name.clone(),
            color: util::or_dash(t.color.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "GSTIN")]
    gstin: String,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.customer_id.clone(),
            name: c.name.clone(),
            company: util::or_dash(c.company_name.as_deref()),
            email: util::or_dash(c.email.as_deref()),
            gstin: util::or_dash(c.gstin.as_deref()),
        }
    }
}

fn customer_detail(c: &Customer) -> String {
    output::detail(&[
        ("ID", c.customer_id.clone()),
        ("Name", c.name.clone()),
        ("Company", c.company_name.clone().unwrap_or_default()),
        ("Email", c.email.clone().unwrap_or_default()),
        ("Phone", c.phone.clone().unwrap_or_default()),
        ("GSTIN", c.gstin.clone().unwrap_or_default()),
        ("Billing", c.billing_address.clone().unwrap_or_default()),
    ])
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle_leads(
    console: &Console,
    args: LeadsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LeadsCommand::List => {
            let leads = console.fetch_leads().await?;
            let out = output::render_list(
                &global.output,
                &leads,
                |l| LeadRow::from(l),
                |l| l.lead_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LeadsCommand::Get { id } => {
            let lead = console.fetch_lead(&id).await?;
            let out = output::render_single(&global.output, &lead, lead_detail, |l| {
                l.lead_id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LeadsCommand::Create { from_file } => {
            let body: LeadRequest = util::read_request(&from_file, console.company_id())?;
            let created = console.create_lead(&body).await?;
            output::success(
                &format!("Lead created ({})", created.lead_id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        LeadsCommand::Update { id, from_file } => {
            let body: LeadRequest = util::read_request(&from_file, console.company_id())?;
            console.update_lead(&id, &body).await?;
            output::success("Lead updated", &global.color, global.quiet);
            Ok(())
        }

        LeadsCommand::Status { id, status } => {
            let lead = console.update_lead_status(&id, lead_status(status)).await?;
            output::success(
                &format!("Lead {id} is now {}", lead.status),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        LeadsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete lead {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_lead(&id).await?;
            output::success("Lead deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}

pub async fn handle_activities(
    console: &Console,
    args: ActivitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ActivitiesCommand::List { lead } => {
            let activities = console.fetch_activities(&lead).await?;
            let out = output::render_list(
                &global.output,
                &activities,
                |a| ActivityRow::from(a),
                |a| a.activity_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ActivitiesCommand::Create {
            lead,
            r#type,
            subject,
            description,
            at,
        } => {
            let body = ActivityRequest {
                activity_type: activity_type(r#type),
                subject,
                description,
                scheduled_at: at,
            };
            let created = console.create_activity(&lead, &body).await?;
            output::success(
                &format!("Activity scheduled ({})", created.activity_id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        ActivitiesCommand::Complete { lead, id } => {
            console.complete_activity(&lead, &id).await?;
            output::success("Activity completed", &global.color, global.quiet);
            Ok(())
        }

        ActivitiesCommand::Delete { lead, id } => {
            if !util::confirm(&format!("Delete activity {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_activity(&lead, &id).await?;
            output::success("Activity deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}

pub async fn handle_notes(
    console: &Console,
    args: NotesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NotesCommand::List { lead } => {
            let notes = console.fetch_notes(&lead).await?;
            let out = output::render_list(
                &global.output,
                &notes,
                |n| NoteRow::from(n),
                |n| n.note_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NotesCommand::Add { lead, content } => {
            let note = console.create_note(&lead, &content).await?;
            output::success(
                &format!("Note added ({})", note.note_id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        NotesCommand::Edit { lead, id, content } => {
            console.update_note(&lead, &id, &content).await?;
            output::success("Note updated", &global.color, global.quiet);
            Ok(())
        }

        NotesCommand::Delete { lead, id } => {
            if !util::confirm(&format!("Delete note {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_note(&lead, &id).await?;
            output::success("Note deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}

pub async fn handle_tags(
    console: &Console,
    args: TagsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TagsCommand::List => {
            let tags = console.fetch_tags().await?;
            let out = output::render_list(
                &global.output,
                &tags,
                |t| TagRow::from(t),
                |t| t.tag_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TagsCommand::Create { name, color } => {
            let body = TagRequest {
                name,
                company_id: console.company_id().to_owned(),
                color,
            };
            let created = console.create_tag(&body).await?;
            output::success(
                &format!("Tag created ({})", created.tag_id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        TagsCommand::Delete { id } => {
            console.delete_tag(&id).await?;
            output::success("Tag deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}

pub async fn handle_customers(
    console: &Console,
    args: CustomersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CustomersCommand::List => {
            let customers = console.fetch_customers().await?;
            let out = output::render_list(
                &global.output,
                &customers,
                |c| CustomerRow::from(c),
                |c| c.customer_id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Get { id } => {
            let customer = console.fetch_customer(&id).await?;
            let out = output::render_single(&global.output, &customer, customer_detail, |c| {
                c.customer_id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Create { from_file } => {
            let body: CustomerRequest = util::read_request(&from_file, console.company_id())?;
            let created = console.create_customer(&body).await?;
            output::success(
                &format!("Customer created ({})", created.customer_id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        CustomersCommand::Update { id, from_file } => {
            let body: CustomerRequest = util::read_request(&from_file, console.company_id())?;
            console.update_customer(&id, &body).await?;
            output::success("Customer updated", &global.color, global.quiet);
            Ok(())
        }

        CustomersCommand::Delete { id } => {
            if !util::confirm(&format!("Delete customer {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_customer(&id).await?;
            output::success("Customer deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}

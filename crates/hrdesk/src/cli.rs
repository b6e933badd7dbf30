//! Clap derive structures for the `hrdesk` CLI.
//!
//! Defines the command tree, global flags, and the value enums shared by
//! handlers. Kept free of workspace types so `build.rs` can include it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hrdesk -- HR and CRM administration from the command line
#[derive(Debug, Parser)]
#[command(
    name = "hrdesk",
    version,
    about = "Administer the hrdesk HR/CRM backend from the command line",
    long_about = "Onboard employees, manage departments, assets, leads and payroll,\n\
        and inspect attendance against an hrdesk REST backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "HRDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// REST API base URL (overrides profile)
    #[arg(long, env = "HRDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Attendance service base URL (overrides profile)
    #[arg(long, env = "HRDESK_ATTENDANCE_URL", global = true)]
    pub attendance_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "HRDESK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Company ID (overrides profile and session)
    #[arg(long, env = "HRDESK_COMPANY", global = true)]
    pub company: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HRDESK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "HRDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: profile, then config defaults]
    #[arg(long, env = "HRDESK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LeadStatusArg {
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ActivityTypeArg {
    Call,
    Email,
    Meeting,
    Task,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PayrollStatusArg {
    Draft,
    Processed,
    Approved,
    Paid,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DocumentKindArg {
    Invoice,
    Quotation,
    PurchaseOrder,
    SalesOrder,
    CreditNote,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage departments
    #[command(alias = "dept")]
    Departments(DepartmentsArgs),

    /// Manage designations
    #[command(alias = "desig")]
    Designations(DesignationsArgs),

    /// Onboard and manage employees
    #[command(alias = "emp")]
    Employees(EmployeesArgs),

    /// Validate an onboarding draft without submitting it
    Validate(ValidateArgs),

    /// Derive the monthly salary breakdown from CTC and basic
    Salary(SalaryArgs),

    /// Manage the asset inventory
    Assets(AssetsArgs),

    /// Manage CRM leads
    Leads(LeadsArgs),

    /// Manage activities on a lead
    Activities(ActivitiesArgs),

    /// Manage notes on a lead
    Notes(NotesArgs),

    /// Manage CRM tags
    Tags(TagsArgs),

    /// Manage customers
    Customers(CustomersArgs),

    /// Generate and review payroll
    Payroll(PayrollArgs),

    /// Attendance records and punches
    #[command(alias = "att")]
    Attendance(AttendanceArgs),

    /// Manage custom forms
    Forms(FormsArgs),

    /// Document-number series (invoices, quotations, ...)
    #[command(alias = "docs")]
    Documents(DocumentsArgs),

    /// Headcount, pipeline and attendance at a glance
    Dashboard(DashboardArgs),

    /// Manage the session shared with the web console
    Session(SessionArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ORGANIZATION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DepartmentsArgs {
    #[command(subcommand)]
    pub command: DepartmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DepartmentsCommand {
    /// List departments
    #[command(alias = "ls")]
    List,

    /// Create a department
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Employee ID of the department head
        #[arg(long)]
        head: Option<String>,
    },

    /// Update a department
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        head: Option<String>,
    },

    /// Delete a department
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct DesignationsArgs {
    #[command(subcommand)]
    pub command: DesignationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DesignationsCommand {
    /// List designations, optionally within one department
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 'd')]
        department: Option<String>,
    },

    /// Create a designation
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, short = 'd')]
        department: String,
        #[arg(long)]
        level: Option<u32>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Update a designation
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long, short = 'd')]
        department: String,
        #[arg(long)]
        level: Option<u32>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a designation
    #[command(alias = "rm")]
    Delete { id: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EMPLOYEES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    /// List employees
    #[command(alias = "ls")]
    List,

    /// Show one employee
    Get { id: String },

    /// Onboard an employee from a draft file
    ///
    /// The draft is JSON: `values` maps form keys (firstName, ifscCode, ...)
    /// to text, `pfEnrolled` is a boolean, and `attachments` maps file
    /// inputs (aadharImage, passbookImage, ...) to paths relative to the
    /// draft file.
    Onboard {
        /// Draft JSON file
        draft: PathBuf,
    },

    /// Update an employee from a draft file; blank fields are left as-is
    Update { id: String, draft: PathBuf },

    /// Delete an employee
    #[command(alias = "rm")]
    Delete { id: String },

    /// Check whether an email address is free
    CheckEmail { email: String },

    /// Check whether a phone number is free
    CheckPhone { phone: String },
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Draft JSON file (same format as `employees onboard`)
    pub draft: PathBuf,
}

#[derive(Debug, Args)]
pub struct SalaryArgs {
    /// Annual cost to company
    pub annual_ctc: f64,

    /// Monthly basic salary
    pub basic: f64,

    /// The employee is not enrolled in provident fund
    #[arg(long)]
    pub no_pf: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ASSETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AssetsArgs {
    #[command(subcommand)]
    pub command: AssetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AssetsCommand {
    /// List assets
    #[command(alias = "ls")]
    List,

    /// Show one asset
    Get { id: String },

    /// Create an asset from a JSON file
    Create {
        /// Asset JSON (name, category, serialNumber, ...)
        #[arg(long, short = 'F')]
        from_file: PathBuf,

        /// Purchase invoice (PDF, JPEG or PNG, at most 5 MB)
        #[arg(long)]
        invoice: Option<PathBuf>,
    },

    /// Update an asset from a JSON file
    Update {
        id: String,
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete an asset
    #[command(alias = "rm")]
    Delete { id: String },

    /// Assign an asset to an employee
    Assign {
        id: String,
        #[arg(long, short = 'e')]
        employee: String,
    },

    /// Release an asset back to the pool
    Release { id: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CRM
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LeadsArgs {
    #[command(subcommand)]
    pub command: LeadsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LeadsCommand {
    /// List leads
    #[command(alias = "ls")]
    List,

    /// Show one lead
    Get { id: String },

    /// Create a lead from a JSON file
    Create {
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Update a lead from a JSON file
    Update {
        id: String,
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Move a lead through the pipeline
    Status {
        id: String,
        #[arg(value_enum)]
        status: LeadStatusArg,
    },

    /// Delete a lead
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct ActivitiesArgs {
    #[command(subcommand)]
    pub command: ActivitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActivitiesCommand {
    /// List activities on a lead
    #[command(alias = "ls")]
    List { lead: String },

    /// Schedule an activity
    Create {
        lead: String,
        #[arg(long, value_enum, default_value = "task")]
        r#type: ActivityTypeArg,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        description: Option<String>,
        /// RFC 3339 timestamp
        #[arg(long)]
        at: Option<String>,
    },

    /// Mark an activity done
    Complete { lead: String, id: String },

    /// Delete an activity
    #[command(alias = "rm")]
    Delete { lead: String, id: String },
}

#[derive(Debug, Args)]
pub struct NotesArgs {
    #[command(subcommand)]
    pub command: NotesCommand,
}

#[derive(Debug, Subcommand)]
pub enum NotesCommand {
    /// List notes on a lead
    #[command(alias = "ls")]
    List { lead: String },

    /// Add a note
    Add { lead: String, content: String },

    /// Replace a note's text
    Edit {
        lead: String,
        id: String,
        content: String,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete { lead: String, id: String },
}

#[derive(Debug, Args)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TagsCommand {
    /// List tags
    #[command(alias = "ls")]
    List,

    /// Create a tag
    Create {
        name: String,
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a tag
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customers
    #[command(alias = "ls")]
    List,

    /// Show one customer
    Get { id: String },

    /// Create a customer from a JSON file
    Create {
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Update a customer from a JSON file
    Update {
        id: String,
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete a customer
    #[command(alias = "rm")]
    Delete { id: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAYROLL & ATTENDANCE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PayrollArgs {
    #[command(subcommand)]
    pub command: PayrollCommand,
}

#[derive(Debug, Subcommand)]
pub enum PayrollCommand {
    /// List the company payroll for a month
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 'm')]
        month: u32,
        #[arg(long)]
        year: i32,
    },

    /// Payslips of one employee (defaults to yourself)
    Employee { id: Option<String> },

    /// Generate payroll for a month
    Generate {
        #[arg(long, short = 'm')]
        month: u32,
        #[arg(long)]
        year: i32,
    },

    /// Change a payroll entry's status
    Status {
        id: String,
        #[arg(value_enum)]
        status: PayrollStatusArg,
    },
}

#[derive(Debug, Args)]
pub struct AttendanceArgs {
    #[command(subcommand)]
    pub command: AttendanceCommand,
}

#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// Records in a date range (defaults to yourself)
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 'e')]
        employee: Option<String>,
        /// First day, YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        to: String,
    },

    /// Company-wide counts for one day (defaults to today)
    Summary {
        #[arg(long)]
        date: Option<String>,
    },

    /// Punch in
    CheckIn {
        #[arg(long, short = 'e')]
        employee: Option<String>,
    },

    /// Punch out
    CheckOut {
        #[arg(long, short = 'e')]
        employee: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FORMS & DOCUMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FormsArgs {
    #[command(subcommand)]
    pub command: FormsCommand,
}

#[derive(Debug, Subcommand)]
pub enum FormsCommand {
    /// List custom forms
    #[command(alias = "ls")]
    List,

    /// Show one form with its fields
    Get { id: String },

    /// Create a form from a JSON file
    Create {
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Update a form from a JSON file
    Update {
        id: String,
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete a form
    #[command(alias = "rm")]
    Delete { id: String },

    /// Submit answers to a form
    Submit {
        id: String,
        /// Answers JSON, keyed by field name
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct DocumentsArgs {
    #[command(subcommand)]
    pub command: DocumentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DocumentsCommand {
    /// Show a series' numbering settings
    Settings {
        #[arg(value_enum)]
        kind: DocumentKindArg,
    },

    /// Change a series' numbering settings
    Update {
        #[arg(value_enum)]
        kind: DocumentKindArg,
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        suffix: Option<String>,
        #[arg(long)]
        next_number: Option<u64>,
        #[arg(long)]
        padding: Option<u8>,
    },

    /// Preview the next document number, initializing the series if needed
    Preview {
        #[arg(value_enum)]
        kind: DocumentKindArg,
    },
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Attendance day, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SESSION & CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Store a token and tenant IDs in the session file
    Login {
        /// Company to administer
        #[arg(long)]
        company: String,
        /// Your own employee ID
        #[arg(long)]
        employee: Option<String>,
    },

    /// Show what the session holds (token masked)
    Show,

    /// Remove the token and tenant IDs
    Logout,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Display current configuration
    Show,

    /// Set a configuration value on the active profile
    Set {
        /// Config key (e.g., "api_url", "company_id")
        key: String,
        /// Value to set
        value: String,
    },

    /// List profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Store a bearer token in the system keyring
    SetToken {
        /// Profile name (defaults to the active one)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

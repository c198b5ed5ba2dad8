use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use condo_resources::{ResourceKind, Status};
use condo_security::Role;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "condo", version, about = "Role-scoped condo resources")]
pub struct Cli {
    /// YAML configuration file.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `database.url` from the configuration.
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Subject id of the acting principal.
    #[arg(long = "as", global = true, requires = "role")]
    pub subject: Option<Uuid>,

    /// Role of the acting principal (admin, resident, provider).
    #[arg(long, global = true, requires = "subject")]
    pub role: Option<Role>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List resources of a kind visible to the principal.
    List {
        kind: ResourceKind,
        /// Print per-status counts instead of rows.
        #[arg(long)]
        summary: bool,
    },
    /// Create a resource.
    Create {
        #[command(subcommand)]
        resource: CreateCommand,
    },
    /// Move a resource to another status.
    Transition {
        kind: ResourceKind,
        id: Uuid,
        to: Status,
        /// Provider to assign when an incident goes in progress.
        #[arg(long)]
        provider: Option<Uuid>,
        /// Notes recorded when an incident is resolved.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Dashboard counters.
    Stats,
    /// Sections the principal can open.
    Sections,
    /// Register or replace a unit. Does not require a principal.
    SeedUnit(SeedUnitArgs),
}

#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    Payment {
        #[arg(long)]
        unit: Uuid,
        #[arg(long)]
        amount_cents: i64,
        /// YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        due: Date,
        #[arg(long)]
        receipt_url: Option<String>,
    },
    Reservation {
        #[arg(long)]
        area: Uuid,
        /// RFC 3339 timestamp.
        #[arg(long, value_parser = parse_datetime)]
        start: OffsetDateTime,
        /// RFC 3339 timestamp.
        #[arg(long, value_parser = parse_datetime)]
        end: OffsetDateTime,
        #[arg(long)]
        notes: Option<String>,
    },
    Incident {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        unit: Option<Uuid>,
        #[arg(long)]
        image_url: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct SeedUnitArgs {
    #[arg(long)]
    pub name: String,
    /// Generated when omitted.
    #[arg(long)]
    pub id: Option<Uuid>,
    #[arg(long)]
    pub resident: Option<Uuid>,
    #[arg(long, default_value_t = 0)]
    pub monthly_fee_cents: i64,
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).map_err(|e| e.to_string())
}

fn parse_datetime(s: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(s, &Rfc3339).map_err(|e| e.to_string())
}

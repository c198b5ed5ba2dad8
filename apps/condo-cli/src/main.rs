//! `condo`: operate on payments, reservations and incidents as a given
//! principal. Migrations are applied on every start.

mod cli;
mod config;
mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use condo_resources::domain::navigation::visible_sections;
use condo_resources::domain::repo::{ResourceRepository, UnitDirectory};
use condo_resources::infra::storage::SeaOrmStore;
use condo_resources::{
    CondoResources, NewIncident, NewPayment, NewReservation, NewResource, TransitionRequest, Unit,
};
use condo_security::{PrincipalSource, SecurityContext, SessionPrincipal};
use serde::Serialize;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::cli::{Cli, Commands, CreateCommand, SeedUnitArgs};
use crate::config::{AppConfig, LoggingConfig};
use crate::view::{ResourceRow, StatusSummary};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(url) = &cli.database_url {
        config.database.url.clone_from(url);
    }
    init_tracing(&config.logging, cli.log_json);

    let principal = Arc::new(SessionPrincipal::new());
    if let (Some(subject), Some(role)) = (cli.subject, cli.role) {
        principal.sign_in(SecurityContext::principal(subject, role));
    }

    let module = CondoResources::connect(
        &config.database.url,
        principal.clone(),
        config.condo_resources.clone(),
    )
    .await
    .with_context(|| format!("opening database {}", config.database.url))?;

    run(cli.command, &module, principal.as_ref(), &config).await
}

fn init_tracing(logging: &LoggingConfig, force_json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if force_json || logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(
    command: Commands,
    module: &CondoResources<SeaOrmStore>,
    principal: &SessionPrincipal,
    config: &AppConfig,
) -> Result<()> {
    let client = module.client();
    match command {
        Commands::List { kind, summary } => {
            let rows = client.list(kind).await?;
            if summary {
                print_json(&StatusSummary::of(&rows))
            } else {
                let now = OffsetDateTime::now_utc();
                let thresholds = config.condo_resources.priority;
                let rows: Vec<_> = rows
                    .into_iter()
                    .map(|r| ResourceRow::new(r, now, thresholds))
                    .collect();
                print_json(&rows)
            }
        }
        Commands::Create { resource } => {
            let fields = new_resource(resource);
            let created = client.create(fields.kind(), fields).await?;
            print_json(&created)
        }
        Commands::Transition {
            kind,
            id,
            to,
            provider,
            notes,
        } => {
            let mut request = TransitionRequest::to(to);
            if let Some(provider) = provider {
                request = request.assign_provider(provider);
            }
            if let Some(notes) = notes {
                request = request.resolution_notes(notes);
            }
            let updated = client.transition(kind, id, request).await?;
            print_json(&updated)
        }
        Commands::Stats => print_json(&client.stats().await?),
        Commands::Sections => {
            let ctx = principal.current().unwrap_or_else(SecurityContext::anonymous);
            print_json(&visible_sections(&ctx))
        }
        Commands::SeedUnit(args) => print_json(&store_unit(module, principal, args).await?),
    }
}

fn new_resource(command: CreateCommand) -> NewResource {
    match command {
        CreateCommand::Payment {
            unit,
            amount_cents,
            due,
            receipt_url,
        } => NewResource::Payment(NewPayment {
            unit_id: unit,
            amount_cents,
            due_date: due,
            receipt_url,
        }),
        CreateCommand::Reservation {
            area,
            start,
            end,
            notes,
        } => NewResource::Reservation(NewReservation {
            area_id: area,
            start_time: start,
            end_time: end,
            notes,
        }),
        CreateCommand::Incident {
            title,
            description,
            unit,
            image_url,
        } => NewResource::Incident(NewIncident {
            unit_id: unit,
            title,
            description,
            image_url,
        }),
    }
}

/// Write a unit as the signed-in principal. Only admins get through.
async fn store_unit<R: ResourceRepository + UnitDirectory + 'static>(
    module: &CondoResources<R>,
    principal: &SessionPrincipal,
    args: SeedUnitArgs,
) -> Result<Unit> {
    let ctx = principal.current().unwrap_or_else(SecurityContext::anonymous);
    let unit = Unit {
        id: args.id.unwrap_or_else(Uuid::new_v4),
        name: args.name,
        resident_id: args.resident,
        monthly_fee_cents: args.monthly_fee_cents,
    };
    module
        .controller()
        .put_unit(&ctx, &unit)
        .await
        .with_context(|| format!("storing unit {}", unit.id))?;
    Ok(unit)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Tenant and landlord screens. Both are `users` on the backend, told apart
//! by `account_type`.

use clap::Subcommand;
use serde_json::json;

use super::{list_entities, submit_form, FieldArgs, ListArgs};
use crate::api::{endpoints, Gateway};
use crate::cli::utils::{output_empty_collection, output_error, output_record, output_success};
use crate::cli::OutputFormat;
use crate::models::EntityKind;
use crate::views::forms::TENANT_FORM;
use crate::views::profile;

#[derive(Subcommand)]
pub enum TenantCommands {
    #[command(about = "List tenants")]
    List(ListArgs),

    #[command(about = "Add a tenant (fields: name, email, number, location, password)")]
    Create(FieldArgs),

    #[command(about = "Show a tenant profile and their properties")]
    Show {
        #[arg(help = "Tenant ID")]
        id: String,
    },

    #[command(about = "Apply a moderation action such as Suspend or Delete")]
    Action {
        #[arg(help = "Tenant ID")]
        id: String,
        #[arg(help = "Action label")]
        label: String,
    },
}

#[derive(Subcommand)]
pub enum LandlordCommands {
    #[command(about = "List landlords")]
    List(ListArgs),

    #[command(about = "Show a landlord profile and their properties")]
    Show {
        #[arg(help = "Landlord ID")]
        id: String,
    },

    #[command(about = "Apply a moderation action such as Suspend or Approve")]
    Action {
        #[arg(help = "Landlord ID")]
        id: String,
        #[arg(help = "Action label")]
        label: String,
    },
}

pub async fn handle_tenant(cmd: TenantCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TenantCommands::List(args) => list_entities(gw, EntityKind::Tenant, args, &output_format).await,
        TenantCommands::Create(fields) => {
            submit_form(
                gw,
                &TENANT_FORM,
                EntityKind::Tenant,
                None,
                fields,
                |payload| endpoints::add_user(gw, payload),
                &output_format,
            )
            .await
        }
        TenantCommands::Show { id } => show_owner(gw, &id, &output_format).await,
        TenantCommands::Action { id, label } => apply(gw, &id, &label, &output_format).await,
    }
}

pub async fn handle_landlord(cmd: LandlordCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        LandlordCommands::List(args) => list_entities(gw, EntityKind::Landlord, args, &output_format).await,
        LandlordCommands::Show { id } => show_owner(gw, &id, &output_format).await,
        LandlordCommands::Action { id, label } => apply(gw, &id, &label, &output_format).await,
    }
}

async fn show_owner(gw: &Gateway, id: &str, output_format: &OutputFormat) -> anyhow::Result<()> {
    let owner = profile::load_owner(gw, id).await;

    if let OutputFormat::Json = output_format {
        println!("{}", serde_json::to_string_pretty(&owner)?);
        return Ok(());
    }

    match &owner.profile {
        Ok(record) => output_record(output_format, "Profile", record)?,
        Err(message) => output_error(output_format, message, None)?,
    }
    match &owner.properties {
        Ok(list) => {
            println!("\nProperties ({})", list.len());
            for property in list {
                let title = property.get("title").and_then(|v| v.as_str()).unwrap_or("N/A");
                let location = property.get("location").and_then(|v| v.as_str()).unwrap_or("N/A");
                println!("  - {} ({})", title, location);
            }
        }
        Err(message) => output_empty_collection(output_format, "properties", message)?,
    }
    Ok(())
}

async fn apply(gw: &Gateway, id: &str, label: &str, output_format: &OutputFormat) -> anyhow::Result<()> {
    match profile::apply_action(gw, id, label).await {
        Ok(message) => output_success(output_format, &message, Some(json!({ "id": id, "action": label }))),
        Err(message) => Err(anyhow::anyhow!(message)),
    }
}

use clap::Subcommand;
use serde_json::json;

use super::{list_entities, record_from, FieldArgs, ListArgs};
use crate::api::{endpoints, Gateway};
use crate::cli::utils::{output_record, output_success};
use crate::cli::OutputFormat;
use crate::models::EntityKind;

#[derive(Subcommand)]
pub enum ProviderCommands {
    #[command(about = "List service providers")]
    List(ListArgs),

    #[command(about = "Show one service provider")]
    Show {
        #[arg(help = "Provider ID")]
        id: String,
    },

    #[command(about = "Add a service provider from key=value fields")]
    Create(FieldArgs),

    #[command(about = "Update a service provider from key=value fields")]
    Update {
        #[arg(help = "Provider ID")]
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
}

pub async fn handle(cmd: ProviderCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ProviderCommands::List(args) => list_entities(gw, EntityKind::ServiceProvider, args, &output_format).await,
        ProviderCommands::Show { id } => {
            let body = endpoints::get_service_provider(gw, &id).await?;
            output_record(&output_format, "Service provider", &record_from(&body, "provider"))
        }
        ProviderCommands::Create(fields) => {
            if fields.fields.is_empty() {
                anyhow::bail!("Provide at least one --field key=value");
            }
            let response = endpoints::add_service_provider(gw, fields.to_object()).await?;
            output_success(&output_format, "Service provider added", Some(json!({ "result": response })))
        }
        ProviderCommands::Update { id, fields } => {
            if fields.fields.is_empty() {
                anyhow::bail!("Provide at least one --field key=value");
            }
            let response = endpoints::update_service_provider(gw, &id, fields.to_object()).await?;
            output_success(&output_format, "Service provider updated", Some(json!({ "result": response })))
        }
    }
}

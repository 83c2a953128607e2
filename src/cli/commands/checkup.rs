use clap::Subcommand;
use serde_json::json;

use super::{list_entities, record_from, FieldArgs, ListArgs};
use crate::api::{endpoints, Gateway};
use crate::cli::utils::{output_record, output_success};
use crate::cli::OutputFormat;
use crate::models::EntityKind;

#[derive(Subcommand)]
pub enum CheckupCommands {
    #[command(about = "List property checkups")]
    List(ListArgs),

    #[command(about = "Show one checkup, or every checkup of a property with --property")]
    Show {
        #[arg(help = "Checkup ID (or property ID with --property)")]
        id: String,
        #[arg(long, help = "Treat the ID as a property ID")]
        property: bool,
    },

    #[command(about = "Schedule a checkup from key=value fields")]
    Create(FieldArgs),

    #[command(about = "Attach checkup pictures from key=value fields (checkupId, images...)")]
    Submit(FieldArgs),

    #[command(about = "Approve a checkup")]
    Approve {
        #[arg(help = "Checkup ID")]
        id: String,
    },

    #[command(about = "Reject a checkup")]
    Reject {
        #[arg(help = "Checkup ID")]
        id: String,
        #[arg(long, help = "Reason shown to the landlord")]
        reason: Option<String>,
    },
}

pub async fn handle(cmd: CheckupCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        CheckupCommands::List(args) => list_entities(gw, EntityKind::PropertyCheckup, args, &output_format).await,
        CheckupCommands::Show { id, property } => {
            let body = if property {
                endpoints::get_checkups_by_property(gw, &id).await?
            } else {
                endpoints::get_property_checkup(gw, &id).await?
            };
            output_record(&output_format, "Property checkup", &record_from(&body, "checkup"))
        }
        CheckupCommands::Create(fields) => {
            let response = endpoints::create_property_checkup(gw, fields.to_object()).await?;
            output_success(&output_format, "Checkup scheduled", Some(json!({ "result": response })))
        }
        CheckupCommands::Submit(fields) => {
            let response = endpoints::submit_checkup_pictures(gw, fields.to_object()).await?;
            output_success(&output_format, "Checkup pictures submitted", Some(json!({ "result": response })))
        }
        CheckupCommands::Approve { id } => {
            endpoints::approve_property_checkup(gw, &id).await?;
            output_success(&output_format, "Checkup approved", Some(json!({ "id": id })))
        }
        CheckupCommands::Reject { id, reason } => {
            let data = json!({ "reason": reason.unwrap_or_default() });
            endpoints::reject_property_checkup(gw, &id, data).await?;
            output_success(&output_format, "Checkup rejected", Some(json!({ "id": id })))
        }
    }
}

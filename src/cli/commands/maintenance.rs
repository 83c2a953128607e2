use clap::Subcommand;

use super::{list_entities, record_from, submit_form, FieldArgs, ListArgs};
use crate::api::{endpoints, Gateway};
use crate::cli::utils::output_record;
use crate::cli::OutputFormat;
use crate::models::EntityKind;
use crate::views::forms::MAINTENANCE_FORM;

#[derive(Subcommand)]
pub enum MaintenanceCommands {
    #[command(about = "List maintenance requests")]
    List(ListArgs),

    #[command(about = "Show one maintenance request")]
    Show {
        #[arg(help = "Request ID")]
        id: String,
    },

    #[command(about = "Create a request (fields: property, description, user_id, due_date, urgency, cost)")]
    Create(FieldArgs),
}

pub async fn handle(cmd: MaintenanceCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MaintenanceCommands::List(args) => {
            list_entities(gw, EntityKind::MaintenanceRequest, args, &output_format).await
        }
        MaintenanceCommands::Show { id } => {
            let body = endpoints::get_service_request(gw, &id).await?;
            output_record(&output_format, "Maintenance request", &record_from(&body, "request"))
        }
        MaintenanceCommands::Create(fields) => {
            submit_form(
                gw,
                &MAINTENANCE_FORM,
                EntityKind::MaintenanceRequest,
                None,
                fields,
                |payload| endpoints::create_service_request(gw, payload),
                &output_format,
            )
            .await
        }
    }
}

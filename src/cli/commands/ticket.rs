use clap::Subcommand;
use serde_json::json;

use super::{list_entities, record_from, ListArgs};
use crate::api::{endpoints, Gateway};
use crate::cli::utils::{output_record, output_success};
use crate::cli::OutputFormat;
use crate::models::EntityKind;

#[derive(Subcommand)]
pub enum TicketCommands {
    #[command(about = "List support tickets")]
    List(ListArgs),

    #[command(about = "Show one ticket")]
    Show {
        #[arg(help = "Ticket ID")]
        id: String,
    },

    #[command(about = "Set a ticket's status")]
    Update {
        #[arg(help = "Ticket ID")]
        id: String,
        #[arg(long, help = "New status, e.g. open, in-progress, resolved")]
        status: String,
        #[arg(long, help = "Reply shown to the user")]
        reply: Option<String>,
    },
}

pub async fn handle(cmd: TicketCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TicketCommands::List(args) => list_entities(gw, EntityKind::Ticket, args, &output_format).await,
        TicketCommands::Show { id } => {
            let body = endpoints::get_ticket(gw, &id).await?;
            output_record(&output_format, "Ticket", &record_from(&body, "ticket"))
        }
        TicketCommands::Update { id, status, reply } => {
            let mut data = json!({ "status": status.trim() });
            if let Some(reply) = reply.filter(|r| !r.trim().is_empty()) {
                data["reply"] = json!(reply.trim());
            }
            endpoints::update_ticket(gw, &id, data).await?;
            output_success(&output_format, "Ticket updated", Some(json!({ "id": id, "status": status.trim() })))
        }
    }
}

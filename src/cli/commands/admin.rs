use clap::Subcommand;
use serde_json::json;

use super::{list_entities, submit_form, FieldArgs, ListArgs};
use crate::api::{endpoints, Gateway};
use crate::cli::utils::{output_list, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::models::EntityKind;
use crate::views::forms::ADMIN_FORM;
use crate::views::ListView;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "List admin users")]
    List(ListArgs),

    #[command(about = "Add an admin user (fields: name, email, password)")]
    Create(FieldArgs),

    #[command(about = "Delete an admin user")]
    Delete {
        #[arg(help = "Admin ID")]
        id: String,
        #[arg(long, default_value_t = 1, help = "Page to show afterwards")]
        page: u32,
    },
}

pub async fn handle(cmd: AdminCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::List(args) => list_entities(gw, EntityKind::Admin, args, &output_format).await,
        AdminCommands::Create(fields) => {
            submit_form(
                gw,
                &ADMIN_FORM,
                EntityKind::Admin,
                None,
                fields,
                |payload| endpoints::add_admin_user(gw, payload),
                &output_format,
            )
            .await
        }
        AdminCommands::Delete { id, page } => {
            if let Err(e) = endpoints::delete_admin_user(gw, &id).await {
                tracing::error!("Failed to delete admin {}: {}", id, e);
                return Err(anyhow::anyhow!("Failed to delete admin user: {}", e.message()));
            }

            output_success(&output_format, "Admin user deleted", Some(json!({ "id": id })))?;

            let mut view = ListView::new(gw, EntityKind::Admin, config().views.page_size);
            view.load(page).await;
            if let OutputFormat::Text = output_format {
                output_list(&output_format, &view)?;
            }
            Ok(())
        }
    }
}

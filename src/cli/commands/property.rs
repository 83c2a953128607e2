use clap::Subcommand;

use super::{list_entities, record_from, submit_form, FieldArgs, ListArgs};
use crate::api::{endpoints, Gateway};
use crate::cli::utils::output_record;
use crate::cli::OutputFormat;
use crate::models::{Entity, EntityKind};
use crate::views::forms::{PROPERTY_EDIT_FORM, PROPERTY_FORM};

#[derive(Subcommand)]
pub enum PropertyCommands {
    #[command(about = "List properties")]
    List(ListArgs),

    #[command(about = "Show one property")]
    Show {
        #[arg(help = "Property ID")]
        id: String,
    },

    #[command(about = "Add a property (fields: title, location, rent_amount, bhk_type, about, landlord)")]
    Create(FieldArgs),

    #[command(about = "Edit a property; unspecified fields keep their current values")]
    Edit {
        #[arg(help = "Property ID")]
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
}

pub async fn handle(cmd: PropertyCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PropertyCommands::List(args) => list_entities(gw, EntityKind::Property, args, &output_format).await,
        PropertyCommands::Show { id } => {
            let body = endpoints::get_property(gw, &id).await?;
            output_record(&output_format, "Property", &record_from(&body, "property"))
        }
        PropertyCommands::Create(fields) => {
            submit_form(
                gw,
                &PROPERTY_FORM,
                EntityKind::Property,
                None,
                fields,
                |payload| endpoints::add_property(gw, payload),
                &output_format,
            )
            .await
        }
        PropertyCommands::Edit { id, fields } => {
            let body = endpoints::get_property(gw, &id).await?;
            let current = Entity::from_value(EntityKind::Property, record_from(&body, "property"));
            submit_form(
                gw,
                &PROPERTY_EDIT_FORM,
                EntityKind::Property,
                Some(&current),
                fields,
                |payload| endpoints::update_property(gw, &id, payload),
                &output_format,
            )
            .await
        }
    }
}

use clap::Subcommand;
use serde_json::{json, Value};

use super::{list_entities, FieldArgs, ListArgs};
use crate::api::{endpoints, Gateway};
use crate::cli::utils::{output_empty_collection, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::models::EntityKind;
use crate::views::render;

#[derive(Subcommand)]
pub enum WalletCommands {
    #[command(about = "List wallets")]
    List(ListArgs),

    #[command(about = "Show a user's transaction log")]
    Transactions {
        #[arg(help = "User ID")]
        user_id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    #[command(about = "Record a transaction (fields: user_id, amount, type, description)")]
    Credit(FieldArgs),
}

pub async fn handle(cmd: WalletCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        WalletCommands::List(args) => list_entities(gw, EntityKind::Wallet, args, &output_format).await,
        WalletCommands::Transactions { user_id, page } => {
            let body = endpoints::get_transaction_logs(gw, &user_id, page, config().views.page_size).await?;
            let logs = body
                .get("transactions")
                .or_else(|| body.get("logs"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            if logs.is_empty() {
                return output_empty_collection(&output_format, "transactions", "No transactions found");
            }

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "transactions": logs }))?),
                OutputFormat::Text => {
                    let cell = |row: &Value, key: &str| match row.get(key) {
                        Some(Value::String(s)) => s.clone(),
                        Some(Value::Null) | None => "N/A".to_string(),
                        Some(other) => other.to_string(),
                    };
                    let rows: Vec<Vec<String>> = logs
                        .iter()
                        .map(|row| vec![cell(row, "type"), cell(row, "amount"), cell(row, "description"), cell(row, "createdAt")])
                        .collect();
                    print!("{}", render::table(&["Type", "Amount", "Description", "Date"], &rows));
                }
            }
            Ok(())
        }
        WalletCommands::Credit(fields) => {
            let mut data = fields.to_object();
            if let Some(amount) = data.get("amount").and_then(Value::as_str).map(str::to_string) {
                let parsed: f64 = amount
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Amount must be a number."))?;
                data["amount"] = json!(parsed);
            }
            let response = endpoints::create_transaction(gw, data).await?;
            output_success(&output_format, "Transaction recorded", Some(json!({ "result": response })))
        }
    }
}

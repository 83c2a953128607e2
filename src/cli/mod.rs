pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::Gateway;

#[derive(Parser)]
#[command(name = "livease")]
#[command(about = "LivEase admin CLI - manage tenants, landlords, properties and support")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Backend base URL (overrides LIVEASE_API_URL)")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Admin sign-in and session")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Tenant accounts")]
    Tenant {
        #[command(subcommand)]
        cmd: commands::user::TenantCommands,
    },

    #[command(about = "Landlord accounts")]
    Landlord {
        #[command(subcommand)]
        cmd: commands::user::LandlordCommands,
    },

    #[command(about = "Property listings")]
    Property {
        #[command(subcommand)]
        cmd: commands::property::PropertyCommands,
    },

    #[command(about = "Admin users")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },

    #[command(about = "Maintenance requests")]
    Maintenance {
        #[command(subcommand)]
        cmd: commands::maintenance::MaintenanceCommands,
    },

    #[command(about = "Support tickets")]
    Ticket {
        #[command(subcommand)]
        cmd: commands::ticket::TicketCommands,
    },

    #[command(about = "Wallets and transactions")]
    Wallet {
        #[command(subcommand)]
        cmd: commands::wallet::WalletCommands,
    },

    #[command(about = "Service providers")]
    Provider {
        #[command(subcommand)]
        cmd: commands::provider::ProviderCommands,
    },

    #[command(about = "Property checkups")]
    Checkup {
        #[command(subcommand)]
        cmd: commands::checkup::CheckupCommands,
    },

    #[command(about = "Platform statistics and recent activity")]
    Dashboard(commands::dashboard::DashboardArgs),

    #[command(about = "Import listings scraped from Facebook")]
    Scrape {
        #[command(subcommand)]
        cmd: commands::scrape::ScrapeCommands,
    },

    #[command(about = "File uploads")]
    Asset {
        #[command(subcommand)]
        cmd: commands::asset::AssetCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let settings = crate::config::config();
    let session = config::load_session()?;
    let gw = match cli.api_url.as_deref() {
        Some(url) => Gateway::new(url, session, settings.request_timeout())?
            .with_request_logging(settings.api.enable_request_logging),
        None => Gateway::from_config(settings, session)?,
    };

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &gw, output_format).await,
        Commands::Tenant { cmd } => commands::user::handle_tenant(cmd, &gw, output_format).await,
        Commands::Landlord { cmd } => commands::user::handle_landlord(cmd, &gw, output_format).await,
        Commands::Property { cmd } => commands::property::handle(cmd, &gw, output_format).await,
        Commands::Admin { cmd } => commands::admin::handle(cmd, &gw, output_format).await,
        Commands::Maintenance { cmd } => commands::maintenance::handle(cmd, &gw, output_format).await,
        Commands::Ticket { cmd } => commands::ticket::handle(cmd, &gw, output_format).await,
        Commands::Wallet { cmd } => commands::wallet::handle(cmd, &gw, output_format).await,
        Commands::Provider { cmd } => commands::provider::handle(cmd, &gw, output_format).await,
        Commands::Checkup { cmd } => commands::checkup::handle(cmd, &gw, output_format).await,
        Commands::Dashboard(args) => commands::dashboard::handle(args, &gw, output_format).await,
        Commands::Scrape { cmd } => commands::scrape::handle(cmd, &gw, output_format).await,
        Commands::Asset { cmd } => commands::asset::handle(cmd, &gw, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::try_parse_from(["livease", "--json", "tenant", "list", "--page", "2", "--search", "asha"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::Tenant { cmd: commands::user::TenantCommands::List(args) } => {
                assert_eq!(args.page, 2);
                assert_eq!(args.search.as_deref(), Some("asha"));
            }
            _ => panic!("expected tenant list"),
        }
    }

    #[test]
    fn form_fields_parse() {
        let cli = Cli::try_parse_from(["livease", "property", "edit", "p1", "-f", "title=Loft", "--field", "rent_amount=18000"]).unwrap();
        match cli.command {
            Commands::Property { cmd: commands::property::PropertyCommands::Edit { id, fields } } => {
                assert_eq!(id, "p1");
                assert_eq!(fields.fields[1], ("rent_amount".to_string(), "18000".to_string()));
            }
            _ => panic!("expected property edit"),
        }
    }
}

use clap::Args;

use crate::api::Gateway;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::views::dashboard::{self, Card};
use crate::views::render;

#[derive(Args)]
pub struct DashboardArgs {
    #[arg(long, help = "Recent activity rows (defaults to config)")]
    pub activity: Option<u32>,
    #[arg(long, help = "Recent support tickets (defaults to config)")]
    pub tickets: Option<u32>,
}

pub async fn handle(args: DashboardArgs, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    let views = &config().views;
    let overview = dashboard::load(
        gw,
        args.activity.unwrap_or(views.recent_activity_limit),
        args.tickets.unwrap_or(views.support_ticket_limit),
    )
    .await?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&overview)?),
        OutputFormat::Text => {
            print_cards("Overview", &overview.stats);
            print_cards("Matching", &overview.metrics);

            println!("Recent activity");
            if overview.activities.is_empty() {
                println!("  No recent activity");
            } else {
                let rows: Vec<Vec<String>> = overview
                    .activities
                    .iter()
                    .map(|a| vec![a.name.clone(), a.action.clone(), a.time.clone()])
                    .collect();
                print!("{}", render::table(&["Name", "Action", "Time"], &rows));
            }

            println!("\nSupport tickets: {}", overview.support_tickets.len());
        }
    }
    Ok(())
}

fn print_cards(heading: &str, cards: &[Card]) {
    println!("{}", heading);
    for card in cards {
        println!("  {:<20} {:>14}  {}", card.title, card.value, card.caption);
    }
    println!();
}

use clap::Subcommand;
use serde_json::{json, Value};

use crate::api::Gateway;
use crate::cli::config::{load_scrape_results, save_scrape_results};
use crate::cli::utils::{output_empty_collection, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::views::render;
use crate::views::scrape::{self, ScrapeResults, ScrapedRow};

#[derive(Subcommand)]
pub enum ScrapeCommands {
    #[command(about = "Scrape listings from a Facebook group or post URL")]
    Run {
        #[arg(help = "Listing URL")]
        link: String,
        #[arg(long, help = "Maximum results (defaults to LIVEASE_SCRAPE_LIMIT)")]
        limit: Option<u32>,
    },

    #[command(about = "Save rows from the last run as properties")]
    Upload {
        #[arg(help = "Row numbers as shown by 'scrape run' (1-based)")]
        rows: Vec<usize>,
        #[arg(long, help = "Upload every row")]
        all: bool,
    },
}

pub async fn handle(cmd: ScrapeCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ScrapeCommands::Run { link, limit } => {
            let limit = limit.unwrap_or(config().scraping.results_limit);
            let rows = scrape::scrape(gw, &link, limit).await?;

            let raw: Vec<Value> = rows.iter().map(|r| Value::Object(r.raw.clone())).collect();
            save_scrape_results(&raw)?;

            if rows.is_empty() {
                return output_empty_collection(&output_format, "results", "No results found.");
            }

            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "results": rows }))?),
                OutputFormat::Text => {
                    let table: Vec<Vec<String>> = rows
                        .iter()
                        .enumerate()
                        .map(|(i, r)| vec![(i + 1).to_string(), r.property.clone(), r.listed_by.clone(), r.link.clone()])
                        .collect();
                    print!("{}", render::table(&["#", "Property", "Listed by", "Link"], &table));
                    println!("\nUse 'livease scrape upload <#>...' or '--all' to save rows.");
                }
            }
            Ok(())
        }
        ScrapeCommands::Upload { rows, all } => {
            let saved = load_scrape_results()?;
            let mut results = ScrapeResults::new(saved.iter().map(ScrapedRow::from_value).collect());

            if all {
                results.select_all(true);
            } else {
                select_numbered(&mut results, &rows);
            }

            let report = results.upload_selected(gw).await?;
            output_success(
                &output_format,
                &report.summary(),
                Some(json!({ "succeeded": report.succeeded, "failed": report.failed })),
            )
        }
    }
}

/// Select rows by their 1-based table number; 0 and unknown numbers are skipped
fn select_numbered(results: &mut ScrapeResults, numbers: &[usize]) {
    for number in numbers {
        if let Some(index) = number.checked_sub(1) {
            results.select(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::scrape::rows_from_response;

    #[test]
    fn repeated_row_numbers_stay_selected() {
        let rows = rows_from_response(&json!([{}, {}, {}])).unwrap();
        let mut results = ScrapeResults::new(rows);
        select_numbered(&mut results, &[1, 1, 0, 3, 9]);
        assert_eq!(results.selected().collect::<Vec<_>>(), vec![0, 2]);
    }
}

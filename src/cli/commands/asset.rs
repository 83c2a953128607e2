use clap::Subcommand;
use reqwest::multipart;
use serde_json::json;
use std::path::PathBuf;

use crate::api::{endpoints, Gateway};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AssetCommands {
    #[command(about = "Upload a file (sent as multipart field 'file')")]
    Upload {
        #[arg(help = "Path to the file")]
        path: PathBuf,
    },
}

pub async fn handle(cmd: AssetCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AssetCommands::Upload { path } => {
            let bytes = tokio::fs::read(&path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());

            let part = multipart::Part::bytes(bytes).file_name(file_name.clone());
            let form = multipart::Form::new().part("file", part);

            let response = endpoints::upload_asset(gw, form).await?;
            let url = response
                .get("url")
                .or_else(|| response.get("data").and_then(|d| d.get("url")))
                .cloned()
                .unwrap_or(serde_json::Value::Null);

            output_success(
                &output_format,
                &format!("Uploaded {}", file_name),
                Some(json!({ "url": url, "result": response })),
            )
        }
    }
}

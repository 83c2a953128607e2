use clap::Subcommand;
use serde_json::json;

use crate::api::{endpoints, Gateway};
use crate::auth::{token_from_sign_in, Session};
use crate::cli::config::{clear_session, load_session, save_session};
use crate::cli::utils::{output_record, output_success, prompt};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Sign in as an admin")]
    Login {
        #[arg(help = "Admin e-mail")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Forget the saved token and e-mail")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,

    #[command(about = "Show the signed-in admin as decoded from the token")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, gw: &Gateway, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password")?,
            };

            let response = endpoints::sign_in(gw, email.trim(), &password).await?;
            let token = token_from_sign_in(&response)
                .ok_or_else(|| anyhow::anyhow!("Sign-in response did not include a token"))?;

            let session = Session::new(token, Some(email.trim().to_string()));
            save_session(&session)?;
            tracing::info!("Signed in as {}", email.trim());

            output_success(
                &output_format,
                &format!("Signed in as {}", email.trim()),
                Some(json!({ "email": email.trim() })),
            )
        }
        AuthCommands::Logout => {
            clear_session()?;
            output_success(&output_format, "Signed out", None)
        }
        AuthCommands::Status => {
            let session = load_session()?;
            let details = json!({
                "authenticated": session.is_authenticated(),
                "email": session.admin_email(),
                "signed_in_at": session.signed_in_at(),
                "api_url": gw.base_url(),
            });
            output_record(&output_format, "Authentication status", &details)
        }
        AuthCommands::Whoami => {
            let session = load_session()?;
            match session.identity() {
                Some(identity) => output_record(&output_format, "Current admin", &serde_json::to_value(identity)?),
                None => Err(anyhow::anyhow!("Not signed in. Use 'livease auth login <email>' first")),
            }
        }
    }
}

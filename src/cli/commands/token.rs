use chrono::{TimeZone, Utc};
use clap::Subcommand;
use serde_json::json;

use crate::auth::{Role, Subject, TokenIssuer, TokenVerifier};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Issue a signed token for a role")]
    Issue {
        #[arg(long, help = "SuperAdmin, AdminRestaurant or User")]
        role: Role,
        #[arg(long, help = "Optional username claim")]
        username: Option<String>,
    },

    #[command(about = "Verify a token and print its claims")]
    Verify {
        #[arg(help = "Token to check")]
        token: String,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let secret = &config.security.jwt_secret;

    match cmd {
        TokenCommands::Issue { role, username } => {
            let issuer = TokenIssuer::new(secret, config.security.jwt_expiry_hours)?;
            let issued = issuer.issue_for(
                role,
                Subject {
                    username: username.as_deref(),
                    user_id: None,
                },
            )?;

            match output_format {
                OutputFormat::Json => output_success(
                    output_format,
                    "Token issued",
                    Some(json!({
                        "token": issued.token,
                        "role": issued.role,
                        "expires_at": issued.expires_at,
                    })),
                ),
                OutputFormat::Text => {
                    println!("{}", issued.token);
                    Ok(())
                }
            }
        }
        TokenCommands::Verify { token } => {
            let verifier = TokenVerifier::new(secret)?;
            match verifier.verify(&token) {
                Ok(claims) => {
                    let expires = Utc
                        .timestamp_opt(claims.exp, 0)
                        .single()
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| claims.exp.to_string());
                    output_success(
                        output_format,
                        &format!("Valid token for role '{}', expires {}", claims.role, expires),
                        Some(json!({ "claims": claims })),
                    )
                }
                Err(err) => {
                    output_error(output_format, &err.to_string(), Some(err.reason()))?;
                    anyhow::bail!("token rejected: {}", err.reason())
                }
            }
        }
    }
}

use clap::Subcommand;
use serde_json::json;

use crate::auth::hash_password;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum PasswordCommands {
    #[command(about = "Print an argon2 hash for a password")]
    Hash {
        #[arg(help = "Plain-text password")]
        password: String,
    },
}

pub async fn handle(cmd: PasswordCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PasswordCommands::Hash { password } => {
            let hash = hash_password(&password)?;
            match output_format {
                OutputFormat::Json => output_success(output_format, "Password hashed", Some(json!({ "hash": hash }))),
                OutputFormat::Text => {
                    println!("{}", hash);
                    Ok(())
                }
            }
        }
    }
}

use clap::Subcommand;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::{AppConfig, SuperAdminSeed};
use crate::database::DatabaseManager;
use crate::services::ensure_super_admin;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Create a SuperAdmin account if the email is free")]
    Seed {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

pub async fn handle(cmd: AdminCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Seed { email, password } => {
            if password.len() < crate::services::validation::MIN_PASSWORD_LEN {
                anyhow::bail!(
                    "password must be at least {} characters",
                    crate::services::validation::MIN_PASSWORD_LEN
                );
            }

            let config = AppConfig::from_env();
            let pool = DatabaseManager::connect(&config.database).await?;
            let seed = SuperAdminSeed {
                email: email.trim().to_lowercase(),
                password,
            };

            let message = if ensure_super_admin(&pool, &seed).await? {
                format!("Created SuperAdmin {}", seed.email)
            } else {
                format!("A user with email {} already exists", seed.email)
            };
            pool.close().await;
            output_success(output_format, &message, None)
        }
    }
}

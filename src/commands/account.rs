//! Linked account CLI commands.

use clap::{Args, Subcommand};

use cloudvault_core::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Link an account and switch to its vault
    Link {
        /// Email address to link
        email: String,
    },
    /// Unlink the account and return to the anonymous vault
    Unlink,
    /// Show the linked account and active vault
    Show,
}

/// Execute account commands
pub async fn execute(
    args: &AccountArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut session = super::open_session(config_path).await?;

    match &args.command {
        AccountCommand::Link { email } => {
            let identity = session.link_identity(email).await?;
            output::print_success(&format!(
                "Linked as {} <{}>",
                identity.display_name, identity.email
            ));
        }
        AccountCommand::Unlink => {
            if session.unlink_identity().await? {
                output::print_success("Account unlinked, back to the anonymous vault");
            } else {
                println!("No account linked.");
            }
        }
        AccountCommand::Show => match format {
            OutputFormat::Json => output::print_json(&session.identity()),
            OutputFormat::Table => {
                match session.identity() {
                    Some(identity) => {
                        println!("Linked account");
                        output::print_kv("Email", &identity.email);
                        output::print_kv("Name", &identity.display_name);
                        output::print_kv(
                            "Linked at",
                            &identity.linked_at.format("%Y-%m-%d %H:%M").to_string(),
                        );
                    }
                    None => println!("Anonymous (no account linked)"),
                }
                output::print_kv("Folders", &session.store().folders.len().to_string());
                output::print_kv("Files", &session.store().files.len().to_string());
            }
        },
    }
    Ok(())
}

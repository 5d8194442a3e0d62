//! Folder creation CLI command.

use clap::Args;

use cloudvault_core::AppError;

use crate::output;

/// Arguments for the mkdir command
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Folder name
    pub name: String,

    /// Parent folder ID (omit for the root level)
    #[arg(short, long)]
    pub parent: Option<String>,
}

/// Execute the mkdir command
pub async fn mkdir(args: &MkdirArgs, config_path: &str) -> Result<(), AppError> {
    let mut session = super::open_session(config_path).await?;
    let parent_id = super::parse_folder_id(args.parent.as_deref())?;

    let folder = session.create_folder(&args.name, parent_id)?;
    session.flush().await;

    output::print_success(&format!("Folder '{}' created (id: {})", folder.name, folder.id));
    Ok(())
}

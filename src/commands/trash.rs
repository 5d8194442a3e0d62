//! Trash lifecycle CLI commands.

use clap::Args;

use cloudvault_core::AppError;

use super::KindArg;
use crate::output;

/// Arguments for the trash command
#[derive(Debug, Args)]
pub struct TrashArgs {
    /// Item kind
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Item ID
    pub id: String,
}

/// Arguments for the restore command
#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// Item kind
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Item ID
    pub id: String,
}

/// Arguments for the purge command
#[derive(Debug, Args)]
pub struct PurgeArgs {
    /// Item kind
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Item ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the empty-trash command
#[derive(Debug, Args)]
pub struct EmptyTrashArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

/// Execute the trash command
pub async fn trash(args: &TrashArgs, config_path: &str) -> Result<(), AppError> {
    let mut session = super::open_session(config_path).await?;
    let item = super::parse_item(args.kind, &args.id)?;

    if session.trash_item(item) {
        session.flush().await;
        output::print_success("Item moved to trash");
    } else {
        output::print_warning("Item not found or already in trash.");
    }
    Ok(())
}

/// Execute the restore command
pub async fn restore(args: &RestoreArgs, config_path: &str) -> Result<(), AppError> {
    let mut session = super::open_session(config_path).await?;
    let item = super::parse_item(args.kind, &args.id)?;

    if session.restore_item(item) {
        session.flush().await;
        output::print_success("Item restored from trash");
    } else {
        output::print_warning("Item not found or not in trash.");
    }
    Ok(())
}

/// Execute the purge command
pub async fn purge(args: &PurgeArgs, config_path: &str) -> Result<(), AppError> {
    if !args.force && !confirm("Permanently delete this item? This cannot be undone.")? {
        println!("Cancelled.");
        return Ok(());
    }

    let mut session = super::open_session(config_path).await?;
    let item = super::parse_item(args.kind, &args.id)?;

    if session.purge_item(item) {
        session.flush().await;
        output::print_success("Item permanently deleted");
    } else {
        output::print_warning("Item not found.");
    }
    Ok(())
}

/// Execute the empty-trash command
pub async fn empty_trash(args: &EmptyTrashArgs, config_path: &str) -> Result<(), AppError> {
    if !args.force && !confirm("Permanently delete everything in the trash? This cannot be undone.")?
    {
        println!("Cancelled.");
        return Ok(());
    }

    let mut session = super::open_session(config_path).await?;
    let removed = session.empty_trash();

    if removed > 0 {
        session.flush().await;
        output::print_success(&format!("{removed} item(s) permanently deleted"));
    } else {
        println!("Trash is already empty.");
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

//! Item-addressed CLI commands: rename, move, star, share.

use clap::Args;

use cloudvault_core::AppError;
use cloudvault_entity::item::ItemRef;
use cloudvault_session::DriveSession;

use super::KindArg;
use crate::output;

/// Arguments for the rename command
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Item kind
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Item ID
    pub id: String,

    /// New name
    pub new_name: String,
}

/// Arguments for the mv command
#[derive(Debug, Args)]
pub struct MvArgs {
    /// Item kind
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Item ID
    pub id: String,

    /// Target folder ID (omit for the root level)
    #[arg(short, long)]
    pub target: Option<String>,
}

/// Arguments for the star command
#[derive(Debug, Args)]
pub struct StarArgs {
    /// Item kind
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Item ID
    pub id: String,
}

/// Arguments for the share command
#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Item kind
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Item ID
    pub id: String,
}

/// Execute the rename command
pub async fn rename(args: &RenameArgs, config_path: &str) -> Result<(), AppError> {
    let mut session = super::open_session(config_path).await?;
    let item = super::parse_item(args.kind, &args.id)?;

    if session.rename_item(item, &args.new_name) {
        session.flush().await;
        output::print_success(&format!("Renamed to '{}'", args.new_name.trim()));
    } else {
        output::print_warning("Nothing renamed.");
    }
    Ok(())
}

/// Execute the mv command
pub async fn mv(args: &MvArgs, config_path: &str) -> Result<(), AppError> {
    let mut session = super::open_session(config_path).await?;
    let item = super::parse_item(args.kind, &args.id)?;
    let target = super::parse_folder_id(args.target.as_deref())?;

    if session.move_item(item, target) {
        session.flush().await;
        match target {
            Some(target) => output::print_success(&format!("Moved into folder {target}")),
            None => output::print_success("Moved to the root level"),
        }
    } else {
        output::print_warning("Nothing moved.");
    }
    Ok(())
}

/// Execute the star command
pub async fn star(args: &StarArgs, config_path: &str) -> Result<(), AppError> {
    let mut session = super::open_session(config_path).await?;
    let item = super::parse_item(args.kind, &args.id)?;

    if session.toggle_starred(item) {
        session.flush().await;
        if is_starred(&session, item) {
            output::print_success("Item starred");
        } else {
            output::print_success("Star removed");
        }
    } else {
        output::print_warning("Item not found.");
    }
    Ok(())
}

/// Execute the share command
pub async fn share(args: &ShareArgs, config_path: &str) -> Result<(), AppError> {
    let mut session = super::open_session(config_path).await?;
    let item = super::parse_item(args.kind, &args.id)?;

    if session.toggle_shared(item) {
        session.flush().await;
        if is_shared(&session, item) {
            output::print_success("Item shared");
        } else {
            output::print_success("Sharing stopped");
        }
    } else {
        output::print_warning("Item not found.");
    }
    Ok(())
}

fn is_starred(session: &DriveSession, item: ItemRef) -> bool {
    match item {
        ItemRef::File(id) => session.store().file(id).is_some_and(|f| f.is_starred),
        ItemRef::Folder(id) => session.store().folder(id).is_some_and(|f| f.is_starred),
    }
}

fn is_shared(session: &DriveSession, item: ItemRef) -> bool {
    match item {
        ItemRef::File(id) => session.store().file(id).is_some_and(|f| f.is_shared),
        ItemRef::Folder(id) => session.store().folder(id).is_some_and(|f| f.is_shared),
    }
}

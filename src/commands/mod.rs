//! CLI command definitions and dispatch.

pub mod account;
pub mod browse;
pub mod folder;
pub mod item;
pub mod transfer;
pub mod trash;

use clap::{Parser, Subcommand};

use cloudvault_core::AppError;
use cloudvault_core::config::AppConfig;
use cloudvault_core::types::FolderId;
use cloudvault_entity::item::{ItemKind, ItemRef};
use cloudvault_persist::PersistenceManager;
use cloudvault_session::DriveSession;

use crate::output::OutputFormat;

/// CloudVault — Personal Cloud Drive
#[derive(Debug, Parser)]
#[command(name = "cloudvault", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse a drive view
    Ls(browse::LsArgs),
    /// Create a folder
    Mkdir(folder::MkdirArgs),
    /// Upload a local file into the drive
    Upload(transfer::UploadArgs),
    /// Write a stored file back to disk
    Download(transfer::DownloadArgs),
    /// Rename an item
    Rename(item::RenameArgs),
    /// Move an item to another folder
    Mv(item::MvArgs),
    /// Move an item to the trash
    Trash(trash::TrashArgs),
    /// Restore an item from the trash
    Restore(trash::RestoreArgs),
    /// Permanently delete an item
    Purge(trash::PurgeArgs),
    /// Permanently delete everything in the trash
    EmptyTrash(trash::EmptyTrashArgs),
    /// Toggle an item's star
    Star(item::StarArgs),
    /// Toggle an item's share flag
    Share(item::ShareArgs),
    /// Show storage usage
    Usage(browse::UsageArgs),
    /// Manage the linked account
    Account(account::AccountArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Ls(args) => browse::ls(args, &self.config, self.format).await,
            Commands::Mkdir(args) => folder::mkdir(args, &self.config).await,
            Commands::Upload(args) => transfer::upload(args, &self.config).await,
            Commands::Download(args) => transfer::download(args, &self.config).await,
            Commands::Rename(args) => item::rename(args, &self.config).await,
            Commands::Mv(args) => item::mv(args, &self.config).await,
            Commands::Trash(args) => trash::trash(args, &self.config).await,
            Commands::Restore(args) => trash::restore(args, &self.config).await,
            Commands::Purge(args) => trash::purge(args, &self.config).await,
            Commands::EmptyTrash(args) => trash::empty_trash(args, &self.config).await,
            Commands::Star(args) => item::star(args, &self.config).await,
            Commands::Share(args) => item::share(args, &self.config).await,
            Commands::Usage(args) => browse::usage(args, &self.config, self.format).await,
            Commands::Account(args) => account::execute(args, &self.config, self.format).await,
        }
    }
}

/// Item kind selector for item-addressed commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KindArg {
    /// A file record
    File,
    /// A folder record
    Folder,
}

impl From<KindArg> for ItemKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::File => ItemKind::File,
            KindArg::Folder => ItemKind::Folder,
        }
    }
}

/// Helper: open a drive session from the configuration file
pub async fn open_session(config_path: &str) -> Result<DriveSession, AppError> {
    let config = AppConfig::load(config_path)?;
    let persistence = PersistenceManager::new(&config.storage).await?;
    DriveSession::open(persistence.provider(), &config).await
}

/// Helper: parse an item reference from CLI arguments
pub fn parse_item(kind: KindArg, id: &str) -> Result<ItemRef, AppError> {
    let raw = uuid::Uuid::parse_str(id)
        .map_err(|e| AppError::validation(format!("Invalid item id '{id}': {e}")))?;
    Ok(ItemRef::from_parts(kind.into(), raw))
}

/// Helper: parse an optional folder id ("omitted" means root level)
pub fn parse_folder_id(id: Option<&str>) -> Result<Option<FolderId>, AppError> {
    match id {
        Some(id) => {
            let raw = uuid::Uuid::parse_str(id)
                .map_err(|e| AppError::validation(format!("Invalid folder id '{id}': {e}")))?;
            Ok(Some(FolderId::from_uuid(raw)))
        }
        None => Ok(None),
    }
}

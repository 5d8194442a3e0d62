//! Browsing CLI commands: view listings and storage usage.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use cloudvault_core::AppError;
use cloudvault_entity::file::File;
use cloudvault_entity::folder::Folder;
use cloudvault_store::{Listing, ViewMode, ViewRequest};

use crate::output::{self, OutputFormat, format_bytes};

/// Arguments for the ls command
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Folder ID to browse (omit for the root level)
    #[arg(short = 'd', long)]
    pub folder: Option<String>,

    /// View to browse
    #[arg(short, long, value_enum, default_value = "files")]
    pub view: ViewArg,

    /// Search query (searches the whole vault, ignores --folder)
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Arguments for the usage command
#[derive(Debug, Args)]
pub struct UsageArgs {}

/// View selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ViewArg {
    /// Children of the active folder
    Files,
    /// Recently modified items, newest first
    Recent,
    /// Starred items
    Starred,
    /// Trashed items
    Trash,
}

impl From<ViewArg> for ViewMode {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Files => ViewMode::Files,
            ViewArg::Recent => ViewMode::Recent,
            ViewArg::Starred => ViewMode::Starred,
            ViewArg::Trash => ViewMode::Trash,
        }
    }
}

/// Item display row
#[derive(Debug, Serialize, Tabled)]
struct ItemRow {
    /// Kind tag
    kind: String,
    /// Item ID
    id: String,
    /// Name
    name: String,
    /// Size
    size: String,
    /// Last modified
    modified: String,
    /// Starred
    starred: String,
    /// Shared
    shared: String,
}

impl ItemRow {
    fn from_folder(folder: &Folder) -> Self {
        Self {
            kind: "folder".to_string(),
            id: folder.id.to_string(),
            name: folder.name.clone(),
            size: "-".to_string(),
            modified: folder
                .last_modified
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            starred: flag(folder.is_starred),
            shared: flag(folder.is_shared),
        }
    }

    fn from_file(file: &File) -> Self {
        Self {
            kind: "file".to_string(),
            id: file.id.to_string(),
            name: file.name.clone(),
            size: format_bytes(file.size),
            modified: file
                .last_modified
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            starred: flag(file.is_starred),
            shared: flag(file.is_shared),
        }
    }
}

fn flag(on: bool) -> String {
    if on { "✓" } else { "" }.to_string()
}

fn rows(listing: &Listing) -> Vec<ItemRow> {
    let mut rows = Vec::with_capacity(listing.len());
    for folder in &listing.folders {
        rows.push(ItemRow::from_folder(folder));
    }
    for file in &listing.files {
        rows.push(ItemRow::from_file(file));
    }
    rows
}

/// Execute the ls command
pub async fn ls(args: &LsArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let session = super::open_session(config_path).await?;
    let folder_id = super::parse_folder_id(args.folder.as_deref())?;

    let request = ViewRequest {
        mode: args.view.into(),
        folder_id,
        query: args.query.clone().unwrap_or_default(),
    };
    let listing = session.project(&request);

    // Breadcrumb header, only where a location makes sense.
    if format == OutputFormat::Table && args.view == ViewArg::Files && request.query.is_empty() {
        let trail: Vec<String> = session
            .breadcrumbs(folder_id)
            .into_iter()
            .map(|crumb| crumb.name)
            .collect();
        println!("{}", trail.join(" / "));
    }

    output::print_list(&rows(&listing), format);
    Ok(())
}

/// Execute the usage command
pub async fn usage(
    _args: &UsageArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = super::open_session(config_path).await?;
    let usage = session.usage();

    match format {
        OutputFormat::Json => output::print_json(&usage),
        OutputFormat::Table => {
            println!("Storage usage");
            output::print_kv(
                "Used",
                &format!("{} ({} bytes)", format_bytes(usage.used_bytes), usage.used_bytes),
            );
            output::print_kv("Quota", &format_bytes(usage.quota_bytes));
            output::print_kv("Percent", &format!("{:.4}%", usage.percent));
        }
    }
    Ok(())
}

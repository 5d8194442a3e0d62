//! Upload and download CLI commands.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;

use cloudvault_core::AppError;
use cloudvault_core::types::FileId;
use cloudvault_entity::content::FileContent;
use cloudvault_entity::file::FileUpload;

use crate::output::{self, format_bytes};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Local file to upload
    pub path: PathBuf,

    /// Destination folder ID (omit for the root level)
    #[arg(short = 'd', long)]
    pub folder: Option<String>,

    /// Store under a different name
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for the download command
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// File ID
    pub id: String,

    /// Destination path (defaults to the stored name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the upload command
pub async fn upload(args: &UploadArgs, config_path: &str) -> Result<(), AppError> {
    let mut session = super::open_session(config_path).await?;
    let parent_id = super::parse_folder_id(args.folder.as_deref())?;

    let payload = tokio::fs::read(&args.path).await.map_err(|e| {
        AppError::storage(format!("Failed to read '{}': {e}", args.path.display()))
    })?;
    let source_modified = tokio::fs::metadata(&args.path)
        .await
        .ok()
        .and_then(|meta| meta.modified().ok())
        .map(DateTime::<Utc>::from);

    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::validation(format!("No file name in '{}'", args.path.display()))
            })?,
    };
    let mime_type = mime_guess::from_path(&args.path)
        .first_or_octet_stream()
        .to_string();

    let upload = FileUpload {
        name,
        mime_type,
        content: FileContent::new(payload),
        source_modified,
    };
    let file = session.ingest_file(upload, parent_id)?;
    session.flush().await;

    output::print_success(&format!(
        "File '{}' uploaded ({}, id: {})",
        file.name,
        format_bytes(file.size),
        file.id
    ));
    Ok(())
}

/// Execute the download command
pub async fn download(args: &DownloadArgs, config_path: &str) -> Result<(), AppError> {
    let session = super::open_session(config_path).await?;

    let raw = uuid::Uuid::parse_str(&args.id)
        .map_err(|e| AppError::validation(format!("Invalid file id '{}': {e}", args.id)))?;
    let file = session
        .store()
        .file(FileId::from_uuid(raw))
        .ok_or_else(|| AppError::not_found(format!("File '{}' not found", args.id)))?;

    let dest = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&file.name));
    tokio::fs::write(&dest, file.content.as_bytes())
        .await
        .map_err(|e| AppError::storage(format!("Failed to write '{}': {e}", dest.display())))?;

    output::print_success(&format!(
        "File '{}' written to '{}' ({})",
        file.name,
        dest.display(),
        format_bytes(file.size)
    ));
    Ok(())
}

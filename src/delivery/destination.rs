//! Destination selection and validation.
//!
//! A file destination is checked before capture starts so the user never
//! takes a screenshot that cannot be saved. Writability is checked by
//! actually creating a scratch file in the directory, which also covers
//! ACLs and read-only mounts that permission bits do not show.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use super::Destination;
use crate::cli::Options;

const FILE_NAME_FORMAT: &str = "%Y-%m-%d at %H.%M.%S Screenshot.png";

#[derive(Debug, thiserror::Error)]
pub enum DestinationError {
    #[error("destination directory {} does not exist", .0.display())]
    MissingParent(PathBuf),

    #[error("destination parent {} is not a directory", .0.display())]
    ParentNotDirectory(PathBuf),

    #[error("destination directory {} is not writable", .0.display())]
    ParentNotWritable(PathBuf),

    #[error("destination {} is a directory", .0.display())]
    IsDirectory(PathBuf),

    #[error("destination file {} exists and is not writable", .0.display())]
    FileNotWritable(PathBuf),

    #[error("could not determine the Downloads directory")]
    NoDownloadsDir,
}

/// Picks and validates the destination for this run.
pub fn resolve_destination(
    options: &Options,
    now: DateTime<Local>,
) -> Result<Destination, DestinationError> {
    if options.clipboard {
        return Ok(Destination::Clipboard);
    }

    let path = match &options.file {
        Some(path) => path.clone(),
        None => default_destination(&now)?,
    };

    validate_destination(&path).map(Destination::File)
}

/// `~/Downloads/YYYY-MM-DD at HH.MM.SS Screenshot.png`
pub fn default_destination<Tz>(now: &DateTime<Tz>) -> Result<PathBuf, DestinationError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let downloads = dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .ok_or(DestinationError::NoDownloadsDir)?;
    Ok(downloads.join(default_file_name(now)))
}

pub fn default_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format(FILE_NAME_FORMAT).to_string()
}

/// Checks that `path` can be written.
///
/// The parent must exist, be a directory and accept new files. A file
/// already at `path` must itself be writable; it is opened without
/// truncation so the check has no side effects. A bare file name is
/// resolved against the current directory.
pub fn validate_destination(path: &Path) -> Result<PathBuf, DestinationError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let metadata = std::fs::metadata(&parent)
        .map_err(|_| DestinationError::MissingParent(parent.clone()))?;
    if !metadata.is_dir() {
        return Err(DestinationError::ParentNotDirectory(parent));
    }
    if !dir_accepts_files(&parent) {
        return Err(DestinationError::ParentNotWritable(parent));
    }

    if path.is_dir() {
        return Err(DestinationError::IsDirectory(path.to_path_buf()));
    }
    if path.exists() && OpenOptions::new().write(true).open(path).is_err() {
        return Err(DestinationError::FileNotWritable(path.to_path_buf()));
    }

    log::debug!("[DELIVERY] Destination {} is writable", path.display());
    Ok(path.to_path_buf())
}

fn dir_accepts_files(dir: &Path) -> bool {
    tempfile::Builder::new()
        .prefix(".activeshot-check-")
        .tempfile_in(dir)
        .is_ok()
}

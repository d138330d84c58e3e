//! Error types.
//!
//! Failures are scoped: a [`RenameError`] belongs to one page, an
//! [`IssueError`] to one issue directory and a [`LibraryError`] to the
//! top-level input directory. Page errors never abort their issue and issue
//! errors never abort the run.

use std::path::PathBuf;
use thiserror::Error;

/// No entry of the issue is a recognized image, so no baseline exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no recognized image to calibrate against")]
pub struct CalibrationFailure;

/// A page number would not fit in a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page numbers run past {}", u32::MAX)]
pub struct NumberOverflow;

/// Why an issue could not be planned from its page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("calibration failed: {0}")]
    Calibration(#[from] CalibrationFailure),

    #[error("numbering failed: {0}")]
    NumberOverflow(#[from] NumberOverflow),
}

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("calibration failed: {0}")]
    Calibration(#[from] CalibrationFailure),

    #[error("numbering failed: {0}")]
    NumberOverflow(#[from] NumberOverflow),

    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to archive: {0}")]
    Archive(#[from] ArchiveError),
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("No such directory: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("failed to rename {} to {}: {}", .from.display(), .to.display(), .source)]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot rename {} to {}: target already exists", .from.display(), .to.display())]
    TargetExists { from: PathBuf, to: PathBuf },
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

#[derive(Debug, Error)]
#[error("failed to read {}: {}", .path.display(), .source)]
pub struct ProbeError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

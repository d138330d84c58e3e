//! Archive name normalization for the `prep` command.
//!
//! `Saga 5 (of 6) (2016) (Digital).cbr` becomes `Saga #005.rar`: the
//! parenthesized suffix is dropped, comic extensions map to their plain
//! archive counterparts and the trailing issue number is padded.

use crate::error::LibraryError;
use crate::report::RenameEntry;
use natord::compare;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const ISSUE_NUMBER_WIDTH: usize = 3;

/// ` (of 6) (2016) (Digital)`, ` (2016)` and anything after them.
static RE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\((?:of\s)?\d*\).*$").unwrap());

static RE_ISSUE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"#?(\d+)$").unwrap());

fn archive_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "cbz" | "zip" => Some("zip"),
        "cbr" | "rar" => Some("rar"),
        _ => None,
    }
}

/// The normalized name for an archive file, or `None` when `file_name` is not
/// a comic archive.
pub fn normalize_archive_name(file_name: &str) -> Option<String> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    let extension = archive_extension(extension)?;

    let stem = RE_SUFFIX.replace(stem, "");
    let stem = RE_ISSUE_NUMBER.replace(stem.trim_end(), |caps: &regex::Captures| {
        format!("#{:0>width$}", &caps[1], width = ISSUE_NUMBER_WIDTH)
    });
    Some(format!("{stem}.{extension}"))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepReport {
    pub directory: PathBuf,
    pub dry_run: bool,
    pub renames: Vec<RenameEntry>,
    pub errors: Vec<String>,
}

/// Normalizes the names of the archives directly inside `directory`.
pub fn prep_directory(directory: &Path, dry_run: bool) -> Result<PrepReport, LibraryError> {
    match fs::metadata(directory) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(LibraryError::NotADirectory(directory.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(LibraryError::DirectoryNotFound(directory.to_path_buf()))
        }
        Err(err) => return Err(err.into()),
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort_by(|a, b| compare(a, b));

    let mut report = PrepReport {
        directory: directory.to_path_buf(),
        dry_run,
        renames: Vec::new(),
        errors: Vec::new(),
    };

    for name in names {
        let Some(normalized) = normalize_archive_name(&name) else {
            debug!("prep: skipping {}", name);
            continue;
        };
        if normalized == name {
            continue;
        }

        let target = directory.join(&normalized);
        if target.exists() {
            let message = format!("cannot rename {name} to {normalized}: target already exists");
            warn!("{}", message);
            report.errors.push(message);
            continue;
        }
        if !dry_run {
            if let Err(err) = fs::rename(directory.join(&name), &target) {
                let message = format!("failed to rename {name} to {normalized}: {err}");
                warn!("{}", message);
                report.errors.push(message);
                continue;
            }
        }
        info!("{} -> {}", name, normalized);
        report.renames.push(RenameEntry {
            original_name: name,
            renamed_name: normalized,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn normalized(name: &str) -> Option<String> {
        normalize_archive_name(name)
    }

    #[test]
    fn strips_suffix_and_pads_number() {
        assert_eq!(
            normalized("Saga 5 (of 6) (2016) (Digital).cbr").as_deref(),
            Some("Saga #005.rar")
        );
        assert_eq!(
            normalized("Paper Girls 012 (2017) (digital).cbz").as_deref(),
            Some("Paper Girls #012.zip")
        );
        assert_eq!(normalized("Monstress #7.zip").as_deref(), Some("Monstress #007.zip"));
    }

    #[test]
    fn long_numbers_are_not_truncated() {
        assert_eq!(normalized("Spawn 1234.cbz").as_deref(), Some("Spawn #1234.zip"));
    }

    #[test]
    fn names_without_number_keep_their_stem() {
        assert_eq!(
            normalized("Annual (2019).CBZ").as_deref(),
            Some("Annual.zip")
        );
        assert_eq!(normalized("One Shot.rar").as_deref(), Some("One Shot.rar"));
    }

    #[test]
    fn normalized_names_are_stable() {
        assert_eq!(normalized("Saga #005.rar").as_deref(), Some("Saga #005.rar"));
    }

    #[test]
    fn ignores_non_archives() {
        assert_eq!(normalized("cover.jpg"), None);
        assert_eq!(normalized("README"), None);
    }

    #[test]
    fn renames_archives_in_place() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("Saga 5 (of 6) (2016).cbr"), b"rar").expect("write");
        fs::write(temp.path().join("notes.txt"), b"notes").expect("write");
        fs::create_dir(temp.path().join("Saga 6 (2016).cbz")).expect("dir");

        let report = prep_directory(temp.path(), false).expect("prep");
        assert_eq!(
            report.renames,
            vec![RenameEntry {
                original_name: "Saga 5 (of 6) (2016).cbr".to_string(),
                renamed_name: "Saga #005.rar".to_string(),
            }]
        );
        assert!(temp.path().join("Saga #005.rar").exists());
        assert!(temp.path().join("notes.txt").exists());
        assert!(temp.path().join("Saga 6 (2016).cbz").is_dir());
    }

    #[test]
    fn dry_run_and_collisions() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("Saga 1.cbz"), b"a").expect("write");
        fs::write(temp.path().join("Saga 2.cbz"), b"b").expect("write");
        fs::write(temp.path().join("Saga #002.zip"), b"c").expect("write");

        let report = prep_directory(temp.path(), true).expect("prep");
        assert_eq!(report.renames.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert!(temp.path().join("Saga 1.cbz").exists());
    }

    #[test]
    fn rejects_missing_directory() {
        let temp = TempDir::new().expect("temp dir");
        let result = prep_directory(&temp.path().join("missing"), false);
        assert!(matches!(result, Err(LibraryError::DirectoryNotFound(_))));
    }
}

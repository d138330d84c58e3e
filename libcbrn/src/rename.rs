use crate::error::RenameError;
use crate::page::NumberedPage;
use crate::report::RenameEntry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct RenameOutcome {
    pub applied: Vec<RenameEntry>,
    pub errors: Vec<RenameError>,
}

struct Staged<'a> {
    page: &'a NumberedPage,
    original: PathBuf,
    temp: PathBuf,
}

fn temp_name(index: usize) -> String {
    format!(".cbrn_tmp_{}_{:04}", std::process::id(), index)
}

fn restore(staged: &Staged<'_>) {
    if let Err(err) = fs::rename(&staged.temp, &staged.original) {
        warn!(
            "could not restore {} from {}: {}",
            staged.original.display(),
            staged.temp.display(),
            err
        );
    }
}

/// Renames every page of an issue to its target name.
///
/// Pages first move to unique temporary names and then to their targets, so
/// a target that currently belongs to another page is never overwritten.
/// Pages already carrying their target name are left alone. A failure only
/// affects its own page; nothing already renamed is rolled back.
pub fn apply_renames(directory: &Path, pages: &[NumberedPage]) -> RenameOutcome {
    let mut outcome = RenameOutcome::default();
    let mut staged = Vec::with_capacity(pages.len());

    for (index, page) in pages.iter().enumerate() {
        if page.page.file_name == page.target_name {
            continue;
        }
        let original = directory.join(&page.page.file_name);
        let temp = directory.join(temp_name(index));
        match fs::rename(&original, &temp) {
            Ok(()) => staged.push(Staged {
                page,
                original,
                temp,
            }),
            Err(source) => outcome.errors.push(RenameError::Io {
                from: original,
                to: temp,
                source,
            }),
        }
    }

    for item in &staged {
        let target = directory.join(&item.page.target_name);
        if target.exists() {
            restore(item);
            outcome.errors.push(RenameError::TargetExists {
                from: item.original.clone(),
                to: target,
            });
            continue;
        }
        match fs::rename(&item.temp, &target) {
            Ok(()) => {
                debug!("{} -> {}", item.page.page.file_name, item.page.target_name);
                outcome.applied.push(RenameEntry::from(item.page));
            }
            Err(source) => {
                restore(item);
                outcome.errors.push(RenameError::Io {
                    from: item.original.clone(),
                    to: target,
                    source,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Layout, Page, Size};
    use tempfile::TempDir;

    fn numbered(index: usize, from: &str, to: &str) -> NumberedPage {
        NumberedPage {
            page: Page {
                index,
                file_name: from.to_string(),
                extension: "jpg".to_string(),
                size: Size::new(1000, 1500),
                ratio: 1.5,
                layout: Layout::Single,
                slot_count: 1,
            },
            number: format!("{:02}", index + 1),
            target_name: to.to_string(),
        }
    }

    #[test]
    fn swaps_names_without_clobbering() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("T - 01.jpg"), b"second").expect("write");
        fs::write(temp.path().join("T - 02.jpg"), b"first").expect("write");

        let pages = vec![
            numbered(0, "T - 02.jpg", "T - 01.jpg"),
            numbered(1, "T - 01.jpg", "T - 02.jpg"),
        ];
        let outcome = apply_renames(temp.path(), &pages);

        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.applied.len(), 2);
        let one = fs::read_to_string(temp.path().join("T - 01.jpg")).expect("read");
        let two = fs::read_to_string(temp.path().join("T - 02.jpg")).expect("read");
        assert_eq!(one, "first");
        assert_eq!(two, "second");
    }

    #[test]
    fn skips_pages_already_named() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("T - 01.jpg"), b"x").expect("write");

        let outcome = apply_renames(temp.path(), &[numbered(0, "T - 01.jpg", "T - 01.jpg")]);
        assert!(outcome.applied.is_empty());
        assert!(outcome.errors.is_empty());
        assert!(temp.path().join("T - 01.jpg").exists());
    }

    #[test]
    fn refuses_to_overwrite_foreign_file() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("scan.jpg"), b"page").expect("write");
        fs::write(temp.path().join("T - 01.jpg"), b"not a page").expect("write");

        let outcome = apply_renames(temp.path(), &[numbered(0, "scan.jpg", "T - 01.jpg")]);
        assert!(matches!(
            outcome.errors.as_slice(),
            [RenameError::TargetExists { .. }]
        ));
        assert!(temp.path().join("scan.jpg").exists());
        let untouched = fs::read_to_string(temp.path().join("T - 01.jpg")).expect("read");
        assert_eq!(untouched, "not a page");
    }

    #[test]
    fn missing_source_fails_only_that_page() {
        let temp = TempDir::new().expect("temp dir");
        fs::write(temp.path().join("b.jpg"), b"b").expect("write");

        let pages = vec![
            numbered(0, "a.jpg", "T - 01.jpg"),
            numbered(1, "b.jpg", "T - 02.jpg"),
        ];
        let outcome = apply_renames(temp.path(), &pages);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.applied.len(), 1);
        assert!(temp.path().join("T - 02.jpg").exists());
    }
}

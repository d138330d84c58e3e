use crate::archive::{archive_directory, archive_path};
use crate::baseline::calibrate;
use crate::config::RenumberConfig;
use crate::error::IssueError;
use crate::page::PageInput;
use crate::plan::{classify_pages, number_pages, page_warnings};
use crate::probe::{ImageProbe, ProbeResult};
use crate::rename::apply_renames;
use crate::report::{IssueReport, IssueStage, RenameEntry, Warning};
use natord::compare;
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

struct IssueEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

enum Scanned {
    Page(PageInput),
    NotImage,
    Subdirectory,
    Unreadable(String),
}

pub fn issue_title(directory: &Path) -> String {
    directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.display().to_string())
}

/// Runs one issue directory through
/// `Pending → Calibrating → Classifying → Numbering → Renaming → (Archiving) → Done`.
pub struct IssueProcessor<'a> {
    config: &'a RenumberConfig,
    probe: &'a dyn ImageProbe,
}

impl<'a> IssueProcessor<'a> {
    pub fn new(config: &'a RenumberConfig, probe: &'a dyn ImageProbe) -> Self {
        Self { config, probe }
    }

    /// Never fails: problems end up in the returned report.
    pub fn process(&self, directory: &Path) -> IssueReport {
        let mut report = IssueReport::new(
            issue_title(directory),
            directory.to_path_buf(),
            self.config.dry_run,
        );

        match self.run(directory, &mut report) {
            Ok(()) => {
                advance(&mut report, IssueStage::Done);
                info!(
                    "{}: {} renamed, {} warnings",
                    report.title,
                    report.renames.len(),
                    report.warnings.len()
                );
            }
            Err(err) => {
                warn!("{}: failed while {}: {}", report.title, report.stage, err);
                report.failure = Some(format!("{err} (while {})", report.stage));
                report.stage = IssueStage::Failed;
            }
        }
        report
    }

    fn run(&self, directory: &Path, report: &mut IssueReport) -> Result<(), IssueError> {
        check_directory(directory)?;
        let entries = read_entries(directory, report)?;

        if !self.config.archive_only {
            self.renumber(directory, entries, report)?;
        }

        if self.config.zip || self.config.archive_only {
            advance(report, IssueStage::Archiving);
            report.archive = Some(if self.config.dry_run {
                archive_path(directory)
            } else {
                archive_directory(directory)?
            });
        }
        Ok(())
    }

    fn renumber(
        &self,
        directory: &Path,
        entries: Vec<IssueEntry>,
        report: &mut IssueReport,
    ) -> Result<(), IssueError> {
        advance(report, IssueStage::Calibrating);
        let scanned: Vec<Scanned> = entries.par_iter().map(|entry| self.scan(entry)).collect();
        let inputs = self.sort_out(entries, scanned, report);
        let baseline = calibrate(inputs.iter().map(|input| &input.size))?;
        debug!("{}: baseline {:?}", report.title, baseline);

        advance(report, IssueStage::Classifying);
        let pages = classify_pages(&inputs, &baseline, self.config);
        for page in &pages {
            debug!(
                "{}: {} ratio {} -> {} ({} slots)",
                report.title, page.file_name, page.ratio, page.layout, page.slot_count
            );
        }

        advance(report, IssueStage::Numbering);
        let numbered = number_pages(&report.title, pages, self.config.first_number)?;
        for warning in page_warnings(&report.title, &numbered) {
            note(report, warning);
        }

        advance(report, IssueStage::Renaming);
        if self.config.dry_run {
            report.renames = numbered
                .iter()
                .filter(|page| page.page.file_name != page.target_name)
                .map(RenameEntry::from)
                .collect();
        } else {
            let outcome = apply_renames(directory, &numbered);
            for err in &outcome.errors {
                warn!("{}: {}", report.title, err);
            }
            report.renames = outcome.applied;
            report
                .errors
                .extend(outcome.errors.iter().map(|err| err.to_string()));
        }
        Ok(())
    }

    fn scan(&self, entry: &IssueEntry) -> Scanned {
        if entry.is_dir {
            return Scanned::Subdirectory;
        }
        match self.probe.probe(&entry.path) {
            Ok(ProbeResult::Image { extension, size }) if self.config.recognizes(&extension) => {
                Scanned::Page(PageInput::new(entry.name.clone(), &extension, size))
            }
            Ok(_) => Scanned::NotImage,
            Err(err) => Scanned::Unreadable(err.source.to_string()),
        }
    }

    /// Keeps the pages in order and turns everything else into warnings,
    /// deleting non-images in clean mode.
    fn sort_out(
        &self,
        entries: Vec<IssueEntry>,
        scanned: Vec<Scanned>,
        report: &mut IssueReport,
    ) -> Vec<PageInput> {
        let mut inputs = Vec::new();
        for (entry, result) in entries.into_iter().zip(scanned) {
            let warning = match result {
                Scanned::Page(input) => {
                    inputs.push(input);
                    continue;
                }
                Scanned::Subdirectory => Warning::Subdirectory { name: entry.name },
                Scanned::Unreadable(reason) => Warning::Unreadable {
                    file: entry.name,
                    reason,
                },
                Scanned::NotImage if self.config.clean && !self.config.dry_run => {
                    match fs::remove_file(&entry.path) {
                        Ok(()) => Warning::RemovedNonImage { file: entry.name },
                        Err(err) => {
                            report
                                .errors
                                .push(format!("failed to remove {}: {}", entry.name, err));
                            Warning::NonImage { file: entry.name }
                        }
                    }
                }
                Scanned::NotImage => Warning::NonImage { file: entry.name },
            };
            note(report, warning);
        }
        inputs
    }
}

fn note(report: &mut IssueReport, warning: Warning) {
    warn!("{}: {}", report.title, warning);
    report.warnings.push(warning);
}

fn advance(report: &mut IssueReport, stage: IssueStage) {
    debug!("{}: {} -> {}", report.title, report.stage, stage);
    report.stage = stage;
}

fn check_directory(directory: &Path) -> Result<(), IssueError> {
    match fs::metadata(directory) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(IssueError::NotADirectory(directory.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(IssueError::DirectoryNotFound(directory.to_path_buf()))
        }
        Err(err) => Err(IssueError::Io(err)),
    }
}

/// Directory entries in natural order, the authoritative reading order.
fn read_entries(directory: &Path, report: &mut IssueReport) -> Result<Vec<IssueEntry>, IssueError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        match entry.file_name().into_string() {
            Ok(name) => entries.push(IssueEntry {
                name,
                path: entry.path(),
                is_dir,
            }),
            Err(raw) => note(
                report,
                Warning::Unreadable {
                    file: raw.to_string_lossy().into_owned(),
                    reason: "file name is not valid UTF-8".to_string(),
                },
            ),
        }
    }
    entries.sort_by(|a, b| compare(&a.name, &b.name));
    Ok(entries)
}

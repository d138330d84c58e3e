use crate::page::{Layout, NumberedPage};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Where an issue is in its pipeline. `Failed` can follow any other stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueStage {
    Pending,
    Calibrating,
    Classifying,
    Numbering,
    Renaming,
    Archiving,
    Done,
    Failed,
}

impl fmt::Display for IssueStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IssueStage::Pending => "pending",
            IssueStage::Calibrating => "calibrating",
            IssueStage::Classifying => "classifying",
            IssueStage::Numbering => "numbering",
            IssueStage::Renaming => "renaming",
            IssueStage::Archiving => "archiving",
            IssueStage::Done => "done",
            IssueStage::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Operator-facing, non-fatal observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Warning {
    IrregularRatio {
        file: String,
        ratio: f64,
        layout: Layout,
    },
    PossibleTag {
        issue: String,
        file: String,
    },
    NonImage {
        file: String,
    },
    RemovedNonImage {
        file: String,
    },
    Subdirectory {
        name: String,
    },
    Unreadable {
        file: String,
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::IrregularRatio { file, ratio, layout } => {
                write!(f, "{file} has an irregular ratio ({ratio}, {layout})")
            }
            Warning::PossibleTag { issue, file } => {
                write!(f, "{issue} might contain a tag ({file})")
            }
            Warning::NonImage { file } => write!(f, "contains files other than images – {file}"),
            Warning::RemovedNonImage { file } => write!(f, "removed file {file}"),
            Warning::Subdirectory { name } => write!(f, "contains a subdirectory – {name}/"),
            Warning::Unreadable { file, reason } => write!(f, "could not read {file}: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameEntry {
    pub original_name: String,
    pub renamed_name: String,
}

impl From<&NumberedPage> for RenameEntry {
    fn from(page: &NumberedPage) -> Self {
        Self {
            original_name: page.page.file_name.clone(),
            renamed_name: page.target_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    pub title: String,
    pub path: PathBuf,
    pub stage: IssueStage,
    pub dry_run: bool,
    pub renames: Vec<RenameEntry>,
    pub warnings: Vec<Warning>,
    /// Per-page failures; they do not fail the issue.
    pub errors: Vec<String>,
    pub failure: Option<String>,
    pub archive: Option<PathBuf>,
}

impl IssueReport {
    pub fn new(title: impl Into<String>, path: PathBuf, dry_run: bool) -> Self {
        Self {
            title: title.into(),
            path,
            stage: IssueStage::Pending,
            dry_run,
            renames: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            failure: None,
            archive: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub issues: Vec<IssueReport>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.issues.iter().filter(|issue| issue.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.issues.len() - self.succeeded()
    }
}

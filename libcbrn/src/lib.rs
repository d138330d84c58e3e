pub mod archive;
pub mod baseline;
pub mod classify;
pub mod config;
pub mod error;
pub mod length;
pub mod numbering;
pub mod page;
pub mod plan;
pub mod prep;
pub mod probe;
pub mod processing;
pub mod rename;
pub mod report;
pub mod utils;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use natord::compare;
use rayon::prelude::*;
use tracing::debug;

pub use config::RenumberConfig;
pub use error::LibraryError;
pub use probe::{HeaderProbe, ImageProbe};
pub use processing::IssueProcessor;
pub use report::{IssueReport, RunReport};

/// Issue directories directly under `input`, in natural order. Loose files
/// at the top level are ignored.
fn issue_directories(input: &Path) -> Result<Vec<PathBuf>, LibraryError> {
    match fs::metadata(input) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(LibraryError::NotADirectory(input.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(LibraryError::DirectoryNotFound(input.to_path_buf()))
        }
        Err(err) => return Err(err.into()),
    }

    let mut issues = Vec::new();
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            issues.push(entry.path());
        } else {
            debug!("ignoring top-level file {}", entry.path().display());
        }
    }
    issues.sort_by(|a, b| compare(&a.to_string_lossy(), &b.to_string_lossy()));
    Ok(issues)
}

/// Processes every issue directory under `input` in parallel. A failing
/// issue is recorded in its report and never stops the others.
pub fn process_library(
    input: &Path,
    config: &RenumberConfig,
    probe: &dyn ImageProbe,
) -> Result<RunReport, LibraryError> {
    let issues = issue_directories(input)?;
    debug!("found {} issues in {}", issues.len(), input.display());

    let processor = IssueProcessor::new(config, probe);
    let issues = issues
        .par_iter()
        .map(|issue| processor.process(issue))
        .collect();
    Ok(RunReport { issues })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::TempDir;

    fn png(dir: &Path, name: &str, width: u32, height: u32) {
        RgbImage::new(width, height)
            .save_with_format(dir.join(name), image::ImageFormat::Png)
            .expect("save png");
    }

    #[test]
    fn processes_each_issue_independently() {
        let temp = TempDir::new().expect("temp dir");
        let good = temp.path().join("Issue 2");
        let empty = temp.path().join("Issue 10");
        fs::create_dir_all(&good).expect("dir");
        fs::create_dir_all(&empty).expect("dir");
        fs::write(temp.path().join("stray.txt"), b"x").expect("write");
        png(&good, "b.png", 20, 30);
        png(&good, "a.png", 20, 30);

        let report = process_library(temp.path(), &RenumberConfig::default(), &HeaderProbe)
            .expect("run");

        let titles: Vec<&str> = report.issues.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Issue 2", "Issue 10"]);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(good.join("Issue 2 - 01.png").exists());
        assert!(good.join("Issue 2 - 02.png").exists());
        assert!(temp.path().join("stray.txt").exists());
    }

    #[test]
    fn rejects_bad_input() {
        let temp = TempDir::new().expect("temp dir");
        let file = temp.path().join("file.txt");
        fs::write(&file, b"x").expect("write");

        let config = RenumberConfig::default();
        assert!(matches!(
            process_library(&file, &config, &HeaderProbe),
            Err(LibraryError::NotADirectory(_))
        ));
        assert!(matches!(
            process_library(&temp.path().join("nope"), &config, &HeaderProbe),
            Err(LibraryError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn numbering_overflow_fails_one_issue_not_the_run() {
        let temp = TempDir::new().expect("temp dir");
        let short = temp.path().join("Short");
        let long = temp.path().join("Long");
        fs::create_dir_all(&short).expect("dir");
        fs::create_dir_all(&long).expect("dir");
        png(&short, "a.png", 20, 30);
        png(&long, "a.png", 20, 30);
        png(&long, "b.png", 20, 30);

        let config = RenumberConfig {
            first_number: u32::MAX,
            ..RenumberConfig::default()
        };
        let report = process_library(temp.path(), &config, &HeaderProbe).expect("run");

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(short.join(format!("Short - {}.png", u32::MAX)).exists());
        assert!(long.join("a.png").exists());
    }
}

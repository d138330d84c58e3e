use crate::error::ArchiveError;
use natord::compare;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::FileOptions;
use zip::CompressionMethod;

/// `<dir>.zip`, next to the directory.
pub fn archive_path(directory: &Path) -> PathBuf {
    let mut name: OsString = directory
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("issue"));
    name.push(".zip");
    directory.with_file_name(name)
}

/// Regular files in `directory`, following symlinks. Dangling links are
/// skipped.
fn collect_files(directory: &Path) -> Result<Vec<(PathBuf, String)>, ArchiveError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("skipping dangling link {}", path.display());
                continue;
            }
            Err(err) => return Err(err.into()),
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        files.push((path, name));
    }
    files.sort_by(|a, b| compare(&a.1, &b.1));
    Ok(files)
}

/// Zips every file directly inside `directory` into `<directory>.zip`.
/// Subdirectories are not included.
pub fn archive_directory(directory: &Path) -> Result<PathBuf, ArchiveError> {
    let files = collect_files(directory)?;
    let target = archive_path(directory);

    let file = File::create(&target)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (path, name) in &files {
        writer.start_file(name.as_str(), options)?;
        let mut source = File::open(path)?;
        io::copy(&mut source, &mut writer)?;
    }
    writer.finish()?;

    debug!("archived {} files into {}", files.len(), target.display());
    Ok(target)
}

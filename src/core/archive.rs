//! Packages the build output directory into a timestamped tar.gz.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Error, Result};

/// Timestamp embedded in archive names, second granularity.
/// Runs started in different seconds never collide.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A freshly created local archive artifact.
#[derive(Debug, Clone)]
pub struct ArchiveInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl ArchiveInfo {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }

    /// Archive file name without any directory prefix.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Name for an archive of `dir` created at `at`, e.g. `dist_20260829_141503.tar.gz`.
pub fn archive_name(dir: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.tar.gz", dir, at.format(TIMESTAMP_FORMAT))
}

/// Archive `source_dir` (relative to the current directory) into a
/// tar.gz next to it, named with the current timestamp.
pub fn create(source_dir: &str) -> Result<ArchiveInfo> {
    create_in(source_dir, Path::new("."), Local::now())
}

/// Archive `output_dir/../source_dir` into `output_dir`, stamping the
/// name with `at`. The archive's entries are all rooted at the source
/// directory's name, so a plain `tar -xzf` recreates `source_dir` in
/// the extraction directory.
pub fn create_in(source_dir: &str, output_dir: &Path, at: DateTime<Local>) -> Result<ArchiveInfo> {
    let source = output_dir.join(source_dir);
    if !source.is_dir() {
        return Err(Error::archive_missing_source(source_dir)
            .with_hint("Run the build first; the archiver does not invoke it"));
    }

    let path = output_dir.join(archive_name(source_dir, at));

    let file = File::create(&path)
        .map_err(|e| Error::archive_failed(format!("{}: {}", path.display(), e)))?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    builder
        .append_dir_all(source_dir, &source)
        .map_err(|e| Error::archive_failed(e.to_string()))?;
    let encoder = builder
        .into_inner()
        .map_err(|e| Error::archive_failed(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| Error::archive_failed(e.to_string()))?;

    let size_bytes = std::fs::metadata(&path)
        .map_err(|e| Error::archive_failed(e.to_string()))?
        .len();

    Ok(ArchiveInfo { path, size_bytes })
}

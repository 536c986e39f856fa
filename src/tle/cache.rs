use crate::core::error::TransferError;
use crate::tle::source::TleSource;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Refreshed,
    Fresh { age: Duration },
}

/// True when `path` is missing or was last modified more than `max_age` ago.
pub fn is_outdated(path: &Path, max_age: Duration) -> bool {
    is_outdated_at(path, max_age, SystemTime::now())
}

pub fn is_outdated_at(path: &Path, max_age: Duration, now: SystemTime) -> bool {
    match file_age_at(path, now) {
        Some(age) => age > max_age,
        None => true,
    }
}

/// Age of the file at `now`; `None` if it does not exist or has no usable mtime.
/// An mtime in the future counts as age zero.
pub fn file_age_at(path: &Path, now: SystemTime) -> Option<Duration> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(now.duration_since(modified).unwrap_or(Duration::ZERO))
}

/// Fetches the source once and replaces `path` with the body.
///
/// The body is written to a sibling temp file first and renamed into place, so a
/// failed fetch or write leaves any previous cache file untouched.
pub async fn refresh(source: &dyn TleSource, path: &Path) -> Result<(), TransferError> {
    let body = source.fetch().await?;

    let write_err = |source| TransferError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = temp_path(path);
    if let Err(e) = std::fs::write(&tmp, body.as_bytes()) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    tracing::info!(path = %path.display(), bytes = body.len(), "TLE data saved");
    Ok(())
}

/// Refreshes `path` from `source` if it is outdated (or unconditionally with `force`).
pub async fn ensure_fresh(
    source: &dyn TleSource,
    path: &Path,
    max_age: Duration,
    force: bool,
) -> Result<CacheStatus, TransferError> {
    if force || is_outdated(path, max_age) {
        refresh(source, path).await?;
        return Ok(CacheStatus::Refreshed);
    }

    let age = file_age_at(path, SystemTime::now()).unwrap_or(Duration::ZERO);
    tracing::info!(path = %path.display(), age_secs = age.as_secs(), "TLE file is up-to-date");
    Ok(CacheStatus::Fresh { age })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

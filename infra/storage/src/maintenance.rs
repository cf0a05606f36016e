use crate::logger::Logger;
use crate::resolver;
use std::path::Path;
use std::time::{Duration, SystemTime};
use walkdir::{DirEntry, WalkDir};

/// Temp files younger than this may still belong to a write in progress.
const STALE_AFTER: Duration = Duration::from_secs(300);

/// Removes orphaned `*.tmp` files left behind by interrupted writes.
///
/// Failures are logged and counted, never propagated: a leftover temp file is
/// not a record and does not block opening the store.
pub(crate) fn purge_tmp(root: &Path, log: &dyn Logger) -> (usize, usize) {
    let (removed, failed) = remove_stale(root, SystemTime::now(), STALE_AFTER, log);
    if removed > 0 || failed > 0 {
        log.info(format_args!(
            "Cleaned up temporary files under '{}' (removed: {removed}, failed: {failed})",
            root.display()
        ));
    }
    (removed, failed)
}

fn remove_stale(
    root: &Path,
    now: SystemTime,
    threshold: Duration,
    log: &dyn Logger,
) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file() && resolver::is_temp(entry.path()))
        .filter(|entry| is_stale(entry, now, threshold))
        .for_each(|entry| match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(err) => {
                log.warn(format_args!(
                    "Failed to remove temporary file '{}': {err}",
                    entry.path().display()
                ));
                failed += 1;
            },
        });

    (removed, failed)
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .map_or(true, |age| age > threshold)
}

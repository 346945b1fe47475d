use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Find candidate files under a root directory
///
/// Returns paths relative to `root_dir` whose file name ends with `.{extension}`,
/// sorted. Directories that can't be read are skipped.
pub fn list_candidates(root_dir: &Path, extension: &str) -> Vec<PathBuf> {
    let suffix = format!(".{}", extension);
    let mut found = vec![];
    scan_directory(root_dir, &suffix, &mut found);

    let mut candidates: Vec<PathBuf> = found
        .into_iter()
        .filter_map(|path| path.strip_prefix(root_dir).map(Path::to_path_buf).ok())
        .collect();
    candidates.sort();
    debug!(count = candidates.len(), root = %root_dir.display(), "Scanned for candidates");
    candidates
}

fn scan_directory(dir: &Path, suffix: &str, found: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), "Skipping unreadable directory : {}", err);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(_) => continue,
        };
        if file_type.is_dir() {
            scan_directory(&path, suffix, found);
        } else if is_candidate(&path, suffix) {
            found.push(path);
        }
    }
}

fn is_candidate(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.len() > suffix.len() && name.ends_with(suffix))
        .unwrap_or(false)
}

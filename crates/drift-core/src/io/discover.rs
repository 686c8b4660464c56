use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;

/// File-name suffix of the candidates for `hour`, e.g. `070000.jpg`.
pub fn candidate_suffix(hour: u8) -> String {
    format!("{hour:02}0000.jpg")
}

/// Candidate files of one hour bucket: regular, non-hidden files in
/// `directory` whose name ends in `HH0000.jpg`, sorted by file name.
pub fn list_candidates(directory: &Path, hour: u8) -> Result<Vec<PathBuf>> {
    let suffix = candidate_suffix(hour);
    sorted_files(directory, |name| name.ends_with(&suffix))
}

/// Regular, non-hidden files in `directory` whose name satisfies `accept`,
/// sorted lexicographically by name.
pub fn sorted_files<F>(directory: &Path, accept: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    let mut names = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str().map(str::to_owned) else {
            warn!(name = %file_name.to_string_lossy(), "Skipping file with non-UTF-8 name");
            continue;
        };
        if name.starts_with('.') || !accept(&name) {
            continue;
        }
        if entry.path().is_file() {
            names.push(name);
        }
    }
    names.sort();

    Ok(names.into_iter().map(|n| directory.join(n)).collect())
}

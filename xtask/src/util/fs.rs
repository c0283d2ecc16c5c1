//! Directory helpers shared by the build driver and the packager.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Leaves `path` as an existing, empty directory.
///
/// A failed removal of the old tree is ignored; creating the directory is not.
pub fn clear_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if let Err(err) = fs::remove_dir_all(path) {
            debug!("ignoring failure to remove {}: {err}", path.display());
        }
    }
    fs::create_dir_all(path).with_context(|| format!("Creating {}", path.display()))
}

/// Clears `dst`, then copies the files directly inside `src` whose names match
/// the glob `pattern`. Returns the number of files copied.
pub fn copy_files(src: &Path, dst: &Path, pattern: &str) -> Result<usize> {
    clear_dir(dst)?;
    let matched = matching_files(src, pattern)?;
    for file in &matched {
        if let Some(name) = file.file_name() {
            fs::copy(file, dst.join(name)).with_context(|| {
                format!("Copying {} to {}", file.display(), dst.display())
            })?;
        }
    }
    Ok(matched.len())
}

/// Deletes the files directly inside `src` whose names match `pattern`.
pub fn remove_files(src: &Path, pattern: &str) -> Result<usize> {
    let matched = matching_files(src, pattern)?;
    for file in &matched {
        fs::remove_file(file).with_context(|| format!("Removing {}", file.display()))?;
    }
    Ok(matched.len())
}

fn matching_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = glob::Pattern::new(pattern)
        .with_context(|| format!("Invalid file pattern '{pattern}'"))?;

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err).with_context(|| format!("Reading {}", dir.display())),
    };

    let mut matched = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Reading {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(|name| pattern.matches(name)) {
            matched.push(path);
        }
    }
    matched.sort();
    Ok(matched)
}

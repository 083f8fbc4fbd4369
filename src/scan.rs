//! Directory enumeration.
//!
//! Lists the candidate image files in a directory. Candidates are files
//! whose name ends in `.` plus one of [`IMAGE_EXTENSIONS`], compared
//! case-insensitively, so `PHOTO.JPG`, `photo.jpg` and `.cover.png` are all
//! picked up. Everything else (sub-directories, `notes.txt`, files without
//! an extension) is skipped without ever being opened.
//!
//! A symlink counts as a candidate when its name matches and its target is
//! a file. A dangling link is kept so that opening it reports the failure.
//!
//! ## Ordering
//!
//! Entries are returned sorted by path. The filesystem gives no ordering
//! guarantee, and sorted output makes runs reproducible.
//!
//! ## Recursion
//!
//! By default only the top level of the directory is listed. With
//! [`ScanOptions::recursive`] the whole tree is walked; symlinked
//! directories are not descended into.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;
use walkdir::WalkDir;

/// Extensions treated as images, lowercase.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Which entries a scan picks up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Descend into sub-directories.
    pub recursive: bool,
    /// Leave out files and directories whose name starts with a dot.
    pub skip_hidden: bool,
}

/// A candidate image file found by [`scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Full path, as joined onto the scanned directory.
    pub path: PathBuf,
    /// Path relative to the scanned directory. Just the file name unless
    /// the scan was recursive.
    pub name: String,
}

/// List candidate image files in `dir`.
///
/// Fails if `dir` does not exist, is not a directory, or cannot be read.
/// A sub-directory that becomes unreadable mid-walk fails the scan too.
pub fn scan(dir: &Path, options: ScanOptions) -> Result<Vec<ImageFile>, ScanError> {
    let metadata = std::fs::metadata(dir)?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !options.skip_hidden || e.depth() == 0 || !is_hidden(e.path()));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if !is_file_or_link_to_file(&entry) {
            trace!(path = %path.display(), "skipping non-file entry");
            continue;
        }
        if !is_image(path) {
            trace!(path = %path.display(), "skipping non-image file");
            continue;
        }

        let name = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        files.push(ImageFile {
            path: path.to_path_buf(),
            name,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

fn is_file_or_link_to_file(entry: &walkdir::DirEntry) -> bool {
    if !entry.path_is_symlink() {
        return entry.file_type().is_file();
    }
    match std::fs::metadata(entry.path()) {
        Ok(target) => target.is_file(),
        Err(_) => true,
    }
}

/// Whether the file name ends in `.` plus one of [`IMAGE_EXTENSIONS`],
/// ignoring case. A file named just `.png` matches.
pub fn is_image(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| name.strip_suffix(*ext).is_some_and(|stem| stem.ends_with('.')))
}

//! Module fingerprints
//!
//! A single-file module hashes its one file. A directory package hashes every
//! file beneath its directory, sorted by relative path, so that editing a
//! helper file inside the package also triggers a reload.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::entities::{DiscoveryPattern, WorkerCandidate};
use crate::domain::value_objects::ContentHash;

pub fn fingerprint(candidate: &WorkerCandidate) -> io::Result<ContentHash> {
    match candidate.pattern {
        DiscoveryPattern::SingleFile => {
            let bytes = fs::read(&candidate.module_path)?;
            Ok(ContentHash::from_bytes(&bytes))
        }
        DiscoveryPattern::DirectoryPackage => hash_directory(&candidate.source_root()),
    }
}

/// Hash every non-hidden file under `dir`, sorted by relative path
pub fn hash_directory(dir: &Path) -> io::Result<ContentHash> {
    let mut files = Vec::new();
    for entry in WalkBuilder::new(dir)
        .standard_filters(false)
        .hidden(true)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build()
    {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        files.push((relative, fs::read(entry.path())?));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(ContentHash::from_parts(
        files.iter().map(|(name, bytes)| (name.as_str(), bytes.as_slice())),
    ))
}

/// Hash of every non-hidden file under `root`, keyed by path.
/// Unreadable files are left out.
pub fn hash_tree(root: &Path) -> HashMap<PathBuf, ContentHash> {
    WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .filter_map(|entry| {
            let bytes = fs::read(entry.path()).ok()?;
            Some((entry.into_path(), ContentHash::from_bytes(&bytes)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn package_hash_tracks_helper_files() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("cpu");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("mod.toml"), "[cpu_router]").unwrap();
        fs::write(pkg.join("helper.toml"), "a = 1").unwrap();

        let before = hash_directory(&pkg).unwrap();
        assert_eq!(before, hash_directory(&pkg).unwrap());

        fs::write(pkg.join("helper.toml"), "a = 2").unwrap();
        assert_ne!(before, hash_directory(&pkg).unwrap());
    }

    #[test]
    fn tree_hashes_cover_nested_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("01_a/x")).unwrap();
        fs::write(dir.path().join("01_a/x/gpu_worker.toml"), "x").unwrap();
        fs::write(dir.path().join(".hidden"), "x").unwrap();
        let hashes = hash_tree(dir.path());
        assert_eq!(hashes.len(), 1);
        assert!(hashes.contains_key(&dir.path().join("01_a/x/gpu_worker.toml")));
    }

    #[test]
    fn hidden_files_do_not_count() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("mod.toml"), "x").unwrap();
        let before = hash_directory(dir.path()).unwrap();
        fs::write(dir.path().join(".swp"), "junk").unwrap();
        assert_eq!(before, hash_directory(dir.path()).unwrap());
    }
}

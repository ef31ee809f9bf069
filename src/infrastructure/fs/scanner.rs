//! Example scanner
//!
//! Walks `root/{category}/{example}` and records what each example directory
//! contains, so that pattern matching can stay free of I/O.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{ExampleListing, ExampleLocation};
use crate::domain::services::WORKERS_DIR;
use crate::domain::value_objects::DiscoveryIssue;
use crate::error::{HubError, HubResult};

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub listings: Vec<ExampleListing>,
    pub issues: Vec<DiscoveryIssue>,
}

#[derive(Debug, Clone)]
pub struct ExampleScanner {
    root: PathBuf,
    categories: Vec<String>,
    entry_file: String,
}

impl ExampleScanner {
    /// An empty category list means every `NN_*` directory under the root.
    pub fn new(root: impl Into<PathBuf>, categories: Vec<String>, entry_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            categories,
            entry_file: entry_file.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Category directory names in scan order
    pub fn categories(&self) -> HubResult<Vec<String>> {
        if !self.root.is_dir() {
            return Err(HubError::DirectoryNotFound {
                path: self.root.clone(),
            });
        }
        if !self.categories.is_empty() {
            return Ok(self.categories.clone());
        }
        let mut detected: Vec<String> = sorted_entries(&self.root)
            .map_err(|e| HubError::UnreadableRoot {
                path: self.root.clone(),
                message: e.to_string(),
            })?
            .into_iter()
            .filter(|(_, is_dir)| *is_dir)
            .map(|(name, _)| name)
            .filter(|name| is_category_name(name))
            .collect();
        detected.sort();
        debug!("auto-detected categories: {}", detected.join(", "));
        Ok(detected)
    }

    /// Every example directory, sorted by category then name
    pub fn examples(&self) -> HubResult<(Vec<ExampleLocation>, Vec<DiscoveryIssue>)> {
        let mut examples = Vec::new();
        let mut issues = Vec::new();

        for category in self.categories()? {
            let category_dir = self.root.join(&category);
            if !category_dir.is_dir() {
                debug!("category '{}' not present, skipping", category);
                continue;
            }
            let entries = match sorted_entries(&category_dir) {
                Ok(entries) => entries,
                Err(e) => {
                    let issue = DiscoveryIssue::UnreadableDirectory {
                        path: category_dir,
                        message: e.to_string(),
                    };
                    issue.emit();
                    issues.push(issue);
                    continue;
                }
            };
            for (name, is_dir) in entries {
                if !is_dir || is_hidden(&name) {
                    continue;
                }
                let directory = category_dir.join(&name);
                examples.push(ExampleLocation::new(category.clone(), name, directory));
            }
        }

        Ok((examples, issues))
    }

    pub fn scan(&self) -> HubResult<ScanOutcome> {
        let (examples, mut issues) = self.examples()?;
        let mut listings = Vec::with_capacity(examples.len());

        for location in examples {
            match self.list_example(location) {
                Ok(listing) => listings.push(listing),
                Err(issue) => {
                    issue.emit();
                    issues.push(issue);
                }
            }
        }

        debug!("scanned {} example(s) under {}", listings.len(), self.root.display());
        Ok(ScanOutcome { listings, issues })
    }

    fn list_example(&self, location: ExampleLocation) -> Result<ExampleListing, DiscoveryIssue> {
        let unreadable = |path: &Path, e: std::io::Error| DiscoveryIssue::UnreadableDirectory {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let entries = sorted_entries(&location.directory).map_err(|e| unreadable(&location.directory, e))?;
        let mut listing = ExampleListing::new(location);
        let mut has_workers_dir = false;
        for (name, is_dir) in entries {
            if is_dir {
                has_workers_dir |= name == WORKERS_DIR;
            } else {
                listing.files.push(name);
            }
        }

        if has_workers_dir {
            let workers_dir = listing.location.directory.join(WORKERS_DIR);
            let packages = sorted_entries(&workers_dir).map_err(|e| unreadable(&workers_dir, e))?;
            for (name, is_dir) in packages {
                if !is_dir {
                    continue;
                }
                let has_entry = workers_dir.join(&name).join(&self.entry_file).is_file();
                listing = listing.with_package(name, has_entry);
            }
        }

        Ok(listing)
    }
}

/// `(name, is_dir)` for each entry, sorted by name. Non-UTF-8 names are skipped.
fn sorted_entries(dir: &Path) -> std::io::Result<Vec<(String, bool)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        entries.push((name, entry.path().is_dir()));
    }
    entries.sort();
    Ok(entries)
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Two digits and an underscore, e.g. `01_getting_started`
fn is_category_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 3 && bytes[0].is_ascii_digit() && bytes[1].is_ascii_digit() && bytes[2] == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn lists_files_and_worker_packages() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("01_getting_started/hello/gpu_worker.toml"));
        touch(&root.join("01_getting_started/hello/README.md"));
        touch(&root.join("01_getting_started/hello/workers/cpu/mod.toml"));
        fs::create_dir_all(root.join("01_getting_started/hello/workers/empty")).unwrap();
        fs::create_dir_all(root.join("01_getting_started/_shared")).unwrap();

        let scanner = ExampleScanner::new(root, vec!["01_getting_started".into()], "mod.toml");
        let outcome = scanner.scan().unwrap();
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.listings.len(), 1);

        let listing = &outcome.listings[0];
        assert_eq!(listing.location.id(), "01_getting_started/hello");
        assert_eq!(listing.files, vec!["README.md", "gpu_worker.toml"]);
        assert_eq!(
            listing
                .worker_packages
                .iter()
                .map(|p| (p.dir_name.as_str(), p.has_entry))
                .collect::<Vec<_>>(),
            vec![("cpu", true), ("empty", false)]
        );
    }

    #[test]
    fn missing_configured_category_is_skipped() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("01_a/x/gpu_worker.toml"));
        let scanner = ExampleScanner::new(
            dir.path(),
            vec!["01_a".into(), "02_missing".into()],
            "mod.toml",
        );
        let outcome = scanner.scan().unwrap();
        assert_eq!(outcome.listings.len(), 1);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn categories_are_auto_detected_when_unset() {
        let dir = tempdir().unwrap();
        for d in ["02_ml", "01_start", "docs", "3_bad", "scripts"] {
            fs::create_dir_all(dir.path().join(d)).unwrap();
        }
        let scanner = ExampleScanner::new(dir.path(), Vec::new(), "mod.toml");
        assert_eq!(scanner.categories().unwrap(), vec!["01_start", "02_ml"]);
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let scanner = ExampleScanner::new(dir.path().join("nope"), Vec::new(), "mod.toml");
        assert!(matches!(
            scanner.scan(),
            Err(HubError::DirectoryNotFound { .. })
        ));
    }
}

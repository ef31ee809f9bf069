//! Example entities
//!
//! An example is a directory sitting directly under a category directory.
//! Its worker modules are found by file-naming convention.

use std::fmt;
use std::path::PathBuf;

use crate::domain::value_objects::WorkerType;

/// Location of one discovered example directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExampleLocation {
    pub category: String,
    pub name: String,
    pub directory: PathBuf,
}

impl ExampleLocation {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            directory: directory.into(),
        }
    }

    /// `category/name`, the identity used in logs and reports
    pub fn id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

impl fmt::Display for ExampleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// Which naming convention produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiscoveryPattern {
    /// `{worker_type}_worker.{ext}` in the example directory
    SingleFile,
    /// `workers/{worker_type}/{entry}.{ext}`
    DirectoryPackage,
}

impl fmt::Display for DiscoveryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryPattern::SingleFile => f.write_str("single-file"),
            DiscoveryPattern::DirectoryPackage => f.write_str("directory-package"),
        }
    }
}

/// A module that may export a router for one worker type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerCandidate {
    pub example: ExampleLocation,
    pub worker_type: WorkerType,
    /// Absolute path of the module entry file
    pub module_path: PathBuf,
    /// Root-relative, `/`-separated module key (registry lookup key)
    pub module_key: String,
    pub pattern: DiscoveryPattern,
}

impl WorkerCandidate {
    /// Directory whose contents make up the module source
    pub fn source_root(&self) -> PathBuf {
        match self.pattern {
            DiscoveryPattern::SingleFile => self.module_path.clone(),
            DiscoveryPattern::DirectoryPackage => self
                .module_path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| self.module_path.clone()),
        }
    }
}

/// Immediate subdirectory of `workers/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerPackage {
    pub dir_name: String,
    /// Whether the entry-point module exists inside it
    pub has_entry: bool,
}

/// Directory listing of one example, gathered by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleListing {
    pub location: ExampleLocation,
    /// File names directly inside the example directory
    pub files: Vec<String>,
    /// Subdirectories of `workers/`, empty when there is none
    pub worker_packages: Vec<WorkerPackage>,
}

impl ExampleListing {
    pub fn new(location: ExampleLocation) -> Self {
        Self {
            location,
            files: Vec::new(),
            worker_packages: Vec::new(),
        }
    }

    pub fn with_file(mut self, name: impl Into<String>) -> Self {
        self.files.push(name.into());
        self
    }

    pub fn with_package(mut self, dir_name: impl Into<String>, has_entry: bool) -> Self {
        self.worker_packages.push(WorkerPackage {
            dir_name: dir_name.into(),
            has_entry,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_location_orders_by_category_then_name() {
        let a = ExampleLocation::new("01_getting_started", "b", "/x/b");
        let b = ExampleLocation::new("01_getting_started", "a", "/x/a");
        let c = ExampleLocation::new("00_intro", "z", "/x/z");
        let mut v = vec![a.clone(), b.clone(), c.clone()];
        v.sort();
        assert_eq!(v, vec![c, b, a]);
    }

    #[test]
    fn source_root_of_package_is_its_directory() {
        let candidate = WorkerCandidate {
            example: ExampleLocation::new("c", "e", "/r/c/e"),
            worker_type: WorkerType::parse("cpu").unwrap(),
            module_path: PathBuf::from("/r/c/e/workers/cpu/mod.toml"),
            module_key: "c/e/workers/cpu/mod.toml".to_string(),
            pattern: DiscoveryPattern::DirectoryPackage,
        };
        assert_eq!(candidate.source_root(), PathBuf::from("/r/c/e/workers/cpu"));
    }
}

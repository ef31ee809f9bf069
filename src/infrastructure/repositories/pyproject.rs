//! TOML Manifest Repository
//!
//! Reads `pyproject.toml`-style manifests. Dependencies live in
//! `project.dependencies`, or in a top-level `dependencies` array. Unresolved
//! conflicts are recorded in the root manifest under
//! `[tool.workerhub.conflicts.<package>]`.

use std::fs;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use toml::{Table, Value};
use tracing::debug;

use crate::domain::entities::{DependencyEntry, ExampleLocation};
use crate::domain::ports::{
    ConflictRecord, ManifestError, ManifestRepository, RootManifest, RootUpdate,
};
use crate::domain::services::ManifestParser;
use crate::infrastructure::fs::atomic_write;

const TOOL_KEY: &str = "tool";
const TOOL_NAME: &str = "workerhub";
const CONFLICTS_KEY: &str = "conflicts";

pub struct TomlManifestRepository {
    manifest_file: String,
}

impl TomlManifestRepository {
    pub fn new(manifest_file: impl Into<String>) -> Self {
        Self {
            manifest_file: manifest_file.into(),
        }
    }

    pub fn manifest_file(&self) -> &str {
        &self.manifest_file
    }

    fn read_table(path: &Path) -> Result<Table, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::Access {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e: toml::de::Error| ManifestError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// `<manifest>.lock` beside the manifest. It is never removed, so every
    /// writer locks the same inode.
    fn lock_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        path.with_file_name(name)
    }

    fn with_lock<T>(
        path: &Path,
        f: impl FnOnce() -> Result<T, ManifestError>,
    ) -> Result<T, ManifestError> {
        let write_err = |e: std::io::Error| ManifestError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let lock_file = fs::File::create(Self::lock_path(path)).map_err(write_err)?;
        lock_file.lock_exclusive().map_err(write_err)?;

        let result = f();

        let _ = lock_file.unlock();
        result
    }

    fn write_root(&self, path: &Path, manifest: &RootManifest) -> Result<(), ManifestError> {
        let content = self.render_root(path, manifest)?;
        atomic_write(path, content.as_bytes()).map_err(|e| ManifestError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl Default for TomlManifestRepository {
    fn default() -> Self {
        Self::new("pyproject.toml")
    }
}

impl ManifestRepository for TomlManifestRepository {
    fn load_example(
        &self,
        example: &ExampleLocation,
    ) -> Result<Option<Vec<DependencyEntry>>, ManifestError> {
        let path = example.directory.join(&self.manifest_file);
        if !path.is_file() {
            return Ok(None);
        }
        let table = Self::read_table(&path)?;
        let requirements = dependencies(&table, &path)?;
        debug!("{}: {} declared dependencies", example, requirements.len());
        Ok(Some(ManifestParser::parse(
            requirements.iter().map(String::as_str),
            example,
        )))
    }

    fn load_root(&self, path: &Path) -> Result<RootManifest, ManifestError> {
        if !path.is_file() {
            return Err(ManifestError::RootMissing {
                path: path.to_path_buf(),
            });
        }
        let table = Self::read_table(path)?;
        Ok(RootManifest {
            dependencies: dependencies(&table, path)?,
            conflicts: conflicts(&table, path)?,
        })
    }

    fn save_root(&self, path: &Path, manifest: &RootManifest) -> Result<(), ManifestError> {
        if !path.is_file() {
            return Err(ManifestError::RootMissing {
                path: path.to_path_buf(),
            });
        }
        Self::with_lock(path, || self.write_root(path, manifest))
    }

    fn update_root<F>(&self, path: &Path, update: F) -> Result<RootUpdate, ManifestError>
    where
        F: FnOnce(&RootManifest) -> RootManifest,
    {
        if !path.is_file() {
            return Err(ManifestError::RootMissing {
                path: path.to_path_buf(),
            });
        }
        Self::with_lock(path, || {
            let before = self.load_root(path)?;
            let after = update(&before);
            let written = after != before;
            if written {
                self.write_root(path, &after)?;
            }
            Ok(RootUpdate {
                before,
                after,
                written,
            })
        })
    }

    fn render_root(&self, path: &Path, manifest: &RootManifest) -> Result<String, ManifestError> {
        if !path.is_file() {
            return Err(ManifestError::RootMissing {
                path: path.to_path_buf(),
            });
        }
        let mut table = Self::read_table(path)?;
        let deps = Value::Array(
            manifest
                .dependencies
                .iter()
                .cloned()
                .map(Value::String)
                .collect(),
        );

        let top_level = table.contains_key("dependencies")
            && !table
                .get("project")
                .and_then(Value::as_table)
                .is_some_and(|p| p.contains_key("dependencies"));
        if top_level {
            table.insert("dependencies".to_string(), deps);
        } else {
            let project = table
                .entry("project")
                .or_insert_with(|| Value::Table(Table::new()));
            let Some(project) = project.as_table_mut() else {
                return Err(ManifestError::Parse {
                    path: path.to_path_buf(),
                    message: "'project' is not a table".to_string(),
                });
            };
            project.insert("dependencies".to_string(), deps);
        }

        set_conflicts(&mut table, &manifest.conflicts);

        toml::to_string_pretty(&table).map_err(|e| ManifestError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn dependencies(table: &Table, path: &Path) -> Result<Vec<String>, ManifestError> {
    let declared = table
        .get("project")
        .and_then(Value::as_table)
        .and_then(|p| p.get("dependencies"))
        .or_else(|| table.get("dependencies"));
    match declared {
        Some(value) => string_array(value, path, "dependencies"),
        None => Ok(Vec::new()),
    }
}

fn conflicts(table: &Table, path: &Path) -> Result<Vec<ConflictRecord>, ManifestError> {
    let Some(recorded) = table
        .get(TOOL_KEY)
        .and_then(|t| t.get(TOOL_NAME))
        .and_then(|t| t.get(CONFLICTS_KEY))
        .and_then(Value::as_table)
    else {
        return Ok(Vec::new());
    };

    recorded
        .iter()
        .map(|(package, record)| {
            let field = |key: &str| match record.get(key) {
                Some(v) => string_array(v, path, key),
                None => Ok(Vec::new()),
            };
            Ok(ConflictRecord {
                package: package.clone(),
                constraints: field("constraints")?,
                examples: field("examples")?,
            })
        })
        .collect()
}

/// Replace the conflicts table, pruning empty parent tables
fn set_conflicts(table: &mut Table, records: &[ConflictRecord]) {
    if records.is_empty() {
        let Some(tool) = table.get_mut(TOOL_KEY).and_then(Value::as_table_mut) else {
            return;
        };
        if let Some(ours) = tool.get_mut(TOOL_NAME).and_then(Value::as_table_mut) {
            ours.remove(CONFLICTS_KEY);
            if ours.is_empty() {
                tool.remove(TOOL_NAME);
            }
        }
        if tool.is_empty() {
            table.remove(TOOL_KEY);
        }
        return;
    }

    let mut conflicts = Table::new();
    for record in records {
        let mut entry = Table::new();
        entry.insert("constraints".to_string(), strings(&record.constraints));
        entry.insert("examples".to_string(), strings(&record.examples));
        conflicts.insert(record.package.clone(), Value::Table(entry));
    }

    let tool = table
        .entry(TOOL_KEY)
        .or_insert_with(|| Value::Table(Table::new()));
    if let Some(tool) = tool.as_table_mut() {
        let ours = tool
            .entry(TOOL_NAME)
            .or_insert_with(|| Value::Table(Table::new()));
        if let Some(ours) = ours.as_table_mut() {
            ours.insert(CONFLICTS_KEY.to_string(), Value::Table(conflicts));
        }
    }
}

fn strings(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

fn string_array(value: &Value, path: &Path, what: &str) -> Result<Vec<String>, ManifestError> {
    let invalid = || ManifestError::Parse {
        path: path.to_path_buf(),
        message: format!("'{what}' must be an array of strings"),
    };
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|v| v.as_str().map(String::from).ok_or_else(invalid))
        .collect()
}

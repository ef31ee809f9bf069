//! Manifest parser
//!
//! Turns requirement strings such as `torch>=2.1.0` or
//! `Pillow[extra] >= 10 ; python_version < "3.12"` into `DependencyEntry`
//! values. Reading the manifest file itself is the repository's job.

use std::fmt;

use tracing::warn;

use crate::domain::entities::{DependencyEntry, ExampleLocation};

/// Characters that end the package name in a requirement string
const NAME_TERMINATORS: &[char] = &['<', '>', '=', '!', '~', '[', ';', '@', '('];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequirementError {
    #[error("empty requirement")]
    Empty,

    #[error("invalid package name in requirement '{0}'")]
    InvalidName(String),
}

/// A requirement split into its normalised name and constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    /// Everything after the name; the specifier part has no whitespace
    pub constraint: String,
    pub raw: String,
}

impl Requirement {
    pub fn parse(raw: &str) -> Result<Self, RequirementError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RequirementError::Empty);
        }

        let split = trimmed
            .find(|c: char| NAME_TERMINATORS.contains(&c) || c.is_whitespace())
            .unwrap_or(trimmed.len());
        let (name, rest) = trimmed.split_at(split);
        if !is_valid_name(name) {
            return Err(RequirementError::InvalidName(raw.to_string()));
        }

        Ok(Self {
            name: normalize_name(name),
            constraint: normalize_constraint(rest),
            raw: trimmed.to_string(),
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.constraint)
    }
}

/// Lower-case, with runs of `-`, `_` and `.` collapsed to a single `-`
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            out.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    out
}

fn is_valid_name(name: &str) -> bool {
    let starts_and_ends_alnum = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric())
        && name
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_alphanumeric());
    starts_and_ends_alnum
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn normalize_constraint(rest: &str) -> String {
    match rest.split_once(';') {
        Some((specifier, marker)) => {
            let specifier: String = specifier.chars().filter(|c| !c.is_whitespace()).collect();
            format!("{specifier}; {}", marker.trim())
        }
        None => rest.chars().filter(|c| !c.is_whitespace()).collect(),
    }
}

pub struct ManifestParser;

impl ManifestParser {
    /// Entries for every well-formed requirement; malformed ones are logged
    /// and skipped.
    pub fn parse<'a>(
        requirements: impl IntoIterator<Item = &'a str>,
        example: &ExampleLocation,
    ) -> Vec<DependencyEntry> {
        requirements
            .into_iter()
            .filter_map(|raw| match Requirement::parse(raw) {
                Ok(req) => Some(DependencyEntry {
                    package_name: req.name,
                    version_constraint: req.constraint,
                    requirement: req.raw,
                    source_example: example.clone(),
                }),
                Err(e) => {
                    warn!("{}: skipping dependency: {}", example, e);
                    None
                }
            })
            .collect()
    }
}

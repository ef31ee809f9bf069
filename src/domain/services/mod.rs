//! Domain Services
//!
//! Pure logic over domain entities. No file system access; scanners and
//! loaders in the infrastructure layer feed these services.

mod app_composer;
mod dependency_consolidator;
mod manifest_parser;
mod pattern_matcher;
mod route_extractor;

pub use app_composer::{AppComposer, ComposeOutcome};
pub use dependency_consolidator::{DependencyConsolidator, DEFAULT_ESSENTIAL, DEFAULT_TRANSITIVE};
pub use manifest_parser::{normalize_name, ManifestParser, Requirement, RequirementError};
pub use pattern_matcher::{MatchOutcome, PatternMatcher, WORKERS_DIR};
pub use route_extractor::{ExtractedRouter, Extraction, RouteExtractor};

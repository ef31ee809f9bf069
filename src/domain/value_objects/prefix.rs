//! Mount prefix value object

use std::fmt;

use crate::domain::entities::ExampleLocation;

use super::WorkerType;

/// Where an example's router for one worker type is mounted
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MountedPrefix {
    pub example: ExampleLocation,
    pub worker_type: WorkerType,
    pub prefix: String,
}

impl MountedPrefix {
    /// `/{category}/{example}/{worker_type}`, or `/{example}/{worker_type}`
    /// when examples share one flattened namespace.
    pub fn compute(example: &ExampleLocation, worker_type: &WorkerType, flatten: bool) -> Self {
        let prefix = if flatten {
            format!("/{}/{}", example.name, worker_type)
        } else {
            format!("/{}/{}/{}", example.category, example.name, worker_type)
        };
        Self {
            example: example.clone(),
            worker_type: worker_type.clone(),
            prefix,
        }
    }

    /// Full path of a sub-path declared by the example
    pub fn join(&self, sub_path: &str) -> String {
        format!("{}{}", self.prefix, sub_path)
    }
}

impl fmt::Display for MountedPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

/// Documentation tag grouping an example's routes: `"{category} > {name}"`
pub fn doc_tag(example: &ExampleLocation) -> String {
    format!("{} > {}", example.category, example.name)
}

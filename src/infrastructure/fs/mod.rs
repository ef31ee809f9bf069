//! File system access: example scanning, module fingerprints and atomic writes

mod fingerprint;
mod scanner;

use std::io::Write;
use std::path::Path;

pub use fingerprint::{fingerprint, hash_directory, hash_tree};
pub use scanner::{ExampleScanner, ScanOutcome};

/// Write `content` to `path` through a temporary file in the same directory
/// and rename it into place.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn atomic_write_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, "old").unwrap();
        atomic_write(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}

use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Negotiation records of all tests land under `tests/test-workdir`.
fn workdir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/test-workdir")
}

/// Creates empty directory for test. Leftovers from previous run are removed.
pub fn prepare_test_dir(test_name: &str) -> anyhow::Result<PathBuf> {
    // Test names contain module paths and Windows can't handle colons.
    let test_dir = workdir().join(test_name.replace("::", "_"));

    if test_dir.exists() {
        fs::remove_dir_all(&test_dir)
            .with_context(|| format!("Cleaning test directory: {}", test_dir.display()))?;
    }
    fs::create_dir_all(&test_dir)
        .with_context(|| format!("Creating test directory: {}", test_dir.display()))?;
    Ok(test_dir)
}

pub fn save_json<T: Serialize>(dir: &Path, file: &str, value: &T) -> anyhow::Result<PathBuf> {
    let path = dir.join(file);
    let content =
        serde_json::to_string_pretty(value).with_context(|| format!("Serializing {}", file))?;
    fs::write(&path, content).with_context(|| format!("Writing file: {}", path.display()))?;
    Ok(path)
}

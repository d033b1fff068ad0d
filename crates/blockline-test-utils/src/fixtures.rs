//! Locate and read the shared stream fixtures.
//!
//! Fixtures live under `test-fixtures/streams/` at the workspace root so
//! every crate's tests exercise the same inputs.

use std::fs;
use std::path::PathBuf;

/// Path to a fixture under `test-fixtures/streams/`.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/blockline-test-utils -> ../../test-fixtures/streams
    manifest_dir.join("../../test-fixtures/streams").join(name)
}

/// Read a fixture to a string.
pub fn fixture_text(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture at {}: {}", path.display(), e))
}

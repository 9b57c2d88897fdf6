//! Test fixtures for the MedCoT workspace.
//!
//! Provides deterministic fake collaborators, graph builders for the
//! reference scenarios, and a loader for the JSON fixture files under
//! `fixtures/`.

pub mod collaborators;
pub mod graphs;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcot_core::models::FusedGraph;

    #[test]
    fn graph_fixtures_parse() {
        let graph: FusedGraph = load_fixture("graphs/warfarin_aspirin.json");
        assert_eq!(graph.node_count(), 3);
        assert!(fixture_exists("verifier/tuned_linear.json"));
        assert!(!fixture_exists("verifier/absent.json"));
    }
}

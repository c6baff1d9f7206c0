//! Tests for configuration parsing and default paths

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tilecollapse::AlgorithmError;
    use tilecollapse::io::configuration::{
        Configuration, DEFAULT_ADJACENCY, DEFAULT_WEIGHT, default_output_path,
    };
    use tilecollapse::spatial::adjacency::Adjacency;

    // Tests a configuration without adjacency or weights uses the defaults
    // Verified by removing the serde default on the adjacency field
    #[test]
    fn test_defaults_applied() {
        let configuration = Configuration::from_json_str(
            r#"{ "tile_types": [ { "id": "grass", "neighbors": [[0], [0], [0], [0]] } ] }"#,
        )
        .expect("Minimal configuration parses");

        assert_eq!(configuration.adjacency, DEFAULT_ADJACENCY);
        assert_eq!(configuration.adjacency().ok(), Some(Adjacency::Grid2d));
        let catalog = configuration.into_catalog().expect("Catalog builds");
        assert_eq!(
            catalog.tile_type(0).map(|tile| tile.weight()),
            Some(DEFAULT_WEIGHT)
        );
    }

    // Tests explicit adjacency selectors are accepted or rejected
    // Verified by parsing the selector during deserialization
    #[test]
    fn test_adjacency_selector() {
        let parsed = Configuration::from_json_str(
            r#"{ "adjacency": "adjacency_2d", "tile_types": [] }"#,
        )
        .expect("Known selector parses");
        assert_eq!(parsed.adjacency().ok(), Some(Adjacency::Grid2d));

        for selector in ["3d", "hex"] {
            let json = format!(r#"{{ "adjacency": "{selector}", "tile_types": [] }}"#);
            let configuration = Configuration::from_json_str(&json).expect("JSON parses");
            let error = configuration
                .into_catalog()
                .expect_err("Only the planar grid is supported");
            assert!(matches!(
                error,
                AlgorithmError::UnsupportedAdjacency { selector: ref name } if name == selector
            ));
        }
    }

    // Tests malformed JSON and invalid tables are reported
    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            Configuration::from_json_str("{ not json"),
            Err(AlgorithmError::Serialization { .. })
        ));

        let empty = Configuration::from_json_str(r#"{ "tile_types": [] }"#)
            .expect("Empty table parses");
        assert!(matches!(
            empty.into_catalog(),
            Err(AlgorithmError::InvalidConfiguration { .. })
        ));
    }

    // Tests reading from disk attaches the path to errors
    #[test]
    fn test_from_path() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let good = dir.path().join("rules.json");
        fs::write(
            &good,
            r#"{ "tile_types": [{ "id": "a", "weight": 4, "neighbors": [[0], [0], [0], [0]] }] }"#,
        )
        .expect("Failed to write configuration");
        let configuration = Configuration::from_path(&good).expect("Configuration loads");
        assert_eq!(configuration.tile_types.len(), 1);

        let bad = dir.path().join("broken.json");
        fs::write(&bad, "[1, 2").expect("Failed to write configuration");
        assert!(matches!(
            Configuration::from_path(&bad),
            Err(AlgorithmError::Serialization { path, .. }) if path == bad
        ));

        assert!(matches!(
            Configuration::from_path(&dir.path().join("absent.json")),
            Err(AlgorithmError::FileSystem { .. })
        ));
    }

    // Tests the default output path sits next to the configuration
    // Verified by dropping the parent directory
    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("rules/coast.json")),
            PathBuf::from("rules/coast_result.json")
        );
        assert_eq!(
            default_output_path(Path::new("coast.json")),
            PathBuf::from("coast_result.json")
        );
    }
}

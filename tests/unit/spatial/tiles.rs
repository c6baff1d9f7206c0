//! Tests for catalog validation, rule lookup and weighted picks

#[cfg(test)]
mod tests {
    use tilecollapse::AlgorithmError;
    use tilecollapse::algorithm::selection::RandomSelector;
    use tilecollapse::spatial::adjacency::{Adjacency, DOWN, UP};
    use tilecollapse::spatial::tiles::{AsymmetricRule, Catalog, TileType};

    fn uniform(id: &str, weight: u32, allowed: &[usize]) -> TileType {
        TileType::new(id, weight, vec![allowed.to_vec(); 4])
    }

    fn permissive(weights: &[u32]) -> Catalog {
        let all: Vec<usize> = (0..weights.len()).collect();
        let tile_types = weights
            .iter()
            .enumerate()
            .map(|(index, &weight)| uniform(&format!("t{index}"), weight, &all))
            .collect();
        Catalog::new(tile_types, Adjacency::Grid2d).expect("Permissive catalog is valid")
    }

    // Tests a valid table builds and answers rule lookups
    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::new(
            vec![uniform("sea", 2, &[0, 1]), uniform("land", 1, &[0, 1])],
            Adjacency::Grid2d,
        )
        .expect("Valid catalog");

        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.index_of("land"), Some(1));
        assert_eq!(catalog.index_of("lava"), None);
        assert_eq!(catalog.id_of(0), Some("sea"));
        assert_eq!(catalog.ids(), vec!["sea".to_string(), "land".to_string()]);
        assert!(catalog.allows(0, UP, 1));
        assert_eq!(
            catalog.legal_neighbors(1, DOWN).map(|set| set.to_vec()),
            Some(vec![0, 1])
        );
        assert!(catalog.legal_neighbors(2, UP).is_none());
    }

    // Tests every malformed table is rejected
    // Verified by removing each validation check in turn
    #[test]
    fn test_catalog_validation() {
        assert!(matches!(
            Catalog::new(Vec::new(), Adjacency::Grid2d),
            Err(AlgorithmError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Catalog::new(
                vec![uniform("a", 1, &[0, 1]), uniform("a", 1, &[0, 1])],
                Adjacency::Grid2d
            ),
            Err(AlgorithmError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Catalog::new(vec![uniform("a", 0, &[0])], Adjacency::Grid2d),
            Err(AlgorithmError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Catalog::new(
                vec![TileType::new("a", 1, vec![vec![0]; 3])],
                Adjacency::Grid2d
            ),
            Err(AlgorithmError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            Catalog::new(vec![uniform("a", 1, &[0, 4])], Adjacency::Grid2d),
            Err(AlgorithmError::InvalidTileIndex {
                index: 4,
                max_tiles: 1
            })
        ));
    }

    // Tests one-way rules are reported and mirrored rules are not
    // Verified by checking the same direction instead of the opposite one
    #[test]
    fn test_asymmetric_rules() {
        let symmetric = permissive(&[1, 1, 1]);
        assert!(symmetric.asymmetric_rules().is_empty());

        // "a" allows "b" above it, "b" does not allow "a" below it
        let catalog = Catalog::new(
            vec![
                TileType::new("a", 1, vec![vec![0, 1], vec![0], vec![0], vec![0]]),
                TileType::new("b", 1, vec![vec![1], vec![1], vec![1], vec![1]]),
            ],
            Adjacency::Grid2d,
        )
        .expect("Asymmetric rules are accepted");

        assert_eq!(
            catalog.asymmetric_rules(),
            vec![AsymmetricRule {
                tile: 0,
                direction: UP,
                neighbor: 1
            }]
        );
    }

    // Tests a one-way rule is dropped from the legal neighbor sets
    // Verified by keeping declared rules as they are
    #[test]
    fn test_one_way_rules_are_not_legal() {
        let catalog = Catalog::new(
            vec![
                TileType::new("a", 1, vec![vec![0, 1], vec![0], vec![0], vec![0]]),
                TileType::new("b", 1, vec![vec![1], vec![1], vec![1], vec![1]]),
            ],
            Adjacency::Grid2d,
        )
        .expect("Asymmetric rules are accepted");

        assert!(!catalog.allows(0, UP, 1));
        assert!(!catalog.allows(1, DOWN, 0));
        assert_eq!(
            catalog.legal_neighbors(0, UP).map(|set| set.to_vec()),
            Some(vec![0])
        );
        assert_eq!(
            catalog
                .tile_type(0)
                .and_then(|tile| tile.neighbors().first().cloned()),
            Some(vec![0, 1])
        );
    }

    // Tests weight defaults to 1 when omitted from JSON
    #[test]
    fn test_tile_type_default_weight() {
        let tile: TileType =
            serde_json::from_str(r#"{"id": "grass", "neighbors": [[0], [0], [0], [0]]}"#)
                .expect("Tile type without weight parses");
        assert_eq!(tile.weight(), 1);
        assert_eq!(tile.id(), "grass");
        assert_eq!(tile.neighbors().len(), 4);
    }

    // Tests a single candidate is always returned
    #[test]
    fn test_weighted_pick_single_candidate() {
        let catalog = permissive(&[5, 1, 1]);
        let mut selector = RandomSelector::new(3);
        for _ in 0..100 {
            let pick = catalog
                .weighted_pick(&[2], &mut selector)
                .expect("Pick from one candidate");
            assert_eq!(pick, 2);
        }
    }

    // Tests picks only return listed candidates
    // Verified by drawing over the whole catalog
    #[test]
    fn test_weighted_pick_respects_candidates() {
        let catalog = permissive(&[100, 1, 1, 100]);
        let mut selector = RandomSelector::new(9);
        for _ in 0..1000 {
            let pick = catalog
                .weighted_pick(&[1, 2], &mut selector)
                .expect("Pick from two candidates");
            assert!(pick == 1 || pick == 2);
        }
    }

    // Tests pick frequencies follow declared weights
    // Verified by returning a uniformly random candidate
    #[test]
    fn test_weighted_pick_distribution() {
        let catalog = permissive(&[1, 2, 7]);
        let mut selector = RandomSelector::new(2024);
        let mut counts = [0_usize; 3];
        let draws = 100_000;

        for _ in 0..draws {
            let pick = catalog
                .weighted_pick(&[0, 1, 2], &mut selector)
                .expect("Pick from the full catalog");
            if let Some(count) = counts.get_mut(pick) {
                *count += 1;
            }
        }

        for (count, expected) in counts.iter().zip([0.1, 0.2, 0.7]) {
            let frequency = *count as f64 / draws as f64;
            assert!(
                (frequency - expected).abs() < 0.01,
                "Frequency {frequency} too far from {expected}"
            );
        }
    }

    // Tests empty and unknown candidates are errors
    #[test]
    fn test_weighted_pick_errors() {
        let catalog = permissive(&[1, 1]);
        let mut selector = RandomSelector::new(0);
        assert!(matches!(
            catalog.weighted_pick(&[], &mut selector),
            Err(AlgorithmError::EmptyCandidates)
        ));
        assert!(matches!(
            catalog.weighted_pick(&[0, 5], &mut selector),
            Err(AlgorithmError::InvalidTileIndex { index: 5, .. })
        ));
    }
}

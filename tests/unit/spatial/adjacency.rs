//! Tests for the planar neighbor topology and adjacency selectors

#[cfg(test)]
mod tests {
    use tilecollapse::AlgorithmError;
    use tilecollapse::io::configuration::DEFAULT_ADJACENCY;
    use tilecollapse::spatial::adjacency::{Adjacency, DOWN, LEFT, RIGHT, UP};
    use tilecollapse::spatial::dimensions::{Dimensions, Position};

    // Tests direction indices between orthogonal neighbors
    // Verified by swapping the up and down results
    #[test]
    fn test_direction_index() {
        let adjacency = Adjacency::Grid2d;
        let center = Position::planar(1, 1);

        let direction = |to| adjacency.direction_index(center, to).ok();
        assert_eq!(direction(Position::planar(1, 2)), Some(UP));
        assert_eq!(direction(Position::planar(2, 1)), Some(RIGHT));
        assert_eq!(direction(Position::planar(1, 0)), Some(DOWN));
        assert_eq!(direction(Position::planar(0, 1)), Some(LEFT));
    }

    // Tests non-neighbors are rejected
    // Verified by accepting any pair on the same row
    #[test]
    fn test_direction_index_rejects_non_neighbors() {
        let adjacency = Adjacency::Grid2d;
        let origin = Position::planar(1, 1);

        for to in [
            Position::planar(1, 1),
            Position::planar(2, 2),
            Position::planar(3, 1),
            Position::new(1, 1, 1),
        ] {
            assert!(matches!(
                adjacency.direction_index(origin, to),
                Err(AlgorithmError::InvalidAdjacency { .. })
            ));
        }
    }

    // Tests opposite directions pair up
    #[test]
    fn test_opposite() {
        let adjacency = Adjacency::Grid2d;
        assert_eq!(adjacency.opposite(UP), DOWN);
        assert_eq!(adjacency.opposite(DOWN), UP);
        assert_eq!(adjacency.opposite(LEFT), RIGHT);
        assert_eq!(adjacency.opposite(RIGHT), LEFT);
        assert_eq!(adjacency.direction_count(), 4);
    }

    // Tests interior neighbors come in left, right, down, up order
    // Verified by reordering the neighbor pushes
    #[test]
    fn test_neighbor_order() {
        let neighbors =
            Adjacency::Grid2d.neighbors(Position::planar(1, 1), Dimensions::planar(3, 3));
        assert_eq!(
            neighbors,
            vec![
                Position::planar(0, 1),
                Position::planar(2, 1),
                Position::planar(1, 0),
                Position::planar(1, 2),
            ]
        );
    }

    // Tests neighbors never leave the grid or cross layers
    #[test]
    fn test_neighbors_at_edges() {
        let dimensions = Dimensions::new(3, 2, 2);
        let edge = Adjacency::Grid2d.neighbors(Position::new(0, 0, 1), dimensions);
        assert_eq!(edge, vec![Position::new(1, 0, 1), Position::new(0, 1, 1)]);

        let single = Adjacency::Grid2d.neighbors(Position::planar(0, 0), Dimensions::planar(1, 1));
        assert!(single.is_empty());
    }

    // Tests accepted and rejected selector spellings
    // Verified by mapping unknown selectors to the default topology
    #[test]
    fn test_selector_parsing() {
        for selector in ["2d", "2D", "adjacency_2d", "grid2d"] {
            assert_eq!(selector.parse::<Adjacency>().ok(), Some(Adjacency::Grid2d));
        }
        for selector in ["3d", "hex", "adjacency_hex", ""] {
            assert!(matches!(
                selector.parse::<Adjacency>(),
                Err(AlgorithmError::UnsupportedAdjacency { .. })
            ));
        }
        assert_eq!(
            DEFAULT_ADJACENCY.parse::<Adjacency>().ok(),
            Some(Adjacency::Grid2d)
        );
    }

    // Tests the displayed name is an accepted selector
    #[test]
    fn test_display_selector() {
        assert_eq!(Adjacency::Grid2d.to_string(), "2d");
        assert_eq!(
            Adjacency::Grid2d.to_string().parse::<Adjacency>().ok(),
            Some(Adjacency::Grid2d)
        );
    }
}

//! Tests for grid extents and flat cell indexing

#[cfg(test)]
mod tests {
    use tilecollapse::spatial::dimensions::{Dimensions, Position};

    // Tests flat index follows z * width * height + y * width + x
    // Verified by swapping the x and y terms of the index
    #[test]
    fn test_index_order() {
        let dimensions = Dimensions::new(4, 3, 2);
        assert_eq!(dimensions.index(Position::new(0, 0, 0)), Some(0));
        assert_eq!(dimensions.index(Position::new(3, 0, 0)), Some(3));
        assert_eq!(dimensions.index(Position::new(0, 1, 0)), Some(4));
        assert_eq!(dimensions.index(Position::new(2, 2, 1)), Some(22));
    }

    // Tests position is the inverse of index for every cell
    #[test]
    fn test_position_inverts_index() {
        let dimensions = Dimensions::new(5, 3, 2);
        let count = dimensions
            .cell_count()
            .expect("Small grid has a cell count");
        for index in 0..count {
            let position = dimensions
                .position(index)
                .expect("Index inside the grid has a position");
            assert_eq!(dimensions.index(position), Some(index));
        }
        assert_eq!(dimensions.position(count), None);
    }

    // Tests out-of-bounds positions have no index
    #[test]
    fn test_out_of_bounds() {
        let dimensions = Dimensions::planar(2, 2);
        assert!(dimensions.contains(Position::planar(1, 1)));
        assert!(!dimensions.contains(Position::planar(2, 0)));
        assert!(!dimensions.contains(Position::new(0, 0, 1)));
        assert_eq!(dimensions.index(Position::planar(0, 2)), None);
    }

    // Tests cell counting including zero extents and overflow
    // Verified by using wrapping multiplication
    #[test]
    fn test_cell_count() {
        assert_eq!(Dimensions::planar(3, 4).cell_count(), Some(12));
        assert_eq!(Dimensions::new(2, 2, 3).cell_count(), Some(12));
        assert!(Dimensions::new(0, 4, 1).is_empty());
        assert_eq!(Dimensions::new(usize::MAX, 2, 1).cell_count(), None);
    }

    // Tests an empty grid maps no index to a position
    #[test]
    fn test_empty_grid_has_no_positions() {
        assert_eq!(Dimensions::new(0, 3, 1).position(0), None);
    }

    // Tests display formats
    #[test]
    fn test_display() {
        assert_eq!(Dimensions::new(8, 6, 1).to_string(), "8x6x1");
        assert_eq!(Position::new(1, 2, 3).to_string(), "(1, 2, 3)");
    }
}

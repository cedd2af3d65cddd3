//! Step and ray direction tables, as `(d_row, d_col)` pairs.

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// The king steps one square in any of the eight directions.
pub const KING_STEPS: [(i8, i8); 8] = ALL_DIRECTIONS;

#[cfg(test)]
mod tests {
    use super::{ALL_DIRECTIONS, KNIGHT_JUMPS};
    use std::collections::HashSet;

    #[test]
    fn tables_have_no_duplicate_offsets() {
        let all: HashSet<_> = ALL_DIRECTIONS.iter().collect();
        assert_eq!(all.len(), 8);
        let jumps: HashSet<_> = KNIGHT_JUMPS.iter().collect();
        assert_eq!(jumps.len(), 8);
        assert!(KNIGHT_JUMPS
            .iter()
            .all(|(r, c)| r.abs() + c.abs() == 3 && *r != 0 && *c != 0));
    }
}

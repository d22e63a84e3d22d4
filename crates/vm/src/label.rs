//! Diagonal label search.
//!
//! A label is a run of cells spelling the needle along the IP's current
//! direction. Matches are ordered as if the grid were rotated so that
//! the direction points north-east: by anti-diagonal first, then by
//! position along the anti-diagonal.

use alice_common::{Direction, Grid, Vector2D};

/// Ordering key of a match starting at `start` for direction vector `v`.
/// For north-east this is `(x + y, x − y)`.
fn scan_key(start: Vector2D, v: Vector2D) -> (i64, i64) {
    (v.cross(start), start.dot(v))
}

/// Start positions of every occurrence of `needle` along `dir`, in scan
/// order. An empty needle never matches.
pub fn find_labels(grid: &Grid, needle: &[i64], dir: Direction) -> Vec<Vector2D> {
    if needle.is_empty() {
        return Vec::new();
    }
    let v = dir.vec();
    let (min, max) = (grid.min(), grid.max());

    let mut matches = Vec::new();
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let start = Vector2D::new(x, y);
            let found = needle
                .iter()
                .enumerate()
                .all(|(i, &cell)| grid.get(start + v * i as i64) == cell);
            if found {
                matches.push(start);
            }
        }
    }
    matches.sort_by_key(|&start| scan_key(start, v));
    matches
}

/// Position of the last cell of the first occurrence of `needle`.
pub fn find_label_end(grid: &Grid, needle: &[i64], dir: Direction) -> Option<Vector2D> {
    let start = *find_labels(grid, needle, dir).first()?;
    Some(start + dir.vec() * (needle.len() as i64 - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alice_common::ALL_DIRECTIONS;

    fn code_points(s: &str) -> Vec<i64> {
        s.chars().map(|c| c as i64).collect()
    }

    /// A blank 9×9 grid with `label` written from `start` along `dir`.
    fn grid_with_label(label: &str, start: Vector2D, dir: Direction) -> Grid {
        let mut grid = Grid::parse(&vec![" ".repeat(9); 9].join("\n"));
        for (i, c) in label.chars().enumerate() {
            grid.set(start + dir.vec() * i as i64, c as i64);
        }
        grid
    }

    #[test]
    fn finds_label_in_every_direction() {
        let start = Vector2D::new(4, 4);
        for dir in ALL_DIRECTIONS {
            let grid = grid_with_label("LOOP", start, dir);
            let found = find_labels(&grid, &code_points("LOOP"), dir);
            assert_eq!(found, vec![start], "direction {dir:?}");
            assert_eq!(
                find_label_end(&grid, &code_points("LOOP"), dir),
                Some(start + dir.vec() * 3),
                "direction {dir:?}"
            );
        }
    }

    #[test]
    fn label_is_directional() {
        let grid = grid_with_label("LOOP", Vector2D::new(1, 1), Direction::East);
        assert!(find_labels(&grid, &code_points("LOOP"), Direction::West).is_empty());
        assert_eq!(
            find_labels(&grid, &code_points("POOL"), Direction::West),
            vec![Vector2D::new(4, 1)]
        );
    }

    #[test]
    fn north_east_scans_anti_diagonals() {
        // "a" at (2,0) lies on anti-diagonal 2, "a" at (0,1) on 1.
        let grid = Grid::parse("  a\na  ");
        assert_eq!(
            find_labels(&grid, &code_points("a"), Direction::NorthEast),
            vec![Vector2D::new(0, 1), Vector2D::new(2, 0)]
        );
    }

    #[test]
    fn same_anti_diagonal_orders_by_x_minus_y() {
        let grid = Grid::parse("  x\n x \nx  ");
        assert_eq!(
            find_labels(&grid, &code_points("x"), Direction::NorthEast),
            vec![Vector2D::new(0, 2), Vector2D::new(1, 1), Vector2D::new(2, 0)]
        );
    }

    #[test]
    fn east_scans_row_major() {
        let grid = Grid::parse("b a\nab ");
        assert_eq!(
            find_labels(&grid, &code_points("a"), Direction::East),
            vec![Vector2D::new(2, 0), Vector2D::new(0, 1)]
        );
    }

    #[test]
    fn empty_needle_never_matches() {
        let grid = Grid::parse("abc");
        assert!(find_labels(&grid, &[], Direction::East).is_empty());
        assert_eq!(find_label_end(&grid, &[], Direction::East), None);
    }

    #[test]
    fn partial_label_at_edge_does_not_match() {
        let grid = Grid::parse("xyLO");
        assert!(find_labels(&grid, &code_points("LOOP"), Direction::East).is_empty());
    }
}

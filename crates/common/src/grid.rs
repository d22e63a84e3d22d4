//! The self-modifying program grid.
//!
//! Cells hold Unicode code points (or arbitrary integers written by the
//! program). Reads outside the current bounds yield [`OUT_OF_BOUNDS`].
//! Storage is a dense row-major array plus an origin offset: growing to the
//! west or north bumps the offset so that every program coordinate that was
//! valid before stays valid.

use crate::vector::Vector2D;

/// Value of every cell outside the grid (and of erased cells).
pub const OUT_OF_BOUNDS: i64 = -1;

/// Cell used to pad short source lines.
pub const PADDING: i64 = ' ' as i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row-major cells; every row has the same length.
    cells: Vec<Vec<i64>>,
    /// Added to a program coordinate to get the storage coordinate.
    offset: Vector2D,
}

impl Grid {
    /// Build a grid from program source.
    ///
    /// Lines are split on `\n` (a trailing `\r` is dropped), trailing empty
    /// lines are discarded and short lines are padded with spaces.
    pub fn parse(src: &str) -> Self {
        let mut lines: Vec<&str> = src
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let mut cells: Vec<Vec<i64>> = lines
            .iter()
            .map(|line| line.chars().map(|c| c as i64).collect())
            .collect();
        let width = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        if cells.is_empty() {
            cells.push(Vec::new());
        }
        for row in &mut cells {
            row.resize(width, PADDING);
        }

        Self {
            cells,
            offset: Vector2D::ZERO,
        }
    }

    pub fn width(&self) -> i64 {
        self.cells.first().map_or(0, Vec::len) as i64
    }

    pub fn height(&self) -> i64 {
        self.cells.len() as i64
    }

    /// Program coordinate of the top-left cell.
    pub fn min(&self) -> Vector2D {
        -self.offset
    }

    /// Program coordinate of the bottom-right cell.
    pub fn max(&self) -> Vector2D {
        Vector2D::new(self.width() - 1, self.height() - 1) - self.offset
    }

    /// Storage indices of `pos`, or `None` when it lies outside the grid.
    fn index(&self, pos: Vector2D) -> Option<(usize, usize)> {
        let x = usize::try_from(pos.x.checked_add(self.offset.x)?).ok()?;
        let y = usize::try_from(pos.y.checked_add(self.offset.y)?).ok()?;
        (x < self.width() as usize && y < self.cells.len()).then_some((x, y))
    }

    pub fn contains(&self, pos: Vector2D) -> bool {
        self.index(pos).is_some()
    }

    /// Whether `pos` lies on the outermost ring of the grid.
    pub fn on_boundary(&self, pos: Vector2D) -> bool {
        let (min, max) = (self.min(), self.max());
        self.contains(pos)
            && (pos.x == min.x || pos.y == min.y || pos.x == max.x || pos.y == max.y)
    }

    /// Read a cell. Anything outside the bounds is [`OUT_OF_BOUNDS`].
    pub fn get(&self, pos: Vector2D) -> i64 {
        self.index(pos).map_or(OUT_OF_BOUNDS, |(x, y)| self.cells[y][x])
    }

    /// Width and height the grid would have after growing to cover `pos`.
    ///
    /// `None` when the grown grid could not keep every coordinate, and the
    /// origin offset, inside `i64`.
    pub fn size_covering(&self, pos: Vector2D) -> Option<(i64, i64)> {
        let (min, max) = (self.min(), self.max());
        let span = |lo: i64, hi: i64, p: i64| {
            let (lo, hi) = (lo.min(p), hi.max(p));
            lo.checked_neg()?;
            i64::try_from(i128::from(hi) - i128::from(lo) + 1).ok()
        };
        Some((span(min.x, max.x, pos.x)?, span(min.y, max.y, pos.y)?))
    }

    /// Write a cell, growing or shrinking the grid as needed.
    ///
    /// A write that [`Grid::size_covering`] rejects is dropped. Callers
    /// that cap the grid size check it first.
    pub fn set(&mut self, pos: Vector2D, value: i64) {
        if value == OUT_OF_BOUNDS {
            let Some((x, y)) = self.index(pos) else {
                return;
            };
            let boundary = self.on_boundary(pos);
            self.cells[y][x] = value;
            if boundary {
                self.shrink();
            }
            return;
        }

        if self.size_covering(pos).is_none() {
            return;
        }
        self.grow_to(pos);
        if let Some((x, y)) = self.index(pos) {
            self.cells[y][x] = value;
        }
    }

    /// Iterate over the rows in storage order.
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Extend the storage so that `pos` is inside it. `pos` must pass
    /// [`Grid::size_covering`].
    fn grow_to(&mut self, pos: Vector2D) {
        let s = pos + self.offset;

        if s.x < 0 {
            let extra = (-s.x) as usize;
            for row in &mut self.cells {
                row.splice(0..0, std::iter::repeat(OUT_OF_BOUNDS).take(extra));
            }
            self.offset.x += extra as i64;
        } else if s.x >= self.width() {
            let new_width = (s.x + 1) as usize;
            for row in &mut self.cells {
                row.resize(new_width, OUT_OF_BOUNDS);
            }
        }

        let width = self.width() as usize;
        if s.y < 0 {
            let extra = (-s.y) as usize;
            self.cells
                .splice(0..0, std::iter::repeat(vec![OUT_OF_BOUNDS; width]).take(extra));
            self.offset.y += extra as i64;
        } else if s.y >= self.height() {
            self.cells.resize((s.y + 1) as usize, vec![OUT_OF_BOUNDS; width]);
        }
    }

    /// Trim all-sentinel border rows and columns until none are left.
    /// Neither dimension ever drops below one cell.
    fn shrink(&mut self) {
        loop {
            let mut trimmed = false;

            if self.height() > 1 && is_blank(&self.cells[0]) {
                self.cells.remove(0);
                self.offset.y -= 1;
                trimmed = true;
            }
            if self.height() > 1 && self.cells.last().is_some_and(|row| is_blank(row)) {
                self.cells.pop();
                trimmed = true;
            }
            if self.width() > 1 && self.cells.iter().all(|row| row[0] == OUT_OF_BOUNDS) {
                for row in &mut self.cells {
                    row.remove(0);
                }
                self.offset.x -= 1;
                trimmed = true;
            }
            if self.width() > 1
                && self
                    .cells
                    .iter()
                    .all(|row| row.last() == Some(&OUT_OF_BOUNDS))
            {
                for row in &mut self.cells {
                    row.pop();
                }
                trimmed = true;
            }

            if !trimmed {
                break;
            }
        }
    }
}

fn is_blank(row: &[i64]) -> bool {
    row.iter().all(|&cell| cell == OUT_OF_BOUNDS)
}

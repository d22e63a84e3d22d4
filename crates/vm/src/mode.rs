//! The two execution modes and the movement engine.
//!
//! Cardinal mode travels orthogonally and wraps around the grid edges.
//! Ordinal mode travels diagonally and bounces off the grid edges as if
//! they were walls. Mirrors swap between the two.

use crate::machine::VM;
use crate::opcode::Command;
use alice_common::{Mirror, Vector2D};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Integer mode.
    Cardinal,
    /// String mode.
    Ordinal,
}

impl Mode {
    pub fn other(self) -> Mode {
        match self {
            Mode::Cardinal => Mode::Ordinal,
            Mode::Ordinal => Mode::Cardinal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Cardinal => "Cardinal",
            Mode::Ordinal => "Ordinal",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap `v` into `[lo, hi]`.
fn wrap(v: i128, lo: i64, hi: i64) -> i64 {
    let (lo, hi) = (i128::from(lo), i128::from(hi));
    // The result lies in `lo..=hi`, so it fits.
    (lo + (v - lo).rem_euclid(hi - lo + 1)) as i64
}

/// `pos + step`, widened so that a jump target near the edge of the
/// coordinate space cannot overflow.
fn step_wide(pos: Vector2D, step: Vector2D) -> (i128, i128) {
    (
        i128::from(pos.x) + i128::from(step.x),
        i128::from(pos.y) + i128::from(step.y),
    )
}

impl<'a> VM<'a> {
    /// Wrap a position back into the grid on both axes.
    fn wrap_into_grid(&self, (x, y): (i128, i128)) -> Vector2D {
        let (min, max) = (self.grid.min(), self.grid.max());
        Vector2D::new(wrap(x, min.x, max.x), wrap(y, min.y, max.y))
    }

    /// Advance the IP by one cell without looking at what is there.
    pub(crate) fn raw_move(&mut self) {
        match self.mode {
            Mode::Cardinal => {
                self.ip = self.wrap_into_grid(step_wide(self.ip, self.dir.vec()));
            }
            Mode::Ordinal => {
                let (min, max) = (self.grid.min(), self.grid.max());
                let (width, height) = (self.grid.width(), self.grid.height());
                let (x, y) = step_wide(self.ip, self.dir.vec());
                if width > 1 && (x < i128::from(min.x) || x > i128::from(max.x)) {
                    self.dir = self.dir.reflect(Mirror::Pillar);
                }
                if height > 1 && (y < i128::from(min.y) || y > i128::from(max.y)) {
                    self.dir = self.dir.reflect(Mirror::Floor);
                }

                let mut step = self.dir.vec();
                if width == 1 {
                    step.x = 0;
                }
                if height == 1 {
                    step.y = 0;
                }
                // Still outside after a jump or a shrink: wrap back in.
                self.ip = self.wrap_into_grid(step_wide(self.ip, step));
            }
        }
    }

    /// One raw step plus terrain handling. Returns whether the IP landed
    /// on something the driver has to execute: a command of the current
    /// mode or, while capturing a string, any non-terrain cell.
    pub(crate) fn advance(&mut self) -> bool {
        self.raw_move();
        let cell = self.current_cell();
        if let Some(mirror) = Mirror::from_cell(cell) {
            self.dir = self.dir.reflect(mirror);
            if mirror.toggles_mode() {
                self.mode = self.mode.other();
            }
            return false;
        }
        self.string_mode || Command::decode(cell, self.mode).is_some()
    }

    /// Shift the IP sideways by half of `reverse + turned`, where `turned`
    /// is the direction rotated by 90° towards the side of the strafe.
    pub(crate) fn strafe(&mut self, left: bool) {
        let turned = if left {
            self.dir.left90()
        } else {
            self.dir.right90()
        };
        self.ip += (self.dir.reverse().vec() + turned.vec()).half();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use alice_common::{Direction, Grid, ALL_DIRECTIONS};

    fn with_vm(src: &str, f: impl FnOnce(&mut VM)) {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = VM::new(Grid::parse(src), &mut input, &mut output, Config::default());
        f(&mut vm);
    }

    /// Step from the centre of a 3×3 grid onto the cell to the east.
    fn onto(glyph: char, mode: Mode) -> (Mode, Direction) {
        let src = format!("   \n  {glyph}\n   ");
        let mut result = None;
        with_vm(&src, |vm| {
            vm.ip = Vector2D::new(1, 1);
            vm.dir = Direction::East;
            vm.mode = mode;
            assert!(!vm.advance());
            result = Some((vm.mode, vm.dir));
        });
        result.unwrap()
    }

    #[test]
    fn mode_names() {
        assert_eq!(Mode::Cardinal.to_string(), "Cardinal");
        assert_eq!(Mode::Ordinal.other(), Mode::Cardinal);
    }

    #[test]
    fn mirrors_toggle_mode_walls_do_not() {
        for mode in [Mode::Cardinal, Mode::Ordinal] {
            assert_eq!(onto('/', mode), (mode.other(), Direction::SouthEast));
            assert_eq!(onto('\\', mode), (mode.other(), Direction::NorthEast));
            assert_eq!(onto('_', mode), (mode, Direction::East));
            assert_eq!(onto('|', mode), (mode, Direction::West));
        }
    }

    #[test]
    fn cardinal_wraps() {
        with_vm("abc\ndef", |vm| {
            vm.ip = Vector2D::new(2, 1);
            vm.raw_move();
            assert_eq!(vm.ip, Vector2D::new(0, 1));
            vm.dir = Direction::South;
            vm.raw_move();
            assert_eq!(vm.ip, Vector2D::new(0, 0));
        });
    }

    #[test]
    fn ordinal_bounces_off_edges() {
        with_vm("abcd\nefgh\nijkl", |vm| {
            vm.mode = Mode::Ordinal;
            vm.ip = Vector2D::new(1, 1);
            vm.dir = Direction::NorthEast;
            vm.raw_move();
            assert_eq!(vm.ip, Vector2D::new(2, 0));
            // Top edge: NE becomes SE.
            vm.raw_move();
            assert_eq!(vm.dir, Direction::SouthEast);
            assert_eq!(vm.ip, Vector2D::new(3, 1));
            // Right edge: SE becomes SW.
            vm.raw_move();
            assert_eq!(vm.dir, Direction::SouthWest);
            assert_eq!(vm.ip, Vector2D::new(2, 2));
        });
    }

    #[test]
    fn ordinal_bounces_in_corners() {
        with_vm("abc\ndef\nghi", |vm| {
            vm.mode = Mode::Ordinal;
            vm.ip = Vector2D::new(2, 0);
            vm.dir = Direction::NorthEast;
            vm.raw_move();
            assert_eq!(vm.dir, Direction::SouthWest);
            assert_eq!(vm.ip, Vector2D::new(1, 1));
        });
    }

    #[test]
    fn ordinal_on_a_single_row_moves_horizontally() {
        with_vm("abc", |vm| {
            vm.mode = Mode::Ordinal;
            vm.ip = Vector2D::new(0, 0);
            vm.dir = Direction::NorthEast;
            vm.raw_move();
            assert_eq!(vm.ip, Vector2D::new(1, 0));
            vm.raw_move();
            assert_eq!(vm.ip, Vector2D::new(2, 0));
            vm.raw_move();
            assert_eq!(vm.dir, Direction::NorthWest);
            assert_eq!(vm.ip, Vector2D::new(1, 0));
        });
    }

    #[test]
    fn ordinal_outside_the_grid_wraps_back_in() {
        with_vm("abc\ndef", |vm| {
            vm.mode = Mode::Ordinal;
            vm.ip = Vector2D::new(10, 10);
            vm.dir = Direction::SouthEast;
            vm.raw_move();
            assert!(vm.grid.contains(vm.ip));
        });
    }

    #[test]
    fn stepping_from_the_edge_of_the_coordinate_space() {
        let extremes = [
            Vector2D::new(i64::MAX, i64::MAX),
            Vector2D::new(i64::MIN, i64::MIN),
        ];
        for mode in [Mode::Cardinal, Mode::Ordinal] {
            with_vm("abc\ndef", |vm| {
                vm.mode = mode;
                for ip in extremes {
                    for &dir in &ALL_DIRECTIONS {
                        vm.ip = ip;
                        vm.dir = dir;
                        vm.raw_move();
                        assert!(vm.grid.contains(vm.ip), "{mode} {ip} {dir}: {}", vm.ip);
                    }
                }
            });
        }
    }

    #[test]
    fn cardinal_wrap_from_i64_max() {
        with_vm("abc", |vm| {
            vm.ip = Vector2D::new(i64::MAX, 0);
            vm.raw_move();
            // i64::MAX + 1 = 2^63, and 2^63 mod 3 = 2.
            assert_eq!(vm.ip, Vector2D::new(2, 0));
        });
    }

    #[test]
    fn advance_skips_non_commands() {
        with_vm("a 1", |vm| {
            vm.ip = Vector2D::new(0, 0);
            assert!(!vm.advance(), "space is not a command");
            assert!(vm.advance(), "digit is a command");
            assert_eq!(vm.ip, Vector2D::new(2, 0));
        });
    }

    #[test]
    fn string_mode_stops_on_everything_but_terrain() {
        with_vm("x _", |vm| {
            vm.string_mode = true;
            vm.ip = Vector2D::new(-1, 0);
            assert!(vm.advance());
            assert!(vm.advance());
            assert!(!vm.advance());
        });
    }

    #[test]
    fn strafing() {
        with_vm("     \n     \n     \n     \n     ", |vm| {
            vm.ip = Vector2D::new(2, 2);
            vm.dir = Direction::NorthEast;
            // reverse SW (-1,1) + left90 NW (-1,-1) = (-2,0) → (-1,0)
            vm.strafe(true);
            assert_eq!(vm.ip, Vector2D::new(1, 2));
            // reverse SW (-1,1) + right90 SE (1,1) = (0,2) → (0,1)
            vm.strafe(false);
            assert_eq!(vm.ip, Vector2D::new(1, 3));
        });
    }
}

//! Plain-text dump of the whole VM state, for debugging.
//!
//! Only ever called between ticks; rendering never mutates the VM.

use crate::machine::{Repetition, VM};
use std::fmt::Write;

/// Glyph shown for cells that are not printable characters.
const UNPRINTABLE: char = '·';

fn glyph(cell: i64) -> char {
    match u32::try_from(cell).ok().and_then(char::from_u32) {
        Some(c) if !c.is_control() => c,
        _ => UNPRINTABLE,
    }
}

fn list<T>(items: impl IntoIterator<Item = T>, f: impl Fn(T) -> String) -> String {
    let items: Vec<String> = items.into_iter().map(f).collect();
    format!("[{}]", items.join(", "))
}

/// Render the mode, grid (IP marked with `^` below its cell), iterator
/// queue, stack, tape, register, remaining arguments and tick count.
pub fn render(vm: &VM) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "mode: {}  tick: {}  ip: {} {}",
        vm.mode(),
        vm.tick(),
        vm.ip(),
        vm.direction().abbreviation()
    );
    if vm.in_string_mode() {
        let captured: String = vm.current_string().iter().map(|&c| glyph(c)).collect();
        let _ = writeln!(out, "string: {captured:?}");
    }

    let grid = vm.grid();
    let (min, max) = (grid.min(), grid.max());
    let _ = writeln!(out, "grid: {min} .. {max}");
    for (y, cells) in (min.y..).zip(grid.rows()) {
        let row: String = cells.iter().map(|&cell| glyph(cell)).collect();
        let _ = writeln!(out, "  {row}");
        if vm.ip().y == y && (min.x..=max.x).contains(&vm.ip().x) {
            let column = (vm.ip().x - min.x) as usize;
            let _ = writeln!(out, "  {}^", " ".repeat(column));
        }
    }

    let iterators = list(vm.iterators(), |r| match r {
        Repetition::Count(n) => n.to_string(),
        Repetition::Text(s) => format!("{s:?}"),
    });
    let _ = writeln!(out, "iterators: {iterators}");
    let _ = writeln!(out, "stack: {}", list(vm.stack(), ToString::to_string));
    let _ = writeln!(out, "returns: {}", list(vm.return_stack(), ToString::to_string));

    let tape = vm.tape();
    let (mp, rp) = (tape.memory_pointer(), tape.register_pointer());
    let mut addrs: Vec<i64> = tape.cells().map(|(addr, _)| addr).collect();
    addrs.extend([mp, rp]);
    addrs.sort_unstable();
    addrs.dedup();
    let cells = addrs
        .into_iter()
        .map(|addr| {
            let mut cell = format!("{addr}={}", tape.get(addr));
            match (addr == mp, addr == rp) {
                (true, true) => cell.push_str("(mp,rp)"),
                (true, false) => cell.push_str("(mp)"),
                (false, true) => cell.push_str("(rp)"),
                (false, false) => {}
            }
            cell
        })
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "tape: {cells}");
    let _ = writeln!(out, "register: {:?}", tape.read_register());
    let _ = writeln!(out, "args: {}", list(vm.args(), |a| format!("{a:?}")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use alice_common::Grid;

    #[test]
    fn fresh_vm() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let vm = VM::new(Grid::parse("1>O@"), &mut input, &mut output, Config::default())
            .with_args(["x"]);
        let dump = render(&vm);
        assert!(dump.starts_with("mode: Cardinal  tick: 0"), "{dump}");
        assert!(dump.contains("  1>O@\n"), "{dump}");
        assert!(dump.contains("tape: 0=-1(mp,rp)\n"), "{dump}");
        assert!(dump.contains("args: [\"x\"]"), "{dump}");
        // The IP starts outside the grid, so nothing is marked.
        assert!(!dump.contains('^'), "{dump}");
    }

    #[test]
    fn marks_ip_and_shows_stack() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = VM::new(Grid::parse("12@"), &mut input, &mut output, Config::default());
        vm.step().unwrap();
        vm.step().unwrap();
        vm.enqueue(Repetition::Text("ab".into()));
        vm.push("hi");
        let dump = render(&vm);
        assert!(dump.contains("  12@\n   ^\n"), "{dump}");
        assert!(dump.contains("stack: [1, 2, \"hi\"]"), "{dump}");
        assert!(dump.contains("iterators: [\"ab\"]"), "{dump}");
    }

    #[test]
    fn marks_both_pointers() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = VM::new(Grid::parse("@"), &mut input, &mut output, Config::default());
        vm.tape.write_register("ok");
        vm.tape.mp = 1;
        let dump = render(&vm);
        assert!(dump.contains("tape: 0=111(rp) 1=107(mp)\n"), "{dump}");
        assert!(dump.contains("register: \"ok\""), "{dump}");
    }

    #[test]
    fn unprintable_cells() {
        assert_eq!(glyph(-1), UNPRINTABLE);
        assert_eq!(glyph(10), UNPRINTABLE);
        assert_eq!(glyph('x' as i64), 'x');
    }
}

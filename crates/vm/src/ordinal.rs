//! Ordinal mode: the string command set.
//!
//! Every pop here sees text; integers on the stack are rendered in
//! decimal first. Binary operators pop `b` first, then `a`.

use crate::error::RuntimeError;
use crate::io;
use crate::label;
use crate::machine::VM;
use crate::opcode::OrdinalOp;
use crate::text;
use alice_common::{Mirror, Value, Vector2D};
use num_bigint::BigInt;
use std::io::Write;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// What `n` pushes for an empty string.
const TRUTHY: &str = "Jabberwocky";

fn code_points(s: &str) -> Vec<i64> {
    s.chars().map(|c| c as i64).collect()
}

fn cell_char(cell: i64) -> Option<char> {
    u32::try_from(cell).ok().and_then(char::from_u32)
}

/// The current local time in RFC 3339 form. Falls back to UTC when the
/// local offset cannot be determined.
fn timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&Rfc3339).unwrap_or_default()
}

impl<'a> VM<'a> {
    pub(crate) fn exec_ordinal(&mut self, op: OrdinalOp) -> Result<(), RuntimeError> {
        match op {
            OrdinalOp::Digit(d) => {
                let mut s = self.pop_text();
                s.push(char::from(b'0' + d));
                self.push(s);
            }

            // ---- Strings ----
            OrdinalOp::Concat => self.exec_text_binary(|a, b| a.to_string() + b),
            OrdinalOp::Remove => self.exec_text_binary(text::remove_first),
            OrdinalOp::Riffle => self.exec_text_binary(text::riffle),
            OrdinalOp::Count => {
                let (a, b) = self.pop_text_pair();
                self.push(BigInt::from(text::count(&a, &b)));
            }
            OrdinalOp::Split => {
                let (a, b) = self.pop_text_pair();
                self.push_all(text::split(&a, &b));
            }
            OrdinalOp::SplitInclusive => {
                let (a, b) = self.pop_text_pair();
                self.push_all(text::split_inclusive(&a, &b));
            }
            OrdinalOp::Find => {
                let (a, b) = self.pop_text_pair();
                self.push(if a.contains(b.as_str()) { b } else { String::new() });
            }
            OrdinalOp::Replace => {
                let c = self.pop_text();
                let (a, b) = self.pop_text_pair();
                self.push(text::replace(&a, &b, &c));
            }
            OrdinalOp::Trim => self.exec_text_unary(|a| a.trim().to_string()),
            OrdinalOp::Transliterate => {
                let target = self.pop_text();
                let (a, source) = self.pop_text_pair();
                self.push(text::transliterate(&a, &source, &target));
            }
            OrdinalOp::Intersection => self.exec_text_binary(text::intersection),
            OrdinalOp::Union => self.exec_text_binary(text::union),
            OrdinalOp::SymmetricDifference => self.exec_text_binary(text::symmetric_difference),
            OrdinalOp::Complement => self.exec_text_binary(text::complement),
            OrdinalOp::Dedup => self.exec_text_unary(text::dedup),
            OrdinalOp::Sort => self.exec_text_unary(text::sort),
            OrdinalOp::Shuffle => {
                let a = self.pop_text();
                let shuffled = text::shuffle(&a, &mut self.rng);
                self.push(shuffled);
            }
            OrdinalOp::RandomChar => {
                let a = self.pop_text();
                let c = text::random_char(&a, &mut self.rng);
                self.push(c);
            }
            OrdinalOp::Lower => self.exec_text_unary(str::to_lowercase),
            OrdinalOp::Upper => self.exec_text_unary(str::to_uppercase),
            OrdinalOp::SwapCase => self.exec_text_unary(text::swap_case),
            OrdinalOp::Runs => {
                let a = self.pop_text();
                self.push_all(text::runs(&a));
            }
            OrdinalOp::Head => {
                let a = self.pop_text();
                let (rest, head) = text::head(&a);
                self.push(rest);
                self.push(head);
            }
            OrdinalOp::Tail => {
                let a = self.pop_text();
                let (rest, last) = text::tail(&a);
                self.push(rest);
                self.push(last);
            }
            OrdinalOp::Chars => {
                let a = self.pop_text();
                for c in a.chars() {
                    self.push(c);
                }
            }
            OrdinalOp::Reverse => self.exec_text_unary(text::reverse),
            OrdinalOp::Permutations => {
                let a = self.pop_text();
                self.push_all(text::permutations(&a));
            }
            OrdinalOp::Subsequences => {
                let a = self.pop_text();
                self.push_all(text::subsequences(&a));
            }
            OrdinalOp::Substrings => {
                let a = self.pop_text();
                self.push_all(text::substrings(&a));
            }
            OrdinalOp::Permute => self.exec_text_binary(text::permute),
            OrdinalOp::ExpandRanges => self.exec_text_unary(text::expand_ranges),
            OrdinalOp::Zip => self.exec_text_binary(text::zip),
            OrdinalOp::Unzip => {
                let a = self.pop_text();
                let (even, odd) = text::unzip(&a);
                self.push(even);
                self.push(odd);
            }
            OrdinalOp::LongestCommonSubstring => {
                self.exec_text_binary(text::longest_common_substring)
            }
            OrdinalOp::ShortestCommonSuperstring => {
                self.exec_text_binary(text::shortest_common_superstring)
            }
            OrdinalOp::Transpose => self.exec_text_unary(text::transpose),

            // ---- Control flow ----
            OrdinalOp::EnsureWest => self.ensure(self.dir.vec().x > 0, Mirror::Pillar),
            OrdinalOp::EnsureEast => self.ensure(self.dir.vec().x < 0, Mirror::Pillar),
            OrdinalOp::EnsureNorth => self.ensure(self.dir.vec().y > 0, Mirror::Floor),
            OrdinalOp::EnsureSouth => self.ensure(self.dir.vec().y < 0, Mirror::Floor),
            OrdinalOp::StrafeLeft => self.strafe(true),
            OrdinalOp::StrafeRight => self.strafe(false),
            OrdinalOp::Compare => {
                let (a, b) = self.pop_text_pair();
                if a < b {
                    self.dir = self.dir.left90();
                } else if a > b {
                    self.dir = self.dir.right90();
                }
            }
            OrdinalOp::SkipIfEmpty => {
                if self.pop_text().is_empty() {
                    self.skip_next();
                }
            }
            OrdinalOp::Call => {
                if let Some(target) = self.pop_label_end() {
                    self.call(target);
                }
            }
            OrdinalOp::Jump => {
                if let Some(target) = self.pop_label_end() {
                    self.jump(target);
                }
            }

            // ---- Grid ----
            OrdinalOp::GetLabel => {
                let mut found = String::new();
                if let Some(end) = self.pop_label_end() {
                    let v = self.dir.vec();
                    let mut pos = end + v;
                    while let Some(c) = cell_char(self.grid.get(pos)) {
                        found.push(c);
                        pos += v;
                    }
                }
                self.push(found);
            }
            OrdinalOp::PutLabel => {
                let s = self.pop_text();
                if let Some(end) = self.pop_label_end() {
                    let v = self.dir.vec();
                    let mut pos = end;
                    for c in s.chars() {
                        pos += v;
                        self.put_cell(pos, c as i64)?;
                    }
                }
            }

            // ---- Whole stack ----
            OrdinalOp::JoinStack => {
                let joined: String = self.stack.drain(..).map(Value::into_text).collect();
                self.push(joined);
            }
            OrdinalOp::ReverseStack => self.stack.reverse(),
            OrdinalOp::PermuteStack => {
                let key: Vec<char> = self.pop_text().chars().collect();
                let top_first: Vec<Value> = self.stack.drain(..).rev().collect();
                let permuted = text::permute_by_key(top_first, &key);
                self.stack.extend(permuted.into_iter().rev());
            }

            // ---- Registers ----
            OrdinalOp::WriteRegister => {
                let s = self.pop_text();
                self.tape.write_register(&s);
            }
            OrdinalOp::ReadRegister => {
                let s = self.tape.read_register();
                self.push(s);
            }
            OrdinalOp::PreviousRegister => self.tape.previous_register(),
            OrdinalOp::NextRegister => self.tape.next_register(),

            // ---- I/O ----
            OrdinalOp::ReadAll => {
                let s = io::read_all(&mut *self.input)?;
                self.push(s);
            }
            OrdinalOp::ReadLine => {
                let line = io::read_line(&mut *self.input)?.unwrap_or_default();
                self.push(line);
            }
            OrdinalOp::Write => {
                let s = self.pop_text();
                self.output.write_all(s.as_bytes())?;
            }
            OrdinalOp::WriteLine => {
                let s = self.pop_text();
                self.output.write_all(s.as_bytes())?;
                self.output.write_all(b"\n")?;
            }
            OrdinalOp::NextArg => {
                let arg = self.next_arg();
                self.push(arg);
            }

            // ---- Constants ----
            OrdinalOp::LogicalNot => {
                let s = self.pop_text();
                self.push(if s.is_empty() { TRUTHY } else { "" });
            }
            OrdinalOp::Newline => self.push("\n"),
            OrdinalOp::Empty => self.push(""),
            OrdinalOp::Timestamp => self.push(timestamp()),
        }
        Ok(())
    }

    /// Pop `b`, then `a`.
    fn pop_text_pair(&mut self) -> (String, String) {
        let b = self.pop_text();
        let a = self.pop_text();
        (a, b)
    }

    fn push_all(&mut self, values: Vec<String>) {
        self.stack.extend(values.into_iter().map(Value::Text));
    }

    fn exec_text_unary(&mut self, f: impl FnOnce(&str) -> String) {
        let a = self.pop_text();
        self.push(f(&a));
    }

    fn exec_text_binary(&mut self, f: impl FnOnce(&str, &str) -> String) {
        let (a, b) = self.pop_text_pair();
        self.push(f(&a, &b));
    }

    fn ensure(&mut self, facing_away: bool, wall: Mirror) {
        if facing_away {
            self.dir = self.dir.reflect(wall);
        }
    }

    /// Pop a label and find where its first occurrence along the current
    /// direction ends.
    fn pop_label_end(&mut self) -> Option<Vector2D> {
        let label = self.pop_text();
        label::find_label_end(&self.grid, &code_points(&label), self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::mode::Mode;
    use alice_common::{Direction, Grid};

    fn ordinal_vm<'a>(
        src: &str,
        input: &'a mut &[u8],
        output: &'a mut Vec<u8>,
    ) -> VM<'a> {
        let mut vm = VM::new(Grid::parse(src), input, output, Config::default());
        vm.mode = Mode::Ordinal;
        vm
    }

    /// Apply `ops` in order to `stack` in Ordinal mode and return the
    /// stack.
    fn eval(stack: &[&str], ops: &[OrdinalOp]) -> Vec<Value> {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = ordinal_vm("@", &mut input, &mut output);
        for s in stack {
            vm.push(*s);
        }
        for &op in ops {
            vm.exec_ordinal(op).unwrap();
        }
        vm.stack().to_vec()
    }

    fn texts(ss: &[&str]) -> Vec<Value> {
        ss.iter().map(|&s| Value::from(s)).collect()
    }

    #[test]
    fn digits_append() {
        assert_eq!(
            eval(&["ab"], &[OrdinalOp::Digit(4), OrdinalOp::Digit(2)]),
            texts(&["ab42"])
        );
        assert_eq!(eval(&[], &[OrdinalOp::Digit(7)]), texts(&["7"]));
    }

    #[test]
    fn integers_are_rendered_before_use() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = ordinal_vm("@", &mut input, &mut output);
        vm.push(12);
        vm.push(-3);
        vm.exec_ordinal(OrdinalOp::Concat).unwrap();
        assert_eq!(vm.stack(), &[Value::from("12-3")]);
    }

    #[test]
    fn binary_string_ops() {
        assert_eq!(eval(&["ab", "cd"], &[OrdinalOp::Concat]), texts(&["abcd"]));
        assert_eq!(eval(&["abcb", "b"], &[OrdinalOp::Remove]), texts(&["acb"]));
        assert_eq!(eval(&["abc", "-"], &[OrdinalOp::Riffle]), texts(&["a-b-c"]));
        assert_eq!(
            eval(&["aaaa", "aa"], &[OrdinalOp::Count]),
            vec![Value::from(2)]
        );
        assert_eq!(eval(&["hello", "ll"], &[OrdinalOp::Find]), texts(&["ll"]));
        assert_eq!(eval(&["hello", "x"], &[OrdinalOp::Find]), texts(&[""]));
    }

    #[test]
    fn splitting() {
        assert_eq!(
            eval(&["a,b,,c", ","], &[OrdinalOp::Split]),
            texts(&["a", "b", "", "c"])
        );
        assert_eq!(
            eval(&["a,b", ","], &[OrdinalOp::SplitInclusive]),
            texts(&["a", ",", "b"])
        );
    }

    #[test]
    fn replace_and_transliterate() {
        assert_eq!(
            eval(&["banana", "an", "AN"], &[OrdinalOp::Replace]),
            texts(&["bANANa"])
        );
        assert_eq!(
            eval(&["hello", "lo", "01"], &[OrdinalOp::Transliterate]),
            texts(&["he001"])
        );
    }

    #[test]
    fn case_and_trim() {
        assert_eq!(eval(&["  hi \n"], &[OrdinalOp::Trim]), texts(&["hi"]));
        assert_eq!(eval(&["aBc"], &[OrdinalOp::Upper]), texts(&["ABC"]));
        assert_eq!(eval(&["aBc"], &[OrdinalOp::Lower]), texts(&["abc"]));
        assert_eq!(eval(&["aBc"], &[OrdinalOp::SwapCase]), texts(&["AbC"]));
    }

    #[test]
    fn head_tail_and_chars() {
        assert_eq!(eval(&["abc"], &[OrdinalOp::Head]), texts(&["bc", "a"]));
        assert_eq!(eval(&["abc"], &[OrdinalOp::Tail]), texts(&["ab", "c"]));
        assert_eq!(eval(&[""], &[OrdinalOp::Head]), texts(&["", ""]));
        assert_eq!(eval(&["xy"], &[OrdinalOp::Chars]), texts(&["x", "y"]));
    }

    #[test]
    fn unzip_pushes_even_then_odd() {
        assert_eq!(eval(&["abcde"], &[OrdinalOp::Unzip]), texts(&["ace", "bd"]));
    }

    #[test]
    fn logical_not_and_constants() {
        assert_eq!(eval(&[""], &[OrdinalOp::LogicalNot]), texts(&["Jabberwocky"]));
        assert_eq!(eval(&["x"], &[OrdinalOp::LogicalNot]), texts(&[""]));
        assert_eq!(
            eval(&[], &[OrdinalOp::Newline, OrdinalOp::Empty]),
            texts(&["\n", ""])
        );
    }

    #[test]
    fn whole_stack_ops() {
        assert_eq!(eval(&["a", "b", "c"], &[OrdinalOp::JoinStack]), texts(&["abc"]));
        assert_eq!(
            eval(&["a", "b", "c"], &[OrdinalOp::ReverseStack]),
            texts(&["c", "b", "a"])
        );
    }

    #[test]
    fn permute_stack_is_stable() {
        // Top first: c (key 'b'), b (key 'a'), a (unkeyed). Sorted top
        // first: b, c, a.
        assert_eq!(
            eval(&["a", "b", "c", "ba"], &[OrdinalOp::PermuteStack]),
            texts(&["a", "c", "b"])
        );
        // Equal keys keep their order.
        assert_eq!(
            eval(&["x", "y", "z", "aaa"], &[OrdinalOp::PermuteStack]),
            texts(&["x", "y", "z"])
        );
    }

    #[test]
    fn registers() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = ordinal_vm("@", &mut input, &mut output);
        vm.push("hi");
        vm.exec_ordinal(OrdinalOp::WriteRegister).unwrap();
        vm.exec_ordinal(OrdinalOp::ReadRegister).unwrap();
        assert_eq!(vm.stack(), &[Value::from("hi")]);
        assert_eq!(vm.tape().register_pointer(), 0);

        vm.exec_ordinal(OrdinalOp::NextRegister).unwrap();
        assert_eq!(vm.tape().register_pointer(), 3);
        vm.exec_ordinal(OrdinalOp::PreviousRegister).unwrap();
        assert_eq!(vm.tape().register_pointer(), 0);
    }

    #[test]
    fn input_and_output() {
        let mut input: &[u8] = b"first\r\nsecond\nrest";
        let mut output = Vec::new();
        {
            let mut vm = ordinal_vm("@", &mut input, &mut output);
            vm.exec_ordinal(OrdinalOp::ReadLine).unwrap();
            vm.exec_ordinal(OrdinalOp::ReadAll).unwrap();
            assert_eq!(vm.stack(), &[Value::from("first"), Value::from("second\nrest")]);
            vm.exec_ordinal(OrdinalOp::WriteLine).unwrap();
            vm.exec_ordinal(OrdinalOp::Write).unwrap();
        }
        assert_eq!(output, b"second\nrest\nfirst");
    }

    #[test]
    fn arguments() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = ordinal_vm("@", &mut input, &mut output).with_args(["x"]);
        vm.exec_ordinal(OrdinalOp::NextArg).unwrap();
        vm.exec_ordinal(OrdinalOp::NextArg).unwrap();
        assert_eq!(vm.stack(), &[Value::from("x"), Value::from("")]);
    }

    #[test]
    fn ensure_reflects_only_when_facing_away() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = ordinal_vm("@", &mut input, &mut output);
        vm.dir = Direction::NorthEast;
        vm.exec_ordinal(OrdinalOp::EnsureEast).unwrap();
        assert_eq!(vm.dir, Direction::NorthEast);
        vm.exec_ordinal(OrdinalOp::EnsureWest).unwrap();
        assert_eq!(vm.dir, Direction::NorthWest);
        vm.exec_ordinal(OrdinalOp::EnsureSouth).unwrap();
        assert_eq!(vm.dir, Direction::SouthWest);
        vm.exec_ordinal(OrdinalOp::EnsureSouth).unwrap();
        assert_eq!(vm.dir, Direction::SouthWest);
    }

    #[test]
    fn compare_turns() {
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = ordinal_vm("@", &mut input, &mut output);
        vm.dir = Direction::SouthEast;
        vm.push("a");
        vm.push("b");
        vm.exec_ordinal(OrdinalOp::Compare).unwrap();
        assert_eq!(vm.dir, Direction::NorthEast);
        vm.push("a");
        vm.push("a");
        vm.exec_ordinal(OrdinalOp::Compare).unwrap();
        assert_eq!(vm.dir, Direction::NorthEast);
    }

    #[test]
    fn label_jump_lands_on_the_label_end() {
        let src = "    \n a  \n  b \n   c";
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = ordinal_vm(src, &mut input, &mut output);
        vm.dir = Direction::SouthEast;
        vm.push("ab");
        vm.exec_ordinal(OrdinalOp::Call).unwrap();
        assert_eq!(vm.ip(), Vector2D::new(2, 2));
        assert_eq!(vm.return_stack(), &[Vector2D::new(-1, 0)]);

        vm.push("zz");
        vm.exec_ordinal(OrdinalOp::Jump).unwrap();
        assert_eq!(vm.ip(), Vector2D::new(2, 2));
    }

    #[test]
    fn get_and_put_after_label() {
        let src = "ab   \n     \n     \n     \n     ";
        let mut input: &[u8] = b"";
        let mut output = Vec::new();
        let mut vm = ordinal_vm(src, &mut input, &mut output);
        vm.dir = Direction::East;
        vm.push("ab");
        vm.push("xyz");
        vm.exec_ordinal(OrdinalOp::PutLabel).unwrap();
        let row: Vec<i64> = vm.grid().rows().next().unwrap().to_vec();
        assert_eq!(row, code_points("abxyz"));

        vm.push("ab");
        vm.exec_ordinal(OrdinalOp::GetLabel).unwrap();
        assert_eq!(vm.stack(), &[Value::from("xyz")]);

        vm.push("missing");
        vm.exec_ordinal(OrdinalOp::GetLabel).unwrap();
        assert_eq!(vm.stack().last(), Some(&Value::from("")));
    }

    #[test]
    fn timestamp_is_rfc3339() {
        let stamp = timestamp();
        assert!(stamp.len() >= 20, "{stamp}");
        assert_eq!(stamp.as_bytes()[10], b'T', "{stamp}");
    }
}

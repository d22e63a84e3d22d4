//! Tick driver and the commands shared by both modes.

use crate::config::STALL_STEPS_PER_CELL;
use crate::error::RuntimeError;
use crate::machine::{Repetition, VM};
use crate::mode::Mode;
use crate::opcode::{Command, SharedOp};
use alice_common::{Value, Vector2D};
use num_traits::{Signed, ToPrimitive};
use std::io::Write;
use tracing::{debug, trace};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The program executed `@`.
    Terminated,
    /// The configured tick budget ran out first.
    TickLimitReached,
}

impl<'a> VM<'a> {
    /// Run until `@` or until the tick budget is exhausted.
    pub fn run(&mut self) -> Result<Outcome, RuntimeError> {
        self.run_with_observer(|_| {})
    }

    /// Like [`VM::run`], calling `observe` after every tick.
    pub fn run_with_observer(
        &mut self,
        mut observe: impl FnMut(&VM<'a>),
    ) -> Result<Outcome, RuntimeError> {
        debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            max_ticks = ?self.config.max_ticks,
            "starting run"
        );

        let outcome = loop {
            if self.done {
                break Outcome::Terminated;
            }
            if self.config.max_ticks.is_some_and(|max| self.tick >= max) {
                break Outcome::TickLimitReached;
            }
            self.step()?;
            observe(self);
        };

        self.output.flush()?;
        debug!(ticks = self.tick, ?outcome, "run finished");
        Ok(outcome)
    }

    /// Execute exactly one tick. Returns whether the program is still
    /// running afterwards.
    pub fn step(&mut self) -> Result<bool, RuntimeError> {
        if self.done {
            return Ok(false);
        }

        self.seek_command()?;
        let cell = self.current_cell();
        trace!(tick = self.tick, at = %self.ip, cell, mode = %self.mode, "tick");

        if self.string_mode {
            self.exec_string_cell(cell)?;
        } else {
            let command = Command::decode(cell, self.mode).ok_or(RuntimeError::UnknownCommand {
                at: self.ip,
                cell,
                mode: self.mode.name(),
            })?;
            match command {
                // Opening a literal never consumes a repetition.
                Command::Shared(SharedOp::StringMode) => self.exec_shared(SharedOp::StringMode)?,
                _ => self.repeat(|vm| vm.exec_command(command))?,
            }
        }

        self.tick += 1;
        Ok(!self.done)
    }

    /// Move until the IP rests on something executable.
    fn seek_command(&mut self) -> Result<(), RuntimeError> {
        let cells = (self.grid.width() * self.grid.height()) as u64;
        let limit = STALL_STEPS_PER_CELL * cells + STALL_STEPS_PER_CELL;
        let mut steps = 0;
        while !self.advance() {
            steps += 1;
            if steps > limit {
                return Err(RuntimeError::NoReachableCommand { at: self.ip, steps });
            }
        }
        Ok(())
    }

    /// Run `exec` as often as the front of the iterator queue says.
    fn repeat(
        &mut self,
        mut exec: impl FnMut(&mut Self) -> Result<(), RuntimeError>,
    ) -> Result<(), RuntimeError> {
        match self.iterators.pop_front().unwrap_or(Repetition::Count(1)) {
            Repetition::Count(n) => {
                for _ in 0..n {
                    if self.done {
                        break;
                    }
                    exec(self)?;
                }
            }
            Repetition::Text(text) => {
                for c in text.chars() {
                    if self.done {
                        break;
                    }
                    self.push(c);
                    exec(self)?;
                }
            }
        }
        Ok(())
    }

    fn exec_command(&mut self, command: Command) -> Result<(), RuntimeError> {
        match command {
            Command::Shared(op) => self.exec_shared(op),
            Command::Cardinal(op) => self.exec_cardinal(op),
            Command::Ordinal(op) => self.exec_ordinal(op),
        }
    }

    // ---- String literals ----

    fn exec_string_cell(&mut self, cell: i64) -> Result<(), RuntimeError> {
        if cell == SharedOp::StringMode.glyph() as i64 {
            self.string_mode = false;
            self.repeat(|vm| {
                vm.flush_string();
                Ok(())
            })?;
            self.current_string.clear();
        } else if cell == SharedOp::Escape.glyph() as i64 {
            self.raw_move();
            let escaped = self.current_cell();
            self.current_string.push(escaped);
        } else {
            self.current_string.push(cell);
        }
        Ok(())
    }

    /// Push the captured literal in the current mode's form: one integer
    /// per cell in Cardinal mode, one string in Ordinal mode.
    fn flush_string(&mut self) {
        match self.mode {
            Mode::Cardinal => {
                self.stack
                    .extend(self.current_string.iter().map(|&cell| Value::from(cell)));
            }
            Mode::Ordinal => {
                let text: String = self
                    .current_string
                    .iter()
                    .filter_map(|&cell| u32::try_from(cell).ok().and_then(char::from_u32))
                    .collect();
                self.push(text);
            }
        }
    }

    // ---- Shared commands ----

    pub(crate) fn exec_shared(&mut self, op: SharedOp) -> Result<(), RuntimeError> {
        match op {
            SharedOp::Terminate => self.done = true,
            SharedOp::StringMode => {
                self.string_mode = true;
                self.current_string.clear();
            }
            SharedOp::Escape => {
                self.raw_move();
                let cell = self.current_cell();
                match self.mode {
                    Mode::Cardinal => self.push(cell),
                    Mode::Ordinal => {
                        let text = u32::try_from(cell)
                            .ok()
                            .and_then(char::from_u32)
                            .map(String::from)
                            .unwrap_or_default();
                        self.push(text);
                    }
                }
            }
            SharedOp::Skip => self.skip_next(),
            SharedOp::Duplicate => {
                let value = self.pop_value();
                self.push(value.clone());
                self.push(value);
            }
            SharedOp::Discard => {
                self.pop_raw();
            }
            SharedOp::Swap => {
                let b = self.pop_value();
                let a = self.pop_value();
                self.push(b);
                self.push(a);
            }
            SharedOp::Convert => {
                let n = self.pop_int();
                let count = if n.is_negative() {
                    0
                } else {
                    n.to_usize().unwrap_or(usize::MAX)
                };
                let mut values = Vec::new();
                for _ in 0..count {
                    values.push(self.pop_value());
                }
                self.stack.extend(values.into_iter().rev());
            }
            SharedOp::Iterate => {
                let repetition = match self.mode {
                    Mode::Cardinal => {
                        let n = self.pop_int();
                        let count = if n.is_negative() {
                            0
                        } else {
                            n.to_u64().unwrap_or(u64::MAX)
                        };
                        Repetition::Count(count)
                    }
                    Mode::Ordinal => Repetition::Text(self.pop_text()),
                };
                self.enqueue(repetition);
            }
            SharedOp::PushReturn => self.return_stack.push(self.ip),
            SharedOp::DropReturn => {
                self.return_stack.pop();
            }
            SharedOp::Return => {
                let target = self.return_stack.pop().unwrap_or(Vector2D::ZERO);
                self.jump(target);
            }
            SharedOp::ReturnKeep => {
                let target = self.return_stack.last().copied().unwrap_or(Vector2D::ZERO);
                self.jump(target);
            }
        }
        Ok(())
    }

    /// Move the IP onto `target`. The next move steps past it, so the
    /// target cell itself is not executed.
    pub(crate) fn jump(&mut self, target: Vector2D) {
        trace!(from = %self.ip, to = %target, "jump");
        self.ip = target;
    }

    /// Jump to `target`, pushing the current IP as a return address.
    pub(crate) fn call(&mut self, target: Vector2D) {
        self.return_stack.push(self.ip);
        self.jump(target);
    }
}

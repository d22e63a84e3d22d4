//! VM state: grid, instruction pointer, stack, tape, queues.

use crate::config::{Config, MAX_GRID_CELLS};
use crate::error::RuntimeError;
use crate::mode::Mode;
use crate::tape::Tape;
use alice_common::{decimal_runs, Direction, Grid, Value, Vector2D, OUT_OF_BOUNDS};
use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use tracing::debug;

/// A pending repetition for the next command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repetition {
    /// Run the command this many times (0 skips it).
    Count(u64),
    /// Run the command once per character, pushing the character first.
    Text(String),
}

/// The Alice virtual machine.
pub struct VM<'a> {
    /// The program grid. Commands may rewrite it.
    pub(crate) grid: Grid,
    /// Instruction pointer.
    pub(crate) ip: Vector2D,
    /// Direction of travel.
    pub(crate) dir: Direction,
    pub(crate) mode: Mode,
    /// Value stack, top at the end.
    pub(crate) stack: Vec<Value>,
    pub(crate) tape: Tape,
    /// Return addresses for `j`/`k`/`w`.
    pub(crate) return_stack: Vec<Vector2D>,
    /// Repetitions waiting for the next command, front first.
    pub(crate) iterators: VecDeque<Repetition>,
    /// Whether a string literal is being captured.
    pub(crate) string_mode: bool,
    /// Raw cells captured by the current string literal.
    pub(crate) current_string: Vec<i64>,
    /// Completed ticks.
    pub(crate) tick: u64,
    /// Set by `@`.
    pub(crate) done: bool,
    pub(crate) config: Config,
    pub(crate) input: &'a mut dyn BufRead,
    pub(crate) output: &'a mut dyn Write,
    /// Program arguments not yet consumed.
    pub(crate) args: VecDeque<String>,
    pub(crate) rng: StdRng,
}

impl<'a> VM<'a> {
    /// Create a VM positioned just west of the top-left cell, facing east
    /// in Cardinal mode.
    pub fn new(
        grid: Grid,
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
        config: Config,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            grid,
            ip: Vector2D::new(-1, 0),
            dir: Direction::East,
            mode: Mode::Cardinal,
            stack: Vec::new(),
            tape: Tape::new(),
            return_stack: Vec::new(),
            iterators: VecDeque::new(),
            string_mode: false,
            current_string: Vec::new(),
            tick: 0,
            done: false,
            config,
            input,
            output,
            args: VecDeque::new(),
            rng,
        }
    }

    /// Supply the program arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    // ---- read-only views ------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ip(&self) -> Vector2D {
        self.ip
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn return_stack(&self) -> &[Vector2D] {
        &self.return_stack
    }

    pub fn iterators(&self) -> &VecDeque<Repetition> {
        &self.iterators
    }

    pub fn in_string_mode(&self) -> bool {
        self.string_mode
    }

    pub fn current_string(&self) -> &[i64] {
        &self.current_string
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn args(&self) -> &VecDeque<String> {
        &self.args
    }

    // ---- mutation entry points ------------------------------------------

    /// Queue a repetition behind any already pending.
    pub fn enqueue(&mut self, repetition: Repetition) {
        self.iterators.push_back(repetition);
    }

    /// Make the next command run zero times.
    pub(crate) fn skip_next(&mut self) {
        self.iterators.push_front(Repetition::Count(0));
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.stack.push(value.into());
    }

    /// Pop without coercion.
    pub(crate) fn pop_raw(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    /// Pop an integer. Text on top of the stack is expanded into the
    /// decimal runs it contains (all but the last are pushed back, oldest
    /// first); text without digits yields 0, as does an empty stack.
    pub(crate) fn pop_int(&mut self) -> BigInt {
        match self.stack.pop() {
            None => BigInt::default(),
            Some(Value::Integer(n)) => n,
            Some(Value::Text(s)) => {
                let mut runs = decimal_runs(&s);
                let last = runs.pop().unwrap_or_default();
                self.stack.extend(runs.into_iter().map(Value::Integer));
                last
            }
        }
    }

    /// Pop a string. Integers are rendered in decimal; an empty stack
    /// yields the empty string.
    pub(crate) fn pop_text(&mut self) -> String {
        self.stack.pop().map(Value::into_text).unwrap_or_default()
    }

    /// Pop in the current mode's form.
    pub(crate) fn pop_value(&mut self) -> Value {
        match self.mode {
            Mode::Cardinal => Value::Integer(self.pop_int()),
            Mode::Ordinal => Value::Text(self.pop_text()),
        }
    }

    /// Cell under the IP.
    pub(crate) fn current_cell(&self) -> i64 {
        self.grid.get(self.ip)
    }

    /// Write a grid cell, logging any change of the bounding box.
    ///
    /// Growing the grid past [`MAX_GRID_CELLS`], or past what `i64`
    /// coordinates can address, is a `CoordinateOutOfRange` error.
    pub(crate) fn put_cell(&mut self, pos: Vector2D, value: i64) -> Result<(), RuntimeError> {
        if value != OUT_OF_BOUNDS && !self.grid.contains(pos) {
            let fits = self
                .grid
                .size_covering(pos)
                .is_some_and(|(w, h)| i128::from(w) * i128::from(h) <= MAX_GRID_CELLS);
            if !fits {
                return Err(RuntimeError::CoordinateOutOfRange {
                    at: self.ip,
                    value: pos.to_string(),
                });
            }
        }

        let before = (self.grid.min(), self.grid.max());
        self.grid.set(pos, value);
        let after = (self.grid.min(), self.grid.max());
        if before != after {
            debug!(
                at = %pos,
                min = %after.0,
                max = %after.1,
                "grid resized"
            );
        }
        Ok(())
    }

    /// Take the next program argument (empty when none are left).
    pub(crate) fn next_arg(&mut self) -> String {
        self.args.pop_front().unwrap_or_default()
    }
}

//! Sparse tape memory.
//!
//! An unbounded two-sided array of integers where every unset cell reads
//! as -1. Two independent pointers index the same address space: the
//! memory pointer (used by Cardinal mode) and the register pointer (used
//! by Ordinal mode). A register is the run of non-sentinel cells starting
//! at the register pointer.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::collections::BTreeMap;

/// Value of every unset tape cell.
pub const TAPE_DEFAULT: i64 = -1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    /// Populated cells. A cell holding -1 is never stored.
    cells: BTreeMap<i64, BigInt>,
    /// Memory pointer.
    pub(crate) mp: i64,
    /// Register pointer.
    pub(crate) rp: i64,
}

fn is_default(value: &BigInt) -> bool {
    *value == BigInt::from(TAPE_DEFAULT)
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory_pointer(&self) -> i64 {
        self.mp
    }

    pub fn register_pointer(&self) -> i64 {
        self.rp
    }

    /// Read a cell (-1 when unset).
    pub fn get(&self, addr: i64) -> BigInt {
        self.cells
            .get(&addr)
            .cloned()
            .unwrap_or_else(|| BigInt::from(TAPE_DEFAULT))
    }

    /// Write a cell. Writing -1 clears it.
    pub fn set(&mut self, addr: i64, value: BigInt) {
        if is_default(&value) {
            self.cells.remove(&addr);
        } else {
            self.cells.insert(addr, value);
        }
    }

    /// Populated cells in address order.
    pub fn cells(&self) -> impl Iterator<Item = (i64, &BigInt)> {
        self.cells.iter().map(|(&addr, value)| (addr, value))
    }

    fn is_set(&self, addr: i64) -> bool {
        self.cells.contains_key(&addr)
    }

    // ---- memory pointer -------------------------------------------------

    pub fn store(&mut self, value: BigInt) {
        self.set(self.mp, value);
    }

    pub fn fetch(&self) -> BigInt {
        self.get(self.mp)
    }

    /// Move the memory pointer to the nearest cell to the left holding
    /// `value`. Searching for -1 finds the nearest unset cell; any other
    /// value is only searched for within the populated range, and the
    /// pointer stays put when there is no match.
    pub fn seek_left(&mut self, value: &BigInt) {
        if is_default(value) {
            let mut addr = self.mp - 1;
            while self.is_set(addr) {
                addr -= 1;
            }
            self.mp = addr;
        } else if let Some((&addr, _)) = self
            .cells
            .range(..self.mp)
            .rev()
            .find(|(_, cell)| *cell == value)
        {
            self.mp = addr;
        }
    }

    /// Mirror image of [`Tape::seek_left`].
    pub fn seek_right(&mut self, value: &BigInt) {
        if is_default(value) {
            let mut addr = self.mp + 1;
            while self.is_set(addr) {
                addr += 1;
            }
            self.mp = addr;
        } else if let Some((&addr, _)) = self
            .cells
            .range(self.mp + 1..)
            .find(|(_, cell)| *cell == value)
        {
            self.mp = addr;
        }
    }

    // ---- registers ------------------------------------------------------

    /// Store `text` at the register pointer, one code point per cell,
    /// followed by a -1 terminator. The pointer does not move.
    pub fn write_register(&mut self, text: &str) {
        let mut addr = self.rp;
        for c in text.chars() {
            self.set(addr, BigInt::from(c as u32));
            addr += 1;
        }
        self.set(addr, BigInt::from(TAPE_DEFAULT));
    }

    /// Read the register at the register pointer, stopping at the first
    /// cell that is not a character.
    pub fn read_register(&self) -> String {
        let mut text = String::new();
        let mut addr = self.rp;
        while let Some(c) = self
            .cells
            .get(&addr)
            .and_then(ToPrimitive::to_u32)
            .and_then(char::from_u32)
        {
            text.push(c);
            addr += 1;
        }
        text
    }

    /// Move the register pointer past the current register and its
    /// terminator.
    pub fn next_register(&mut self) {
        while self.is_set(self.rp) {
            self.rp += 1;
        }
        self.rp += 1;
    }

    /// Move the register pointer to the start of the previous register.
    pub fn previous_register(&mut self) {
        self.rp -= 2;
        while self.is_set(self.rp) {
            self.rp -= 1;
        }
        self.rp += 1;
    }
}

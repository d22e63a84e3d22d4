//! Cardinal mode: the integer command set.
//!
//! Binary operators pop `b` first, then `a`, and push `a op b`.

use crate::error::RuntimeError;
use crate::io;
use crate::machine::VM;
use crate::numeric::{self, PowerError};
use crate::opcode::CardinalOp;
use alice_common::{Direction, Value, Vector2D};
use num_bigint::{BigInt, RandBigInt};
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use std::time::Duration;

impl<'a> VM<'a> {
    pub(crate) fn exec_cardinal(&mut self, op: CardinalOp) -> Result<(), RuntimeError> {
        match op {
            CardinalOp::Digit(d) => self.push(i64::from(d)),

            // ---- Arithmetic ----
            CardinalOp::Add => self.exec_binary(|a, b| a + b),
            CardinalOp::Subtract => self.exec_binary(|a, b| a - b),
            CardinalOp::Multiply => self.exec_binary(|a, b| a * b),
            CardinalOp::Divide => {
                let (a, b) = self.pop_pair();
                let q = numeric::floor_div(&a, &b).ok_or(self.division_by_zero())?;
                self.push(q);
            }
            CardinalOp::Modulo => {
                let (a, b) = self.pop_pair();
                let r = numeric::floor_mod(&a, &b).ok_or(self.division_by_zero())?;
                self.push(r);
            }
            CardinalOp::DivMod => {
                let (a, b) = self.pop_pair();
                if b.is_zero() {
                    return Err(self.division_by_zero());
                }
                let (q, r) = a.div_mod_floor(&b);
                self.push(q);
                self.push(r);
            }
            CardinalOp::FloorToMultiple => {
                let (a, b) = self.pop_pair();
                let r = numeric::floor_mod(&a, &b).ok_or(self.division_by_zero())?;
                self.push(a - r);
            }
            CardinalOp::Increment => self.exec_unary(|n| n + 1),
            CardinalOp::Decrement => self.exec_unary(|n| n - 1),
            CardinalOp::Abs => self.exec_unary(|n| n.abs()),
            CardinalOp::Negate => self.exec_unary(|n| -n),

            // ---- Bits ----
            CardinalOp::BitAnd => self.exec_binary(|a, b| a & b),
            CardinalOp::BitOr => self.exec_binary(|a, b| a | b),
            CardinalOp::BitXor => self.exec_binary(|a, b| a ^ b),
            CardinalOp::BitNot => self.exec_unary(|n| !n),
            CardinalOp::HighestBit => self.exec_unary(|n| numeric::highest_bit(&n)),
            CardinalOp::FillBits => self.exec_unary(|n| numeric::fill_bits(&n)),

            // ---- Number theory ----
            CardinalOp::Power => {
                let (a, b) = self.pop_pair();
                let value = numeric::power(&a, &b).map_err(|e| match e {
                    PowerError::DivisionByZero => self.division_by_zero(),
                    PowerError::TooLarge => RuntimeError::ExponentTooLarge {
                        at: self.ip,
                        value: b.to_string(),
                    },
                })?;
                self.push(value);
            }
            CardinalOp::Factorial => self.exec_unary(|n| numeric::factorial(&n)),
            CardinalOp::Binomial => self.exec_binary(|a, b| numeric::binomial(&a, &b)),
            CardinalOp::PrimeFactors => {
                let n = self.pop_int();
                for p in numeric::prime_factors(&n) {
                    self.push(p);
                }
            }
            CardinalOp::FactorPairs => {
                let n = self.pop_int();
                for (p, e) in numeric::factor_pairs(&n) {
                    self.push(p);
                    self.push(BigInt::from(e));
                }
            }
            CardinalOp::Radical => self.exec_unary(|n| numeric::radical(&n)),
            CardinalOp::ReplaceDivisor => {
                let c = self.pop_int();
                let (a, b) = self.pop_pair();
                self.push(numeric::replace_divisor(&a, &b, &c));
            }
            CardinalOp::Divisors => {
                let n = self.pop_int();
                for d in numeric::divisors(&n) {
                    self.push(d);
                }
            }
            CardinalOp::Gcd => self.exec_binary(|a, b| numeric::gcd(&a, &b)),
            CardinalOp::Lcm => self.exec_binary(|a, b| numeric::lcm(&a, &b)),
            CardinalOp::Divides => self.exec_binary(|a, b| numeric::divides(&a, &b)),
            CardinalOp::Pack => self.exec_binary(|a, b| numeric::pack(&a, &b)),
            CardinalOp::Unpack => {
                let n = self.pop_int();
                let (a, b) = numeric::unpack(&n);
                self.push(a);
                self.push(b);
            }

            // ---- Constants and stack ----
            CardinalOp::LogicalNot => {
                let n = self.pop_int();
                self.push(i64::from(n.is_zero()));
            }
            CardinalOp::Ten => self.push(10),
            CardinalOp::MinusOne => self.push(-1),
            CardinalOp::Depth => {
                let depth = BigInt::from(self.stack.len());
                self.push(depth);
            }
            CardinalOp::Rotate => self.exec_rotate(),

            // ---- Control flow ----
            CardinalOp::FaceWest => self.dir = Direction::West,
            CardinalOp::FaceEast => self.dir = Direction::East,
            CardinalOp::FaceNorth => self.dir = Direction::North,
            CardinalOp::FaceSouth => self.dir = Direction::South,
            CardinalOp::TurnLeft => self.dir = self.dir.left90(),
            CardinalOp::TurnRight => self.dir = self.dir.right90(),
            CardinalOp::SignTurn => {
                let n = self.pop_int();
                if n.is_negative() {
                    self.dir = self.dir.left90();
                } else if n.is_positive() {
                    self.dir = self.dir.right90();
                }
            }
            CardinalOp::SkipIfZero => {
                if self.pop_int().is_zero() {
                    self.skip_next();
                }
            }
            CardinalOp::Call => {
                let target = self.pop_coordinates()?;
                self.call(target);
            }
            CardinalOp::Jump => {
                let target = self.pop_coordinates()?;
                self.jump(target);
            }

            // ---- Grid ----
            CardinalOp::GetCell => {
                let pos = self.pop_coordinates()?;
                let cell = self.grid.get(pos);
                self.push(cell);
            }
            CardinalOp::PutCell => {
                let v = self.pop_int();
                let pos = self.pop_coordinates()?;
                let value = v.to_i64().ok_or_else(|| RuntimeError::CellOutOfRange {
                    at: self.ip,
                    value: v.to_string(),
                })?;
                self.put_cell(pos, value)?;
            }

            // ---- Tape ----
            CardinalOp::Store => {
                let n = self.pop_int();
                self.tape.store(n);
            }
            CardinalOp::Fetch => {
                let n = self.tape.fetch();
                self.push(n);
            }
            CardinalOp::MemoryLeft => self.tape.mp -= 1,
            CardinalOp::MemoryRight => self.tape.mp += 1,
            CardinalOp::SeekLeft => {
                let n = self.pop_int();
                self.tape.seek_left(&n);
            }
            CardinalOp::SeekRight => {
                let n = self.pop_int();
                self.tape.seek_right(&n);
            }
            CardinalOp::MemoryPointer => self.push(self.tape.mp),

            // ---- I/O ----
            CardinalOp::ReadByte => {
                let byte = io::read_byte(&mut *self.input)?;
                self.push(byte.map_or(-1, i64::from));
            }
            CardinalOp::ReadChar => {
                let c = io::read_char(&mut *self.input)?;
                self.push(c.map_or(-1, |c| c as i64));
            }
            CardinalOp::WriteByte => {
                let n = self.pop_int();
                let byte = n.mod_floor(&BigInt::from(256)).to_u8().unwrap_or_default();
                io::write_byte(&mut *self.output, byte)?;
            }
            CardinalOp::WriteChar => {
                let n = self.pop_int();
                let c = n.to_u32().and_then(char::from_u32).ok_or_else(|| {
                    RuntimeError::InvalidCodePoint {
                        at: self.ip,
                        value: n.to_string(),
                    }
                })?;
                io::write_char(&mut *self.output, c)?;
            }
            CardinalOp::ArgCount => {
                let count = BigInt::from(self.args.len());
                self.push(count);
            }

            // ---- Environment ----
            CardinalOp::Random => {
                let n = self.pop_int();
                let zero = BigInt::zero();
                let value = if n.is_positive() {
                    self.rng.gen_bigint_range(&zero, &n)
                } else if n.is_negative() {
                    -self.rng.gen_bigint_range(&zero, &-n)
                } else {
                    zero
                };
                self.push(value);
            }
            CardinalOp::Sleep => {
                let n = self.pop_int();
                let millis = if n.is_negative() {
                    0
                } else {
                    n.to_u64().unwrap_or(u64::MAX)
                };
                std::thread::sleep(Duration::from_millis(millis));
            }
        }
        Ok(())
    }

    /// Pop `b`, then `a`.
    fn pop_pair(&mut self) -> (BigInt, BigInt) {
        let b = self.pop_int();
        let a = self.pop_int();
        (a, b)
    }

    /// Pop `y`, then `x`.
    fn pop_coordinates(&mut self) -> Result<Vector2D, RuntimeError> {
        let (x, y) = self.pop_pair();
        let coordinate = |n: BigInt| {
            n.to_i64().ok_or_else(|| RuntimeError::CoordinateOutOfRange {
                at: self.ip,
                value: n.to_string(),
            })
        };
        Ok(Vector2D::new(coordinate(x)?, coordinate(y)?))
    }

    fn division_by_zero(&self) -> RuntimeError {
        RuntimeError::DivisionByZero { at: self.ip }
    }

    fn exec_unary(&mut self, f: impl FnOnce(BigInt) -> BigInt) {
        let n = self.pop_int();
        self.push(f(n));
    }

    fn exec_binary(&mut self, f: impl FnOnce(BigInt, BigInt) -> BigInt) {
        let (a, b) = self.pop_pair();
        self.push(f(a, b));
    }

    /// `n ≥ 0` brings the value at depth `n` to the top; `n < 0` sinks the
    /// top value to depth `-n`. Depths past the bottom read as 0 or insert
    /// at the bottom.
    fn exec_rotate(&mut self) {
        let n = self.pop_int();
        let depth = n.abs().to_usize().unwrap_or(usize::MAX);
        if !n.is_negative() {
            if depth < self.stack.len() {
                let value = self.stack.remove(self.stack.len() - 1 - depth);
                self.stack.push(value);
            } else {
                self.push(0);
            }
        } else {
            let value = self.pop_raw().unwrap_or_else(|| Value::from(0i64));
            let index = self.stack.len().saturating_sub(depth);
            self.stack.insert(index, value);
        }
    }
}

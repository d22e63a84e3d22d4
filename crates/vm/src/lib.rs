//! Alice virtual machine: runs two-mode, self-modifying grid programs.
//!
//! The VM moves an instruction pointer over a [`Grid`] of code points.
//! In Cardinal mode it travels orthogonally, wraps around the edges and
//! treats the stack as integers; in Ordinal mode it travels diagonally,
//! bounces off the edges and treats the stack as strings. The mirrors
//! `/` and `\` switch between the two.
//!
//! # Usage
//!
//! ```
//! use alice_vm::{run, Config, Outcome};
//!
//! let mut input: &[u8] = b"";
//! let mut output = Vec::new();
//! let outcome = run(
//!     "/\"Hello\"o@",
//!     &mut input,
//!     &mut output,
//!     Vec::<String>::new(),
//!     Config::default(),
//! )
//! .unwrap();
//! assert_eq!(outcome, Outcome::Terminated);
//! assert_eq!(output, b"Hello");
//! ```
//!
//! [`Grid`]: alice_common::Grid

pub mod cardinal;
pub mod config;
pub mod dump;
pub mod error;
pub mod execute;
pub mod io;
pub mod label;
pub mod machine;
pub mod mode;
pub mod numeric;
pub mod opcode;
pub mod ordinal;
pub mod tape;
pub mod text;

pub use config::Config;
pub use error::RuntimeError;
pub use execute::Outcome;
pub use machine::{Repetition, VM};
pub use mode::Mode;

use alice_common::Grid;
use std::io::{BufRead, Write};

/// Parse `source` and run it to completion (or until the tick budget in
/// `config` is exhausted).
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution fails (division by zero, invalid
/// output code point, host I/O failure, etc.).
pub fn run<I, S>(
    source: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    args: I,
    config: Config,
) -> Result<Outcome, RuntimeError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut vm = VM::new(Grid::parse(source), input, output, config).with_args(args);
    vm.run()
}

#[cfg(test)]
mod proptests {
    use super::*;
    use num_bigint::BigInt;
    use proptest::prelude::*;

    proptest! {
        /// Packing two integers and unpacking the result gives them back.
        #[test]
        fn pack_unpack_roundtrip(a in any::<i64>(), b in any::<i64>()) {
            let (a, b) = (BigInt::from(a), BigInt::from(b));
            let packed = numeric::pack(&a, &b);
            prop_assert_eq!(numeric::unpack(&packed), (a, b));
        }

        /// Prime factors multiply back to the input.
        #[test]
        fn prime_factors_multiply_back(n in 2i64..100_000) {
            let n = BigInt::from(n);
            let product: BigInt = numeric::prime_factors(&n).iter().product();
            prop_assert_eq!(product, n);
        }

        /// Floored division and modulo satisfy `a = q·b + r` with `r`
        /// taking the sign of `b`.
        #[test]
        fn floored_division_identity(a in any::<i32>(), b in any::<i32>()) {
            prop_assume!(b != 0);
            let (a, b) = (BigInt::from(a), BigInt::from(b));
            let q = numeric::floor_div(&a, &b).unwrap();
            let r = numeric::floor_mod(&a, &b).unwrap();
            prop_assert_eq!(&q * &b + &r, a);
            prop_assert!(r == BigInt::from(0) || (r < BigInt::from(0)) == (b < BigInt::from(0)));
        }

        /// Reading a register returns what was written to it.
        #[test]
        fn register_roundtrip(s in "[a-zA-Z0-9 ]{0,12}", rp in -5i64..5) {
            let mut tape = tape::Tape::new();
            tape.rp = rp;
            tape.write_register(&s);
            prop_assert_eq!(tape.read_register(), s);
        }

        /// Permuting a string by a key never loses or invents characters.
        #[test]
        fn permute_is_a_permutation(a in "[a-z]{0,10}", key in "[a-z]{0,10}") {
            let mut before: Vec<char> = a.chars().collect();
            let mut after: Vec<char> = text::permute(&a, &key).chars().collect();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }

        /// Any program the VM accepts runs without panicking inside a
        /// small tick budget.
        #[test]
        fn bounded_runs_never_panic(src in "[0-9a+\\-@/\\\\_|<>^v\" hdt]{1,12}") {
            let mut input: &[u8] = b"";
            let mut output = Vec::new();
            let _ = run(
                &src,
                &mut input,
                &mut output,
                Vec::<String>::new(),
                Config::default().with_max_ticks(200).with_seed(0),
            );
        }
    }
}

//! Runtime value representation for the interpreter stack.
//!
//! A stack slot holds either an arbitrary-precision integer or a string.
//! Which one an operation sees is decided by the active mode when it pops:
//! Cardinal mode wants integers, Ordinal mode wants text.

use num_bigint::BigInt;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static DECIMAL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9]+").expect("decimal run pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Integer(BigInt),
    Text(String),
}

impl Value {
    /// The value in its Ordinal (string) form. Integers are rendered in
    /// decimal.
    pub fn into_text(self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Text(s) => s,
        }
    }
}

/// Every maximal signed decimal run in `text`, in order of appearance.
///
/// `"12abc-3"` yields `[12, -3]`; a string without digits yields nothing.
pub fn decimal_runs(text: &str) -> Vec<BigInt> {
    DECIMAL_RUN
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<BigInt>().ok())
        .collect()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

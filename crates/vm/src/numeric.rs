//! Integer kernels behind the Cardinal command set.
//!
//! Everything here is a pure function over arbitrary-precision integers.
//! The handful of operations that can fail return `Option`/`Result` and
//! leave it to the dispatcher to attach the IP position.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Why [`power`] could not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerError {
    /// Zero raised to a negative exponent.
    DivisionByZero,
    /// The exponent does not fit in a `u32` and the base is not trivial.
    TooLarge,
}

/// Floored division, `None` when `b` is zero.
pub fn floor_div(a: &BigInt, b: &BigInt) -> Option<BigInt> {
    (!b.is_zero()).then(|| a.div_floor(b))
}

/// Floored modulo (result has the sign of `b`), `None` when `b` is zero.
pub fn floor_mod(a: &BigInt, b: &BigInt) -> Option<BigInt> {
    (!b.is_zero()).then(|| a.mod_floor(b))
}

/// Keep only the most significant set bit. Negative numbers keep only
/// their most significant clear bit.
pub fn highest_bit(n: &BigInt) -> BigInt {
    if n.is_negative() {
        return !highest_bit(&!n);
    }
    if n.is_zero() {
        return BigInt::zero();
    }
    BigInt::one() << (n.bits() - 1)
}

/// Set every bit below the most significant set bit.
pub fn fill_bits(n: &BigInt) -> BigInt {
    if n.is_negative() {
        return !fill_bits(&!n);
    }
    (BigInt::one() << n.bits()) - 1
}

fn minus_one_pow(exp: &BigInt) -> BigInt {
    if exp.is_odd() {
        BigInt::from(-1)
    } else {
        BigInt::one()
    }
}

/// `a` to the power `b`. A negative exponent yields `floor(1 / a^|b|)`.
pub fn power(a: &BigInt, b: &BigInt) -> Result<BigInt, PowerError> {
    if b.is_negative() {
        if a.is_zero() {
            return Err(PowerError::DivisionByZero);
        }
        if a.is_one() {
            return Ok(BigInt::one());
        }
        if *a == BigInt::from(-1) {
            return Ok(minus_one_pow(b));
        }
        // |a^|b|| > 1, so the reciprocal floors to 0 or -1 by sign.
        return Ok(if a.is_negative() && b.is_odd() {
            BigInt::from(-1)
        } else {
            BigInt::zero()
        });
    }

    match b.to_u32() {
        Some(exp) => Ok(a.pow(exp)),
        None if a.is_zero() || a.is_one() => Ok(a.clone()),
        None if *a == BigInt::from(-1) => Ok(minus_one_pow(b)),
        None => Err(PowerError::TooLarge),
    }
}

/// `n!` for `n >= 0`; for negative `n` the falling product `n·(n+1)·…·(−1)`.
pub fn factorial(n: &BigInt) -> BigInt {
    let mut result = BigInt::one();
    if n.is_negative() {
        let mut k = n.clone();
        while k.is_negative() {
            result *= &k;
            k += 1;
        }
    } else {
        let mut k = BigInt::from(2);
        while &k <= n {
            result *= &k;
            k += 1;
        }
    }
    result
}

/// Generalised binomial coefficient `C(n, k)`, 0 for negative `k`.
pub fn binomial(n: &BigInt, k: &BigInt) -> BigInt {
    if k.is_negative() {
        return BigInt::zero();
    }
    let mut k = k.clone();
    if !n.is_negative() {
        if &k > n {
            return BigInt::zero();
        }
        let complement = n - &k;
        if complement < k {
            k = complement;
        }
    }

    let mut result = BigInt::one();
    let mut i = BigInt::zero();
    while i < k {
        result = result * (n - &i) / (&i + 1);
        i += 1;
    }
    result
}

/// Prime factors in ascending order with multiplicity. Negative numbers
/// start with -1, 0 factors as `[0]` and 1 has no factors.
pub fn prime_factors(n: &BigInt) -> Vec<BigInt> {
    let mut factors = Vec::new();
    if n.is_zero() {
        factors.push(BigInt::zero());
        return factors;
    }
    if n.is_negative() {
        factors.push(BigInt::from(-1));
    }

    let mut rest = n.abs();
    let mut d = BigInt::from(2);
    while &d * &d <= rest {
        while rest.is_multiple_of(&d) {
            factors.push(d.clone());
            rest /= &d;
        }
        let step = if d == BigInt::from(2) { 1 } else { 2 };
        d += step;
    }
    if rest > BigInt::one() {
        factors.push(rest);
    }
    factors
}

/// Prime factorization as `(prime, exponent)` pairs.
pub fn factor_pairs(n: &BigInt) -> Vec<(BigInt, u64)> {
    let mut pairs: Vec<(BigInt, u64)> = Vec::new();
    for p in prime_factors(n) {
        match pairs.last_mut() {
            Some((last, count)) if *last == p => *count += 1,
            _ => pairs.push((p, 1)),
        }
    }
    pairs
}

/// Product of the distinct prime factors, keeping the sign of `n`.
pub fn radical(n: &BigInt) -> BigInt {
    if n.is_zero() {
        return BigInt::zero();
    }
    let product: BigInt = factor_pairs(&n.abs())
        .into_iter()
        .map(|(p, _)| p)
        .product();
    if n.is_negative() {
        -product
    } else {
        product
    }
}

/// Replace every factor `b` of `a` by `c`.
pub fn replace_divisor(a: &BigInt, b: &BigInt, c: &BigInt) -> BigInt {
    if a.is_zero() || b.abs() <= BigInt::one() {
        return a.clone();
    }
    let mut rest = a.clone();
    let mut replacement = BigInt::one();
    while rest.is_multiple_of(b) {
        rest /= b;
        replacement *= c;
    }
    rest * replacement
}

/// Divisors of `|n|` in ascending order. 0 has none.
pub fn divisors(n: &BigInt) -> Vec<BigInt> {
    let n = n.abs();
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = BigInt::one();
    while &d * &d <= n {
        if n.is_multiple_of(&d) {
            let cofactor = &n / &d;
            if cofactor != d {
                large.push(cofactor);
            }
            small.push(d.clone());
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    a.gcd(b).abs()
}

pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    a.lcm(b).abs()
}

/// `b` if it divides `a`, otherwise 0.
pub fn divides(a: &BigInt, b: &BigInt) -> BigInt {
    if !b.is_zero() && a.is_multiple_of(b) {
        b.clone()
    } else {
        BigInt::zero()
    }
}

/// Map ℤ onto ℕ: 0, -1, 1, -2, 2, … → 0, 1, 2, 3, 4, …
fn fold(z: &BigInt) -> BigInt {
    if z.is_negative() {
        -(z * 2u32) - 1u32
    } else {
        z * 2
    }
}

/// Inverse of [`fold`].
fn unfold(n: &BigInt) -> BigInt {
    if n.is_odd() {
        -((n + 1u32) / 2u32)
    } else {
        n / 2
    }
}

/// Encode a pair of integers as one integer (Cantor pairing on the
/// folded values, unfolded again).
pub fn pack(a: &BigInt, b: &BigInt) -> BigInt {
    let (p, q) = (fold(a), fold(b));
    let w = &p + &q;
    let pair = (&w * (&w + 1)) / 2 + q;
    unfold(&pair)
}

/// Inverse of [`pack`].
pub fn unpack(n: &BigInt) -> (BigInt, BigInt) {
    let m = fold(n);
    let w = ((&m * 8u32 + 1u32).sqrt() - 1u32) / 2u32;
    let t = (&w * (&w + 1)) / 2;
    let q = &m - t;
    let p = w - &q;
    (unfold(&p), unfold(&q))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn bigs(ns: &[i64]) -> Vec<BigInt> {
        ns.iter().copied().map(BigInt::from).collect()
    }

    #[test]
    fn floored_division_and_modulo() {
        assert_eq!(floor_div(&big(7), &big(2)), Some(big(3)));
        assert_eq!(floor_div(&big(-7), &big(2)), Some(big(-4)));
        assert_eq!(floor_mod(&big(-7), &big(2)), Some(big(1)));
        assert_eq!(floor_mod(&big(7), &big(-2)), Some(big(-1)));
        assert_eq!(floor_div(&big(1), &big(0)), None);
        assert_eq!(floor_mod(&big(1), &big(0)), None);
    }

    #[test]
    fn bit_extremes() {
        assert_eq!(highest_bit(&big(0b101100)), big(0b100000));
        assert_eq!(highest_bit(&big(1)), big(1));
        assert_eq!(highest_bit(&big(0)), big(0));
        assert_eq!(highest_bit(&big(-1)), big(-1));
        // !(-6) = 5 → 4 → !4 = -5
        assert_eq!(highest_bit(&big(-6)), big(-5));

        assert_eq!(fill_bits(&big(0b100100)), big(0b111111));
        assert_eq!(fill_bits(&big(0)), big(0));
        assert_eq!(fill_bits(&big(-6)), big(-8));
    }

    #[test]
    fn powers() {
        assert_eq!(power(&big(3), &big(4)), Ok(big(81)));
        assert_eq!(power(&big(-2), &big(3)), Ok(big(-8)));
        assert_eq!(power(&big(5), &big(0)), Ok(big(1)));
        assert_eq!(power(&big(2), &big(-1)), Ok(big(0)));
        assert_eq!(power(&big(-2), &big(-1)), Ok(big(-1)));
        assert_eq!(power(&big(-2), &big(-2)), Ok(big(0)));
        assert_eq!(power(&big(1), &big(-5)), Ok(big(1)));
        assert_eq!(power(&big(-1), &big(-3)), Ok(big(-1)));
        assert_eq!(power(&big(0), &big(-1)), Err(PowerError::DivisionByZero));
    }

    #[test]
    fn huge_exponents() {
        let huge = big(1) << 40;
        assert_eq!(power(&big(1), &huge), Ok(big(1)));
        assert_eq!(power(&big(0), &huge), Ok(big(0)));
        assert_eq!(power(&big(-1), &huge), Ok(big(1)));
        assert_eq!(power(&big(-1), &(&huge + 1)), Ok(big(-1)));
        assert_eq!(power(&big(2), &huge), Err(PowerError::TooLarge));
    }

    #[test]
    fn factorials() {
        assert_eq!(factorial(&big(0)), big(1));
        assert_eq!(factorial(&big(5)), big(120));
        assert_eq!(factorial(&big(-1)), big(-1));
        assert_eq!(factorial(&big(-3)), big(-6));
        assert_eq!(factorial(&big(-4)), big(24));
        assert_eq!(factorial(&big(25)).to_string(), "15511210043330985984000000");
    }

    #[test]
    fn binomials() {
        assert_eq!(binomial(&big(5), &big(2)), big(10));
        assert_eq!(binomial(&big(5), &big(5)), big(1));
        assert_eq!(binomial(&big(5), &big(6)), big(0));
        assert_eq!(binomial(&big(5), &big(-1)), big(0));
        assert_eq!(binomial(&big(100), &big(98)), big(4950));
        // C(-2, 3) = (-2)(-3)(-4)/3! = -4
        assert_eq!(binomial(&big(-2), &big(3)), big(-4));
        assert_eq!(binomial(&big(-1), &big(4)), big(1));
    }

    #[test]
    fn factorization() {
        assert_eq!(prime_factors(&big(360)), bigs(&[2, 2, 2, 3, 3, 5]));
        assert_eq!(prime_factors(&big(-14)), bigs(&[-1, 2, 7]));
        assert_eq!(prime_factors(&big(97)), bigs(&[97]));
        assert_eq!(prime_factors(&big(0)), bigs(&[0]));
        assert!(prime_factors(&big(1)).is_empty());
        assert_eq!(prime_factors(&big(-1)), bigs(&[-1]));
    }

    #[test]
    fn factorization_pairs() {
        assert_eq!(factor_pairs(&big(360)), vec![(big(2), 3), (big(3), 2), (big(5), 1)]);
        assert_eq!(factor_pairs(&big(0)), vec![(big(0), 1)]);
        assert!(factor_pairs(&big(1)).is_empty());
    }

    #[test]
    fn radicals() {
        assert_eq!(radical(&big(360)), big(30));
        assert_eq!(radical(&big(-8)), big(-2));
        assert_eq!(radical(&big(1)), big(1));
        assert_eq!(radical(&big(0)), big(0));
    }

    #[test]
    fn divisor_replacement() {
        assert_eq!(replace_divisor(&big(24), &big(2), &big(5)), big(375));
        assert_eq!(replace_divisor(&big(24), &big(7), &big(5)), big(24));
        assert_eq!(replace_divisor(&big(24), &big(1), &big(5)), big(24));
        assert_eq!(replace_divisor(&big(0), &big(2), &big(5)), big(0));
    }

    #[test]
    fn divisor_lists() {
        assert_eq!(divisors(&big(12)), bigs(&[1, 2, 3, 4, 6, 12]));
        assert_eq!(divisors(&big(-9)), bigs(&[1, 3, 9]));
        assert_eq!(divisors(&big(1)), bigs(&[1]));
        assert!(divisors(&big(0)).is_empty());
    }

    #[test]
    fn gcd_lcm_divides() {
        assert_eq!(gcd(&big(-12), &big(18)), big(6));
        assert_eq!(gcd(&big(0), &big(0)), big(0));
        assert_eq!(lcm(&big(-4), &big(6)), big(12));
        assert_eq!(lcm(&big(0), &big(6)), big(0));
        assert_eq!(divides(&big(12), &big(4)), big(4));
        assert_eq!(divides(&big(12), &big(5)), big(0));
        assert_eq!(divides(&big(12), &big(0)), big(0));
    }

    #[test]
    fn folding_is_a_bijection_prefix() {
        let folded: Vec<BigInt> = (-3..=3).map(|z| fold(&big(z))).collect();
        assert_eq!(folded, bigs(&[5, 3, 1, 0, 2, 4, 6]));
        for n in 0..20 {
            assert_eq!(fold(&unfold(&big(n))), big(n));
        }
    }

    #[test]
    fn pack_small_values() {
        assert_eq!(pack(&big(0), &big(0)), big(0));
        assert_eq!(unpack(&big(0)), (big(0), big(0)));
        assert_eq!(unpack(&pack(&big(-7), &big(12))), (big(-7), big(12)));
    }
}

//! Spectrum values that remember how they were built.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Mul;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use spectrum_core::numeric::{lcm, lcm_all};
use spectrum_core::Integer;

/// Sign `e_i` of a term `q^{n_i} + e_i`.
///
/// `Minus` orders before `Plus`, so sorted terms list `q^k - 1` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Minus,
    Plus,
}

impl Sign {
    pub fn flip(self) -> Sign {
        match self {
            Sign::Minus => Sign::Plus,
            Sign::Plus => Sign::Minus,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Minus => write!(f, "-"),
            Sign::Plus => write!(f, "+"),
        }
    }
}

/// `q^n + 1` or `q^n - 1`. Evaluates to 0 for `q^n - 1` with `q = 0`.
pub fn term(q: u64, n: u32, sign: Sign) -> BigUint {
    let power = BigUint::from(q).pow(n);
    match sign {
        Sign::Plus => power + 1u32,
        Sign::Minus if power.is_zero() => power,
        Sign::Minus => power - 1u32,
    }
}

/// `quotient * lcm(q^{n_1} + e_1, ..., q^{n_k} + e_k)`.
///
/// The value is computed once at construction. The quotient, base and
/// `(n_i, e_i)` pairs are kept for rendering only; comparisons and hashing
/// use the value.
#[derive(Debug, Clone)]
pub struct SpectraElement {
    value: BigUint,
    quotient: Integer,
    q: u64,
    partition: Vec<u32>,
    signs: Vec<Sign>,
}

impl SpectraElement {
    /// Pairs `partition[i]` with `signs[i]`; extra entries of the longer
    /// list are ignored.
    pub fn new(quotient: impl Into<Integer>, q: u64, partition: Vec<u32>, signs: Vec<Sign>) -> Self {
        let quotient = quotient.into();
        let mut partition = partition;
        let mut signs = signs;
        let len = partition.len().min(signs.len());
        partition.truncate(len);
        signs.truncate(len);

        let terms: Vec<BigUint> = partition
            .iter()
            .zip(&signs)
            .map(|(&n, &sign)| term(q, n, sign))
            .collect();
        let lcm_value = lcm_all(&terms);
        SpectraElement {
            value: quotient.value() * lcm_value,
            quotient,
            q,
            partition,
            signs,
        }
    }

    /// A bare quotient with no `q`-terms.
    pub fn from_quotient(quotient: impl Into<Integer>) -> Self {
        SpectraElement::new(quotient, 0, Vec::new(), Vec::new())
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    pub fn quotient(&self) -> &Integer {
        &self.quotient
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn partition(&self) -> &[u32] {
        &self.partition
    }

    pub fn signs(&self) -> &[Sign] {
        &self.signs
    }

    /// Least common multiple of both values. Quotients are multiplied and
    /// the terms concatenated; the base of `self` is kept.
    pub fn lcm(&self, other: &SpectraElement) -> SpectraElement {
        let mut partition = self.partition.clone();
        partition.extend_from_slice(&other.partition);
        let mut signs = self.signs.clone();
        signs.extend_from_slice(&other.signs);
        SpectraElement {
            value: lcm(&self.value, &other.value),
            quotient: &self.quotient * &other.quotient,
            q: self.q,
            partition,
            signs,
        }
    }

    /// Human readable form, e.g. `3 * [2^2 + 1, 2^3 - 1, 2^4 + 1]`.
    pub fn str_verbose(&self) -> String {
        let quotient = if self.quotient.value().is_one() {
            String::new()
        } else {
            self.quotient.to_factorized_string()
        };
        let terms = self.render_terms(false, |k| format!("^{}", k));
        [quotient, terms]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" * ")
    }

    /// LaTeX form with terms in descending order, e.g.
    /// `3 [2^{12} + 1, 2^3 - 1]`.
    pub fn str_latex(&self) -> String {
        let quotient = if self.quotient.value().is_one() {
            String::new()
        } else {
            self.quotient.to_latex()
        };
        let terms = self.render_terms(true, |k| {
            if k < 10 {
                format!("^{}", k)
            } else {
                format!("^{{{}}}", k)
            }
        });
        [quotient, terms]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render_terms(&self, descending: bool, power: impl Fn(u32) -> String) -> String {
        let mut pairs: Vec<(u32, Sign)> = self
            .partition
            .iter()
            .copied()
            .zip(self.signs.iter().copied())
            .collect();
        pairs.sort();
        if descending {
            pairs.reverse();
        }
        let joined = pairs
            .iter()
            .map(|&(n, sign)| {
                let exponent = if n > 1 { power(n) } else { String::new() };
                format!("{}{} {} 1", self.q, exponent, sign)
            })
            .collect::<Vec<_>>()
            .join(", ");

        match pairs.len() {
            0 => String::new(),
            1 if self.quotient.value().is_one() => joined,
            1 => format!("({})", joined),
            _ => format!("[{}]", joined),
        }
    }
}

impl PartialEq for SpectraElement {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for SpectraElement {}

impl PartialOrd for SpectraElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SpectraElement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for SpectraElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for SpectraElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<SpectraElement> for BigUint {
    fn from(element: SpectraElement) -> BigUint {
        element.value
    }
}

/// Scales the quotient.
impl Mul<&BigUint> for SpectraElement {
    type Output = SpectraElement;

    fn mul(mut self, factor: &BigUint) -> SpectraElement {
        self.value *= factor;
        self.quotient *= factor.clone();
        self
    }
}

impl Mul<u64> for SpectraElement {
    type Output = SpectraElement;

    fn mul(self, factor: u64) -> SpectraElement {
        self * &BigUint::from(factor)
    }
}

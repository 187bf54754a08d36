//! Arbitrary precision integer carrying a lazily expanded factorization.
//!
//! Products of group-order factors such as `q^k - 1` are accumulated as
//! unexpanded atoms; trial division only runs when [`Integer::factorize`]
//! is called or a single prime has to be removed.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Mul, MulAssign, Rem};

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::SpectrumError;
use crate::numeric::{factorize_number, remove_factor};

/// State of one entry of the factor map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    /// Not yet factorized; may be composite.
    Pending,
    /// Produced by factorization, known to be prime.
    Prime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AtomEntry {
    kind: Atom,
    exponent: u32,
}

/// An integer together with a partial factorization.
///
/// The product of `atom^exponent` over all entries always equals the
/// value. Equality, ordering and hashing only look at the value.
#[derive(Debug, Clone)]
pub struct Integer {
    value: BigUint,
    atoms: BTreeMap<BigUint, AtomEntry>,
}

impl Integer {
    /// The integer 1, with an empty factorization.
    pub fn one() -> Self {
        Integer {
            value: BigUint::one(),
            atoms: BTreeMap::new(),
        }
    }

    /// Wraps `value` as a single unexpanded atom.
    pub fn new(value: impl Into<BigUint>) -> Self {
        let value: BigUint = value.into();
        let mut integer = Integer::one();
        integer *= value;
        integer
    }

    /// Builds `a_1^e_1 * a_2^e_2 * ...` from `(atom, exponent)` pairs. Atoms
    /// need not be prime; entries with exponent 0 are skipped.
    pub fn from_factors<T, I>(factors: I) -> Self
    where
        T: Into<BigUint>,
        I: IntoIterator<Item = (T, u32)>,
    {
        let mut integer = Integer::one();
        for (atom, exponent) in factors {
            let atom = atom.into();
            integer.value *= atom.pow(exponent);
            integer.insert_atom(atom, exponent, Atom::Pending);
        }
        integer
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    /// Current factor map: known primes and pending atoms with their
    /// exponents.
    pub fn factors(&self) -> BTreeMap<BigUint, u32> {
        self.atoms
            .iter()
            .map(|(atom, entry)| (atom.clone(), entry.exponent))
            .collect()
    }

    /// Whether every atom is a known prime.
    pub fn is_factorized(&self) -> bool {
        self.atoms.values().all(|entry| entry.kind == Atom::Prime)
    }

    /// Expands every pending atom and returns the prime factorization.
    pub fn factorize(&mut self) -> BTreeMap<BigUint, u32> {
        let pending: Vec<(BigUint, u32)> = self
            .atoms
            .iter()
            .filter(|(atom, entry)| entry.kind == Atom::Pending && !atom.is_zero())
            .map(|(atom, entry)| (atom.clone(), entry.exponent))
            .collect();

        for (atom, exponent) in pending {
            self.atoms.remove(&atom);
            log::trace!("factorizing atom {}^{}", atom, exponent);
            for (prime, power) in factorize_number(&atom) {
                self.insert_atom(prime, power * exponent, Atom::Prime);
            }
        }
        self.factors()
    }

    /// Divides by `prime` once.
    ///
    /// A matching entry loses one multiplicity directly; otherwise the
    /// smallest pending atom divisible by `prime` is split into a power of
    /// `prime` and its cofactor. Fails without touching the value when no
    /// atom is divisible by `prime`.
    pub fn div_by_prime(&mut self, prime: &BigUint) -> Result<(), SpectrumError> {
        if *prime <= BigUint::one() {
            return Err(self.not_dividing(prime));
        }

        if let Some(entry) = self.atoms.get_mut(prime) {
            entry.exponent -= 1;
            if entry.exponent == 0 {
                self.atoms.remove(prime);
            }
            self.value /= prime;
            return Ok(());
        }

        let atom = self
            .atoms
            .iter()
            .find(|(atom, entry)| entry.kind == Atom::Pending && (*atom % prime).is_zero())
            .map(|(atom, _)| atom.clone());
        let Some(atom) = atom else {
            return Err(self.not_dividing(prime));
        };

        let Some(entry) = self.atoms.remove(&atom) else {
            return Err(self.not_dividing(prime));
        };
        let (power, rest) = remove_factor(&atom, prime);
        self.insert_atom(prime.clone(), power * entry.exponent - 1, Atom::Prime);
        self.insert_atom(rest, entry.exponent, Atom::Pending);
        self.value /= prime;
        Ok(())
    }

    /// Factorized representation, e.g. `2^10 * 3^7 * 5`.
    pub fn to_factorized_string(&self) -> String {
        self.render(" * ", |k| format!("^{}", k))
    }

    /// LaTeX representation, e.g. `2^{10} \cdot 3^7 \cdot 5`.
    pub fn to_latex(&self) -> String {
        self.render(
            " \\cdot ",
            |k| if k < 10 { format!("^{}", k) } else { format!("^{{{}}}", k) },
        )
    }

    fn render(&self, separator: &str, power: impl Fn(u32) -> String) -> String {
        let mut factorized = self.clone();
        let factors = factorized.factorize();
        if factors.is_empty() {
            return self.value.to_string();
        }
        factors
            .iter()
            .map(|(prime, &exponent)| {
                if exponent > 1 {
                    format!("{}{}", prime, power(exponent))
                } else {
                    prime.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn not_dividing(&self, prime: &BigUint) -> SpectrumError {
        SpectrumError::PrimeNotDividing {
            prime: prime.clone(),
            value: self.value.clone(),
        }
    }

    fn insert_atom(&mut self, atom: BigUint, exponent: u32, kind: Atom) {
        if exponent == 0 || atom.is_one() {
            return;
        }
        let entry = self.atoms.entry(atom).or_insert(AtomEntry { kind, exponent: 0 });
        entry.exponent += exponent;
        if kind == Atom::Prime {
            entry.kind = Atom::Prime;
        }
    }
}

impl Default for Integer {
    fn default() -> Self {
        Integer::one()
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Integer::new(value)
    }
}

impl From<BigUint> for Integer {
    fn from(value: BigUint) -> Self {
        Integer::new(value)
    }
}

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Integer {}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl MulAssign<&Integer> for Integer {
    fn mul_assign(&mut self, other: &Integer) {
        self.value *= &other.value;
        for (atom, entry) in &other.atoms {
            self.insert_atom(atom.clone(), entry.exponent, entry.kind);
        }
    }
}

impl MulAssign<Integer> for Integer {
    fn mul_assign(&mut self, other: Integer) {
        *self *= &other;
    }
}

impl MulAssign<BigUint> for Integer {
    fn mul_assign(&mut self, other: BigUint) {
        self.value *= &other;
        self.insert_atom(other, 1, Atom::Pending);
    }
}

impl MulAssign<u64> for Integer {
    fn mul_assign(&mut self, other: u64) {
        *self *= BigUint::from(other);
    }
}

impl Mul<&Integer> for &Integer {
    type Output = Integer;

    fn mul(self, other: &Integer) -> Integer {
        let mut product = self.clone();
        product *= other;
        product
    }
}

impl Mul for Integer {
    type Output = Integer;

    fn mul(mut self, other: Integer) -> Integer {
        self *= &other;
        self
    }
}

impl Mul<u64> for Integer {
    type Output = Integer;

    fn mul(mut self, other: u64) -> Integer {
        self *= other;
        self
    }
}

impl Mul<&BigUint> for &Integer {
    type Output = Integer;

    fn mul(self, other: &BigUint) -> Integer {
        let mut product = self.clone();
        product *= other.clone();
        product
    }
}

impl Rem<u64> for &Integer {
    type Output = u64;

    fn rem(self, modulus: u64) -> u64 {
        let remainder = &self.value % modulus;
        remainder.to_u64_digits().first().copied().unwrap_or(0)
    }
}

impl Rem<&BigUint> for &Integer {
    type Output = BigUint;

    fn rem(self, modulus: &BigUint) -> BigUint {
        &self.value % modulus
    }
}

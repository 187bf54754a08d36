//! Number-theoretic helpers: gcd/lcm, prime parts, trial division,
//! divisibility filters and constraints on group parameters.

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_integer::Integer as _;
use num_traits::{One, ToPrimitive, Zero};

/// Greatest common divisor.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Least common multiple.
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    a.lcm(b)
}

/// Least common multiple of a sequence; the empty sequence gives 1.
pub fn lcm_all<'a>(values: impl IntoIterator<Item = &'a BigUint>) -> BigUint {
    values
        .into_iter()
        .fold(BigUint::one(), |acc, value| acc.lcm(value))
}

/// Product of a sequence; the empty sequence gives 1.
pub fn product<'a>(values: impl IntoIterator<Item = &'a BigUint>) -> BigUint {
    values.into_iter().fold(BigUint::one(), |acc, value| acc * value)
}

/// The greatest divisor of `n` coprime to `b`, i.e. `n` with every prime
/// divisor of `b` removed.
pub fn prime_part(n: &BigUint, b: &BigUint) -> BigUint {
    let mut n = n.clone();
    if n.is_zero() {
        return n;
    }
    loop {
        let d = n.gcd(b);
        if d <= BigUint::one() {
            break;
        }
        n /= d;
    }
    n
}

/// Keeps only the elements that divide no other kept element.
///
/// `values` must be sorted in decreasing order. The result is decreasing
/// when `descending` is set and increasing otherwise.
pub fn filter_divisors(values: &[BigUint], descending: bool) -> Vec<BigUint> {
    let mut kept: Vec<BigUint> = Vec::new();
    for value in values {
        if value.is_zero() {
            continue;
        }
        if !kept.iter().any(|x| (x % value).is_zero()) {
            kept.push(value.clone());
        }
    }
    if !descending {
        kept.reverse();
    }
    kept
}

/// Sorts raw spectrum values and removes every value dividing another one.
/// The result is the apex: the elements maximal under divisibility.
pub fn sort_and_filter(values: impl IntoIterator<Item = BigUint>, descending: bool) -> Vec<BigUint> {
    let mut sorted: Vec<BigUint> = values.into_iter().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    filter_divisors(&sorted, descending)
}

/// Smallest odd divisor of `number` greater than `previous`.
///
/// `number` must not be divisible by any number `<= previous`; if no such
/// divisor exists below `sqrt(number)`, the number itself is returned.
pub fn next_odd_divisor(number: &BigUint, previous: u64) -> BigUint {
    if let Some(small) = number.to_u64() {
        return BigUint::from(next_odd_divisor_u64(small, previous));
    }
    let mut candidate = previous / 2 * 2 + 3;
    loop {
        let divisor = BigUint::from(candidate);
        if &divisor * &divisor > *number {
            return number.clone();
        }
        if (number % &divisor).is_zero() {
            return divisor;
        }
        candidate += 2;
    }
}

fn next_odd_divisor_u64(number: u64, previous: u64) -> u64 {
    let mut candidate = previous / 2 * 2 + 3;
    while candidate
        .checked_mul(candidate)
        .map_or(false, |square| square <= number)
    {
        if number % candidate == 0 {
            return candidate;
        }
        candidate += 2;
    }
    number
}

/// Smallest divisor of `number` greater than 1 (so a prime), or `number`
/// itself when it is 1.
pub fn first_divisor(number: &BigUint) -> BigUint {
    if number.is_even() && !number.is_zero() {
        return BigUint::from(2u32);
    }
    next_odd_divisor(number, 1)
}

fn first_divisor_u64(number: u64) -> u64 {
    if number % 2 == 0 && number != 0 {
        return 2;
    }
    next_odd_divisor_u64(number, 1)
}

/// Deterministic primality check by trial division.
pub fn is_prime(n: &BigUint) -> bool {
    *n >= BigUint::from(2u32) && first_divisor(n) == *n
}

fn is_prime_u64(n: u64) -> bool {
    n >= 2 && first_divisor_u64(n) == n
}

/// Whether `n` is a power of a prime number (`p^k`, `k >= 1`).
pub fn is_prime_power(n: &BigUint) -> bool {
    if *n < BigUint::from(2u32) {
        return false;
    }
    if n.is_even() {
        return is_power_of_two(n);
    }
    let base = first_divisor(n);
    get_exponent(n, &base).is_some()
}

fn is_prime_power_u64(n: u64) -> bool {
    is_prime_power(&BigUint::from(n))
}

/// Whether `n` is a power of two (1 included).
pub fn is_power_of_two(n: &BigUint) -> bool {
    get_exponent(n, &BigUint::from(2u32)).is_some()
}

/// If `number = base^k`, returns `k`.
///
/// Returns `Some(0)` only for `number == 1`, and `None` when `number` is
/// not a power of `base` (including every `base <= 1` with `number > 1`).
pub fn get_exponent(number: &BigUint, base: &BigUint) -> Option<u32> {
    if number.is_one() {
        return Some(0);
    }
    if number.is_zero() || *base <= BigUint::one() {
        return None;
    }
    let mut rest = number.clone();
    let mut k = 0;
    loop {
        let (quotient, remainder) = rest.div_rem(base);
        if !remainder.is_zero() {
            break;
        }
        rest = quotient;
        k += 1;
    }
    if rest.is_one() {
        Some(k)
    } else {
        None
    }
}

/// Closest prime to `n`; of two equally close primes the smaller one wins.
pub fn closest_prime(n: u64) -> u64 {
    if n < 3 {
        return 2;
    }
    if is_prime_u64(n) {
        return n;
    }
    let mut offset = if n % 2 == 0 { 1 } else { 2 };
    loop {
        if is_prime_u64(n - offset) {
            return n - offset;
        }
        if is_prime_u64(n + offset) {
            return n + offset;
        }
        offset += 2;
    }
}

/// Closest prime power to `n`; ties resolve to the smaller one.
pub fn closest_prime_power(n: u64) -> u64 {
    if n < 3 {
        return 2;
    }
    if is_prime_power_u64(n) {
        return n;
    }
    let mut offset = 1;
    loop {
        if is_prime_power_u64(n - offset) {
            return n - offset;
        }
        if is_prime_power_u64(n + offset) {
            return n + offset;
        }
        offset += 1;
    }
}

/// Closest odd prime power to `n`; ties resolve to the smaller one.
pub fn closest_odd_prime_power(n: u64) -> u64 {
    if n <= 3 {
        return 3;
    }
    if n % 2 == 1 && is_prime_power_u64(n) {
        return n;
    }
    let mut offset = if n % 2 == 0 { 1 } else { 2 };
    loop {
        if n - offset >= 3 && is_prime_power_u64(n - offset) {
            return n - offset;
        }
        if is_prime_power_u64(n + offset) {
            return n + offset;
        }
        offset += 2;
    }
}

/// Closest power of two to `n`; ties resolve to the larger one.
pub fn closest_power_of_two(n: u64) -> u64 {
    if n <= 1 {
        return 1;
    }
    let k = 1u64 << (63 - n.leading_zeros());
    if 2 * k - n > n - k {
        k
    } else {
        2 * k
    }
}

/// Powers of two summing to `n`, largest first.
pub fn binary_expansion(mut n: u64) -> Vec<u64> {
    let mut powers = Vec::new();
    while n > 0 {
        let power = 1u64 << (63 - n.leading_zeros());
        n -= power;
        powers.push(power);
    }
    powers
}

/// Generate all primes below `limit` using the Sieve of Eratosthenes.
pub fn primes_less_than(limit: u64) -> Vec<u64> {
    if limit < 3 {
        return Vec::new();
    }
    let size = limit as usize;
    let mut is_prime = vec![true; size];
    is_prime[0] = false;
    is_prime[1] = false;
    let mut i = 2usize;
    while i * i < size {
        if is_prime[i] {
            let mut j = i * i;
            while j < size {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }
    is_prime
        .iter()
        .enumerate()
        .filter(|(_, &p)| p)
        .map(|(i, _)| i as u64)
        .collect()
}

/// The first `m` primes.
pub fn first_primes(m: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(m);
    let mut candidate = 2u64;
    while primes.len() < m {
        if primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += if candidate == 2 { 1 } else { 2 };
    }
    primes
}

/// Removes the maximal power of `factor` dividing `number`.
/// Returns the exponent removed and the remaining cofactor.
pub fn remove_factor(number: &BigUint, factor: &BigUint) -> (u32, BigUint) {
    let mut rest = number.clone();
    let mut power = 0;
    if factor <= &BigUint::one() || rest.is_zero() {
        return (0, rest);
    }
    loop {
        let (quotient, remainder) = rest.div_rem(factor);
        if !remainder.is_zero() {
            break;
        }
        rest = quotient;
        power += 1;
    }
    (power, rest)
}

/// Full prime factorization by trial division: powers of 2 first, then
/// successive odd divisors. Factorizing 0 or 1 gives an empty map.
pub fn factorize_number(number: &BigUint) -> BTreeMap<BigUint, u32> {
    let mut factors = BTreeMap::new();
    if *number <= BigUint::one() {
        return factors;
    }

    let (power, mut remainder) = remove_factor(number, &BigUint::from(2u32));
    if power > 0 {
        factors.insert(BigUint::from(2u32), power);
    }

    let mut previous = 1u64;
    while remainder > BigUint::one() {
        let divisor = next_odd_divisor(&remainder, previous);
        let (power, rest) = remove_factor(&remainder, &divisor);
        previous = divisor.to_u64().unwrap_or(u64::MAX);
        if power > 0 {
            *factors.entry(divisor).or_insert(0) += power;
        }
        remainder = rest;
    }
    factors
}

/// Parity requirement: on a number in [`Constraints`], on the count of
/// plus signs in a semisimple element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn matches(self, value: u64) -> bool {
        match self {
            Parity::Even => value % 2 == 0,
            Parity::Odd => value % 2 == 1,
        }
    }
}

/// Primality requirement used by [`Constraints`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Primality {
    #[default]
    Any,
    Prime,
    PrimePower,
}

/// Constraints on a numeric group parameter, e.g. the dimension or the
/// characteristic of a classical group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Constraints {
    pub min: Option<u64>,
    pub parity: Option<Parity>,
    pub primality: Primality,
}

impl Constraints {
    pub fn new(min: Option<u64>, parity: Option<Parity>, primality: Primality) -> Self {
        Self {
            min,
            parity,
            primality,
        }
    }

    /// Closest value satisfying these constraints, or `None` if none exists
    /// (an even prime above the minimum).
    pub fn closest_valid(&self, value: u64) -> Option<u64> {
        let value = match self.min {
            Some(min) => value.max(min),
            None => value,
        };
        let closest = match (self.primality, self.parity) {
            (Primality::Prime, Some(Parity::Even)) => {
                return if self.min.map_or(true, |min| min <= 2) {
                    Some(2)
                } else {
                    None
                };
            }
            (Primality::Prime, Some(Parity::Odd)) => closest_prime(value).max(3),
            (Primality::Prime, None) => closest_prime(value),
            (Primality::PrimePower, Some(Parity::Even)) => closest_power_of_two(value),
            (Primality::PrimePower, Some(Parity::Odd)) => closest_odd_prime_power(value),
            (Primality::PrimePower, None) => closest_prime_power(value),
            (Primality::Any, Some(Parity::Even)) => value - value % 2,
            (Primality::Any, Some(Parity::Odd)) => {
                if value % 2 == 1 {
                    value
                } else if value == 0 {
                    1
                } else {
                    value - 1
                }
            }
            (Primality::Any, None) => value,
        };
        Some(closest)
    }

    /// Whether `value` satisfies every constraint.
    pub fn is_valid(&self, value: u64) -> bool {
        if self.min.map_or(false, |min| value < min) {
            return false;
        }
        if self.parity.map_or(false, |parity| !parity.matches(value)) {
            return false;
        }
        match self.primality {
            Primality::Any => true,
            Primality::Prime => is_prime_u64(value),
            Primality::PrimePower => is_prime_power_u64(value),
        }
    }
}

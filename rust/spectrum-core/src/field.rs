//! Finite fields and the memo table of factorized field-order powers.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use crate::error::SpectrumError;
use crate::integer::Integer;
use crate::numeric::{first_divisor, get_exponent, is_prime};

/// Finite field of order `p^k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    characteristic: u64,
    pow: u32,
    order: BigUint,
}

impl Field {
    /// Field of the given order, which must be a prime power.
    pub fn new(order: u64) -> Result<Self, SpectrumError> {
        if order < 2 {
            return Err(SpectrumError::FieldOrderTooSmall(order));
        }
        let big_order = BigUint::from(order);
        let base = first_divisor(&big_order);
        let pow = get_exponent(&big_order, &base).ok_or(SpectrumError::NotPrimePower(order))?;
        let characteristic = base.to_u64().ok_or(SpectrumError::NotPrimePower(order))?;
        Ok(Field {
            characteristic,
            pow,
            order: big_order,
        })
    }

    /// Field of order `base^pow`; `base` must be prime and `pow >= 1`.
    pub fn from_power(base: u64, pow: u32) -> Result<Self, SpectrumError> {
        if pow < 1 {
            return Err(SpectrumError::ExponentTooSmall(pow));
        }
        if base < 2 {
            return Err(SpectrumError::FieldOrderTooSmall(base));
        }
        if !is_prime(&BigUint::from(base)) {
            return Err(SpectrumError::NotPrime(base));
        }
        Ok(Field {
            characteristic: base,
            pow,
            order: BigUint::from(base).pow(pow),
        })
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    pub fn characteristic(&self) -> u64 {
        self.characteristic
    }

    pub fn pow(&self) -> u32 {
        self.pow
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pow == 1 {
            write!(f, "F({})", self.characteristic)
        } else {
            write!(f, "F({}^{})", self.characteristic, self.pow)
        }
    }
}

/// Memo table of factorized `base^pow - 1`, keyed by `(base, pow)`.
///
/// These numbers recur across every classical-group computation over the
/// same characteristic. Entries are never evicted; a long-running caller
/// that sweeps many characteristics should call [`FieldPowerCache::clear`]
/// between sweeps.
#[derive(Debug, Default)]
pub struct FieldPowerCache {
    entries: HashMap<(u64, u32), Integer>,
}

impl FieldPowerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factorized `base^pow - 1`, computed on first request.
    pub fn get(&mut self, base: u64, pow: u32) -> &Integer {
        self.entries.entry((base, pow)).or_insert_with(|| {
            log::debug!("field power cache miss: {}^{} - 1", base, pow);
            let value = BigUint::from(base).pow(pow) - BigUint::one();
            let mut integer = Integer::new(value);
            integer.factorize();
            integer
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Least `t` such that the prime divisors of
    /// `p (p^t - 1)(p^2t - 1)...(p^nt - 1)` include every prime of `primes`.
    ///
    /// Returns `None` only for `n == 0` with primes other than `p` requested.
    pub fn min_covering_power(&mut self, p: u64, n: u32, primes: &[u64]) -> Option<u32> {
        let mut remaining: BTreeSet<u64> = primes.iter().copied().filter(|&r| r != p).collect();
        if n == 0 {
            return if remaining.is_empty() { Some(0) } else { None };
        }
        let mut t = 0;
        while !remaining.is_empty() {
            t += 1;
            for i in 1..=n {
                for prime in self.get(p, t * i).factors().keys() {
                    if let Some(prime) = prime.to_u64() {
                        remaining.remove(&prime);
                    }
                }
            }
        }
        Some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_order() {
        let f = Field::new(9).unwrap();
        assert_eq!(f.characteristic(), 3);
        assert_eq!(f.pow(), 2);
        assert_eq!(*f.order(), BigUint::from(9u32));
        assert_eq!(f.to_string(), "F(3^2)");
        assert_eq!(Field::new(7).unwrap().to_string(), "F(7)");
    }

    #[test]
    fn test_field_errors() {
        assert_eq!(Field::new(1), Err(SpectrumError::FieldOrderTooSmall(1)));
        assert_eq!(Field::new(0), Err(SpectrumError::FieldOrderTooSmall(0)));
        assert_eq!(Field::new(6), Err(SpectrumError::NotPrimePower(6)));
        assert_eq!(Field::from_power(2, 0), Err(SpectrumError::ExponentTooSmall(0)));
        assert_eq!(Field::from_power(1, 3), Err(SpectrumError::FieldOrderTooSmall(1)));
        assert_eq!(Field::from_power(4, 2), Err(SpectrumError::NotPrime(4)));
    }

    #[test]
    fn test_field_from_power() {
        let f = Field::from_power(2, 5).unwrap();
        assert_eq!(*f.order(), BigUint::from(32u32));
        assert_eq!(f, Field::new(32).unwrap());
    }

    #[test]
    fn test_cache_memoizes() {
        let mut cache = FieldPowerCache::new();
        assert!(cache.is_empty());
        let factors = cache.get(2, 6).factors();
        let expected = [(3u64, 2u32), (7, 1)]
            .iter()
            .map(|&(p, e)| (BigUint::from(p), e))
            .collect();
        assert_eq!(factors, expected);
        cache.get(2, 6);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_min_covering_power() {
        let mut cache = FieldPowerCache::new();
        // 2^2 - 1 = 3, 2^3 - 1 = 7, 2^4 - 1 = 15
        assert_eq!(cache.min_covering_power(2, 1, &[2, 3, 5, 7]), Some(4));
        // t = 3 brings 2^3 - 1 = 7 and 2^6 - 1 = 63
        assert_eq!(cache.min_covering_power(2, 2, &[2, 3, 5, 7]), Some(3));
        assert_eq!(cache.min_covering_power(3, 0, &[3]), Some(0));
        assert_eq!(cache.min_covering_power(3, 0, &[2, 3]), None);
    }
}

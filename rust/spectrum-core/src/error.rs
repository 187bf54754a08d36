//! Error type shared by the spectrum crates.

use num_bigint::BigUint;

/// Errors raised when constructing fields, partitions or integers from
/// invalid parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpectrumError {
    #[error("field order must be at least 2, got {0}")]
    FieldOrderTooSmall(u64),

    #[error("field order {0} is not a prime power")]
    NotPrimePower(u64),

    #[error("field exponent must be at least 1, got {0}")]
    ExponentTooSmall(u32),

    #[error("field characteristic {0} is not prime")]
    NotPrime(u64),

    #[error("cannot partition 0: a partition has at least one part")]
    EmptyPartition,

    #[error("prime {prime} does not divide {value}")]
    PrimeNotDividing { prime: BigUint, value: BigUint },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

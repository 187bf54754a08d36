//! Combinatorial and number-theoretic primitives for element-order spectra:
//! partitions, bounded sets, lazily factorized integers and finite fields.

pub mod error;
pub mod field;
pub mod integer;
pub mod numeric;
pub mod partition;
pub mod set;

pub use error::SpectrumError;
pub use field::{Field, FieldPowerCache};
pub use integer::{Atom, Integer};
pub use numeric::{Constraints, Parity, Primality};
pub use partition::Partitions;
pub use set::{BoundedSets, SetMode};

//! Semisimple element orders of classical groups over finite fields.
//!
//! [`SemisimpleElements`] enumerates `lcm(q^{n_1} ± 1, ..., q^{n_k} ± 1)`
//! under the sign rules of the different group families, and
//! [`MixedElements`] combines those with a unipotent factor.

pub mod element;
pub mod mixed;
pub mod semisimple;

pub use element::{Sign, SpectraElement};
pub use mixed::{mixed_elements, MixedElements};
pub use semisimple::{semisimple_elements, Elements, SemisimpleElements, SignMode, UniformSign};
pub use spectrum_core::Parity;

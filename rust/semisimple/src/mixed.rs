//! Elements mixing a unipotent factor `g(k)` with a semisimple part on the
//! remaining rank `n - f(k)`.

use num_bigint::BigUint;

use spectrum_core::Parity;

use crate::element::SpectraElement;
use crate::semisimple::{semisimple_elements, SignMode, UniformSign};

/// Elements `g(k) * lcm(q^{n_1} ± 1, ..., q^{n_s} ± 1)` with
/// `f(k) + n_1 + ... + n_s <= n`, for `k = 1, 2, ...` while `f(k) < n`.
///
/// `f` must eventually reach `n`, otherwise iteration does not end.
pub struct MixedElements<F, G> {
    q: u64,
    n: u32,
    f: F,
    g: G,
    min_length: usize,
    mode: SignMode,
}

impl<F, G> MixedElements<F, G>
where
    F: Fn(u32) -> u32,
    G: Fn(u32) -> BigUint,
{
    pub fn new(q: u64, n: u32, f: F, g: G) -> Self {
        MixedElements {
            q,
            n,
            f,
            g,
            min_length: 1,
            mode: SignMode::General,
        }
    }

    pub fn min_length(mut self, t: usize) -> Self {
        self.min_length = t;
        self
    }

    pub fn parity(mut self, parity: Parity) -> Self {
        self.mode = SignMode::Parity(parity);
        self
    }

    pub fn sign(mut self, sign: UniformSign) -> Self {
        self.mode = SignMode::Uniform(sign);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = SpectraElement> + '_ {
        mixed_elements(self.q, self.n, &self.f, &self.g, self.min_length, self.mode)
    }
}

/// Unbuffered form of [`MixedElements`].
pub fn mixed_elements<F, G>(
    q: u64,
    n: u32,
    f: F,
    g: G,
    min_length: usize,
    mode: SignMode,
) -> impl Iterator<Item = SpectraElement>
where
    F: Fn(u32) -> u32,
    G: Fn(u32) -> BigUint,
{
    (1u32..)
        .map(move |k| (k, f(k)))
        .take_while(move |&(_, used)| used < n)
        .flat_map(move |(k, used)| {
            let factor = g(k);
            log::trace!("mixed elements: k = {}, rank {} left, factor {}", k, n - used, factor);
            semisimple_elements(q, n - used, min_length, mode).map(move |element| element * &factor)
        })
}

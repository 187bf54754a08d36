//! Enumeration of semisimple element orders
//! `lcm(q^{n_1} ± 1, ..., q^{n_k} ± 1)` with `n_1 + ... + n_k <= n`.
//!
//! Only divisor-maximal candidates are generated: bounded sets stand in for
//! partitions, since repeated parts never change the lcm.

use std::slice;

use spectrum_core::{BoundedSets, Integer, Parity, SetMode};

use crate::element::{Sign, SpectraElement};

/// Sign rule for the uniform mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformSign {
    /// Every term is `q^{n_i} - 1`.
    Linear,
    /// Every term is `q^{n_i} - (-1)^{n_i}`.
    Unitary,
}

impl UniformSign {
    pub fn sign_of(self, n: u32) -> Sign {
        match self {
            UniformSign::Linear => Sign::Minus,
            UniformSign::Unitary if n % 2 == 0 => Sign::Minus,
            UniformSign::Unitary => Sign::Plus,
        }
    }
}

/// How signs are assigned to the terms. Parity and uniform signs exclude
/// each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignMode {
    /// Every sign combination.
    #[default]
    General,
    /// Only elements whose number of `+` terms has the given parity.
    Parity(Parity),
    /// One fixed sign rule for every term.
    Uniform(UniformSign),
}

type Generator = Box<dyn Iterator<Item = SpectraElement>>;

/// Semisimple elements of a classical group of rank `n` over `F_q`.
///
/// General-mode results are buffered: once a traversal runs to the end, the
/// elements are stored on this instance and later calls to
/// [`SemisimpleElements::iter`] replay them. A traversal dropped early
/// stores nothing.
#[derive(Debug, Clone)]
pub struct SemisimpleElements {
    q: u64,
    n: u32,
    min_length: usize,
    mode: SignMode,
    stored: Option<Vec<SpectraElement>>,
}

impl SemisimpleElements {
    pub fn new(q: u64, n: u32) -> Self {
        SemisimpleElements {
            q,
            n,
            min_length: 1,
            mode: SignMode::General,
            stored: None,
        }
    }

    /// Require at least `t` terms, counting the unused remainder
    /// `n - sum(n_i)` as that many terms `q - 1`.
    pub fn min_length(mut self, t: usize) -> Self {
        self.min_length = t;
        self.stored = None;
        self
    }

    pub fn parity(self, parity: Parity) -> Self {
        self.mode(SignMode::Parity(parity))
    }

    pub fn sign(self, sign: UniformSign) -> Self {
        self.mode(SignMode::Uniform(sign))
    }

    pub fn mode(mut self, mode: SignMode) -> Self {
        self.mode = mode;
        self.stored = None;
        self
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn sign_mode(&self) -> SignMode {
        self.mode
    }

    /// Whether a complete General-mode traversal has been stored.
    pub fn is_buffered(&self) -> bool {
        self.stored.is_some()
    }

    pub fn iter(&mut self) -> Elements<'_> {
        if self.mode != SignMode::General {
            let source = semisimple_elements(self.q, self.n, self.min_length, self.mode);
            return Elements {
                inner: Inner::Fresh(source),
            };
        }
        let inner = match self.stored {
            Some(ref stored) => Inner::Replay(stored.iter()),
            None => Inner::Recording {
                source: semisimple_elements(self.q, self.n, self.min_length, self.mode),
                buffer: Vec::new(),
                slot: &mut self.stored,
            },
        };
        Elements { inner }
    }
}

/// Iterator returned by [`SemisimpleElements::iter`].
pub struct Elements<'a> {
    inner: Inner<'a>,
}

enum Inner<'a> {
    Fresh(Generator),
    Recording {
        source: Generator,
        buffer: Vec<SpectraElement>,
        slot: &'a mut Option<Vec<SpectraElement>>,
    },
    Replay(slice::Iter<'a, SpectraElement>),
}

impl Iterator for Elements<'_> {
    type Item = SpectraElement;

    fn next(&mut self) -> Option<SpectraElement> {
        match &mut self.inner {
            Inner::Fresh(source) => source.next(),
            Inner::Replay(stored) => stored.next().cloned(),
            Inner::Recording { source, buffer, slot } => match source.next() {
                Some(element) => {
                    buffer.push(element.clone());
                    Some(element)
                }
                None => {
                    if slot.is_none() {
                        log::debug!("storing {} general semisimple elements", buffer.len());
                        **slot = Some(std::mem::take(buffer));
                    }
                    None
                }
            },
        }
    }
}

/// Unbuffered enumeration of semisimple elements, see
/// [`SemisimpleElements`].
pub fn semisimple_elements(
    q: u64,
    n: u32,
    min_length: usize,
    mode: SignMode,
) -> Box<dyn Iterator<Item = SpectraElement>> {
    match mode {
        SignMode::General => Box::new(general(q, n, min_length)),
        SignMode::Parity(parity) => Box::new(with_parity(q, n, min_length, parity)),
        SignMode::Uniform(sign) => Box::new(with_sign(q, n, min_length, sign)),
    }
}

fn long_enough(n: u32, parts: &[&[u32]], min_length: usize) -> bool {
    let used: u32 = parts.iter().flat_map(|p| p.iter()).sum();
    let count: usize = parts.iter().map(|p| p.len()).sum();
    count + (n - used) as usize >= min_length
}

fn signed(q: u64, first: &[u32], first_sign: Sign, second: &[u32]) -> SpectraElement {
    let mut partition = first.to_vec();
    partition.extend_from_slice(second);
    let mut signs = vec![first_sign; first.len()];
    signs.resize(partition.len(), first_sign.flip());
    SpectraElement::new(Integer::one(), q, partition, signs)
}

fn with_sign(q: u64, n: u32, min_length: usize, sign: UniformSign) -> impl Iterator<Item = SpectraElement> {
    BoundedSets::new(n, SetMode::All)
        .filter(move |set| long_enough(n, &[set.as_slice()], min_length))
        .map(move |set| {
            let signs = set.iter().map(|&k| sign.sign_of(k)).collect();
            SpectraElement::new(Integer::one(), q, set, signs)
        })
}

fn with_parity(q: u64, n: u32, min_length: usize, parity: Parity) -> impl Iterator<Item = SpectraElement> {
    let offset = match parity {
        Parity::Even => 0,
        Parity::Odd => 1,
    };
    (offset..=n).flat_map(move |pluses| {
        // a trailing 1 extends distinct-part sets of pluses - 1
        let extended = (pluses > 0)
            .then(|| {
                BoundedSets::new(pluses - 1, SetMode::Full).map(|mut set| {
                    set.push(1);
                    set
                })
            })
            .into_iter()
            .flatten();
        BoundedSets::new(pluses, SetMode::Full)
            .chain(extended)
            .filter(move |plus| parity.matches(plus.len() as u64))
            .flat_map(move |plus| {
                BoundedSets::new(n - pluses, SetMode::Maximal).filter_map(move |minus| {
                    if long_enough(n, &[plus.as_slice(), minus.as_slice()], min_length) {
                        Some(signed(q, &plus, Sign::Plus, &minus))
                    } else {
                        None
                    }
                })
            })
    })
}

fn general(q: u64, n: u32, min_length: usize) -> impl Iterator<Item = SpectraElement> {
    (0..=n / 2).flat_map(move |left| {
        let right = n - left;
        BoundedSets::new(left, SetMode::Maximal).flat_map(move |l| {
            BoundedSets::new(right, SetMode::Maximal).flat_map(move |r| {
                if long_enough(n, &[l.as_slice(), r.as_slice()], min_length) {
                    vec![signed(q, &l, Sign::Minus, &r), signed(q, &l, Sign::Plus, &r)]
                } else {
                    Vec::new()
                }
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use num_traits::Zero;
    use spectrum_core::numeric::lcm;
    use spectrum_core::Partitions;
    use std::collections::HashSet;

    use crate::element::term;

    fn evaluate(q: u64, ni: &[u32], ei: &[Sign]) -> BigUint {
        ni.iter()
            .zip(ei)
            .fold(BigUint::from(1u32), |acc, (&n, &e)| lcm(&acc, &term(q, n, e)))
    }

    fn sign_tuples(len: usize) -> Vec<Vec<Sign>> {
        (0..1u32 << len)
            .map(|mask| {
                (0..len)
                    .map(|i| if mask >> i & 1 == 1 { Sign::Plus } else { Sign::Minus })
                    .collect()
            })
            .collect()
    }

    /// Every brute-force value divides some generated value, and the
    /// generated values are exactly the brute-force values found that way.
    fn check_coverage(n: u32, q: u64, min_length: usize, mode: SignMode) {
        let generated: Vec<BigUint> = semisimple_elements(q, n, min_length, mode)
            .map(SpectraElement::into_value)
            .collect();
        let mut hit = HashSet::new();
        for ni in Partitions::new(n).unwrap().min_length(min_length) {
            let tuples = match mode {
                SignMode::Uniform(sign) => vec![ni.iter().map(|&k| sign.sign_of(k)).collect()],
                _ => sign_tuples(ni.len()),
            };
            for ei in tuples {
                if let SignMode::Parity(parity) = mode {
                    let pluses = ei.iter().filter(|&&e| e == Sign::Plus).count();
                    if !parity.matches(pluses as u64) {
                        continue;
                    }
                }
                let elem = evaluate(q, &ni, &ei);
                let mut found = false;
                for x in &generated {
                    if (x % &elem).is_zero() {
                        if *x == elem {
                            hit.insert(x.clone());
                        }
                        found = true;
                    }
                }
                assert!(
                    found,
                    "q = {}, partition {:?}, signs {:?}: {} divides nothing ({:?})",
                    q, ni, ei, elem, mode
                );
            }
        }
        let generated: HashSet<BigUint> = generated.into_iter().collect();
        assert_eq!(hit, generated, "n = {}, q = {}, t = {}, {:?}", n, q, min_length, mode);
    }

    #[test]
    fn test_general_coverage() {
        for n in 2..=10 {
            for q in 2..=14 {
                for t in 1..4 {
                    check_coverage(n, q, t, SignMode::General);
                }
            }
        }
    }

    #[test]
    fn test_parity_coverage() {
        for n in 2..=10 {
            for q in 2..=14 {
                for t in 1..4 {
                    check_coverage(n, q, t, SignMode::Parity(Parity::Even));
                    check_coverage(n, q, t, SignMode::Parity(Parity::Odd));
                }
            }
        }
    }

    #[test]
    fn test_uniform_coverage() {
        for n in 2..=10 {
            for q in 2..=14 {
                for t in 1..4 {
                    check_coverage(n, q, t, SignMode::Uniform(UniformSign::Linear));
                    check_coverage(n, q, t, SignMode::Uniform(UniformSign::Unitary));
                }
            }
        }
    }

    #[test]
    fn test_linear_small() {
        // SL(3, 2): 2^3 - 1 and lcm(2^2 - 1, 2 - 1)
        let values: Vec<BigUint> = SemisimpleElements::new(2, 3)
            .sign(UniformSign::Linear)
            .iter()
            .map(SpectraElement::into_value)
            .collect();
        let expected: Vec<BigUint> = [7u32, 3, 3, 1].iter().map(|&x| BigUint::from(x)).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_min_length_above_rank() {
        let mut elements = SemisimpleElements::new(3, 4).min_length(5);
        assert_eq!(elements.iter().count(), 0);
        let mut elements = SemisimpleElements::new(3, 4).min_length(5).parity(Parity::Odd);
        assert_eq!(elements.iter().count(), 0);
    }

    #[test]
    fn test_general_buffer_commits_on_exhaustion() {
        let mut elements = SemisimpleElements::new(5, 6);
        let first: Vec<_> = elements.iter().take(3).collect();
        assert_eq!(first.len(), 3);
        assert!(!elements.is_buffered(), "partial traversal must not be stored");

        let full: Vec<_> = elements.iter().collect();
        assert!(elements.is_buffered());
        let replay: Vec<_> = elements.iter().collect();
        assert_eq!(full, replay);
        assert_eq!(
            replay.iter().map(|e| e.str_verbose()).collect::<Vec<_>>(),
            full.iter().map(|e| e.str_verbose()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_other_modes_are_not_buffered() {
        let mut elements = SemisimpleElements::new(3, 5).parity(Parity::Even);
        let count = elements.iter().count();
        assert!(count > 0);
        assert!(!elements.is_buffered());

        let mut elements = SemisimpleElements::new(3, 5);
        elements.iter().for_each(drop);
        assert!(elements.is_buffered());
        let elements = elements.sign(UniformSign::Unitary);
        assert!(!elements.is_buffered(), "changing the mode drops the buffer");
    }
}

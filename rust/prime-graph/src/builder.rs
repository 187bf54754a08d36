//! Prime graphs of spectra.
//!
//! Two primes are adjacent when some element of the spectrum is divisible
//! by their product. [`prime_graph`] factorizes every element;
//! [`PrimeGraphBuilder`] only splits values by gcds and so never factors
//! anything larger than the final blocks.

use num_bigint::BigUint;
use num_traits::One;
use rayon::prelude::*;

use spectrum_core::numeric::{gcd, prime_part};
use spectrum_core::Integer;

use crate::graph::Graph;

fn prime_divisors(value: &BigUint) -> Vec<BigUint> {
    Integer::new(value.clone()).factorize().into_keys().collect()
}

/// Prime graph by full factorization. Elements are factorized in parallel.
pub fn prime_graph(values: &[BigUint]) -> Graph<BigUint> {
    let factorizations: Vec<Vec<BigUint>> = values
        .par_iter()
        .filter(|value| **value > BigUint::one())
        .map(prime_divisors)
        .collect();

    let mut graph = Graph::new();
    for primes in factorizations {
        graph.add_vertices(primes.iter().cloned());
        for (i, p) in primes.iter().enumerate() {
            for r in &primes[i + 1..] {
                graph.add_edge(p.clone(), r.clone());
            }
        }
    }
    graph
}

/// Graph on pairwise coprime blocks built by gcd splitting.
///
/// Every vertex is a product of primes that divide exactly the same added
/// elements; two blocks are adjacent when some element is divisible by
/// both.
#[derive(Debug, Clone, Default)]
pub struct PrimeGraphBuilder {
    graph: Graph<BigUint>,
}

impl PrimeGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refines the blocks by `value` and connects the blocks it meets.
    pub fn add_element(&mut self, value: &BigUint) {
        let mut a = value.clone();
        if a <= BigUint::one() {
            return;
        }
        let mut neighbors: Vec<usize> = Vec::new();
        // blocks split off below are coprime to what is left of `a`
        let initial = self.graph.len();
        for i in 0..initial {
            let b = self.graph.vertex(i).clone();
            let d = gcd(&a, &b);
            if d.is_one() {
                continue;
            }
            let rest = prime_part(&b, &d);
            let index = if rest.is_one() {
                self.graph.set_vertex(i, d.clone());
                i
            } else {
                log::debug!("splitting block {} into {} and {}", b, rest, d);
                self.graph.set_vertex(i, rest);
                self.graph.clone_vertex(i, d.clone())
            };
            for &neighbor in &neighbors {
                self.graph.connect(index, neighbor);
            }
            neighbors.push(index);

            a = prime_part(&a, &d);
            if a.is_one() {
                break;
            }
        }
        if a > BigUint::one() {
            log::trace!("new block {}", a);
            let index = self.graph.add_vertex(a);
            for &neighbor in &neighbors {
                self.graph.connect(index, neighbor);
            }
        }
    }

    pub fn graph(&self) -> &Graph<BigUint> {
        &self.graph
    }

    pub fn into_graph(self) -> Graph<BigUint> {
        self.graph
    }

    /// Expands every block into its primes. Primes of one block form a
    /// clique; primes of adjacent blocks are connected.
    pub fn into_prime_graph(self) -> Graph<BigUint> {
        let blocks = self.graph;
        let primes: Vec<Vec<BigUint>> = blocks.vertices().iter().map(prime_divisors).collect();

        let mut graph = Graph::new();
        for block in &primes {
            graph.add_vertices(block.iter().cloned());
            for (i, p) in block.iter().enumerate() {
                for r in &block[i + 1..] {
                    graph.add_edge(p.clone(), r.clone());
                }
            }
        }
        for i in 0..blocks.len() {
            for j in blocks.neighbors(i).into_iter().filter(|&j| j > i) {
                for p in &primes[i] {
                    for r in &primes[j] {
                        graph.add_edge(p.clone(), r.clone());
                    }
                }
            }
        }
        graph
    }
}

/// Block graph of `values` via [`PrimeGraphBuilder`].
pub fn fast_graph<'a>(values: impl IntoIterator<Item = &'a BigUint>) -> Graph<BigUint> {
    let mut builder = PrimeGraphBuilder::new();
    for value in values {
        builder.add_element(value);
    }
    builder.into_graph()
}

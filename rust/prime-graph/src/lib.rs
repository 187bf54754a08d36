//! Prime graphs (Gruenberg-Kegel graphs) of element-order spectra.

pub mod builder;
pub mod graph;

pub use builder::{fast_graph, prime_graph, PrimeGraphBuilder};
pub use graph::{full_graph, Graph};

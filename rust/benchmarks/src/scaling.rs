//! Scaling runs for the spectrum engine.
//!
//! Measures how partition counts, semisimple enumeration and prime graph
//! construction grow with the rank n, for a fixed field order.
//!
//! Options:
//!   --q=<q>        Field order (default: 9)
//!   --max-n=<n>    Largest rank measured (default: 14)

use std::time::{Duration, Instant};

use num_bigint::BigUint;

use prime_graph::{prime_graph, PrimeGraphBuilder};
use semisimple::SemisimpleElements;
use spectrum_core::numeric::sort_and_filter;
use spectrum_core::Partitions;

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let q = args
        .iter()
        .find_map(|a| a.strip_prefix("--q=")?.parse::<u64>().ok())
        .unwrap_or(9);
    let max_n = args
        .iter()
        .find_map(|a| a.strip_prefix("--max-n=")?.parse::<u32>().ok())
        .unwrap_or(14);

    println!("================================================================");
    println!("  SCALING: spectra of classical groups over F_{}", q);
    println!("================================================================\n");

    println!(
        "  {:>3} {:>8} {:>10} {:>6} {:>12} {:>12} {:>12} {}",
        "n", "p(n)", "elements", "apex", "enumerate", "fast graph", "full graph", "agree"
    );
    println!("  {}", "-".repeat(80));

    for n in 2..=max_n {
        let partitions = Partitions::new(n).map(|p| p.count()).unwrap_or(0);

        let (values, enumerate_time) = timed(|| {
            SemisimpleElements::new(q, n)
                .iter()
                .map(|e| e.into_value())
                .collect::<Vec<BigUint>>()
        });
        let elements = values.len();
        let apex = sort_and_filter(values, true);

        let (fast, fast_time) = timed(|| {
            let mut builder = PrimeGraphBuilder::new();
            for value in &apex {
                builder.add_element(value);
            }
            builder.into_prime_graph()
        });
        let (full, full_time) = timed(|| prime_graph(&apex));
        let agree = fast.as_sparse_graph() == full.as_sparse_graph();

        println!(
            "  {:>3} {:>8} {:>10} {:>6} {:>10.2}ms {:>10.2}ms {:>10.2}ms {}",
            n,
            partitions,
            elements,
            apex.len(),
            enumerate_time.as_secs_f64() * 1000.0,
            fast_time.as_secs_f64() * 1000.0,
            full_time.as_secs_f64() * 1000.0,
            if agree { "yes" } else { "NO" }
        );
    }
    println!();
}

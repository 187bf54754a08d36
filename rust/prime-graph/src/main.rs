//! prime-graph CLI: prime graph of a spectrum apex.
//!
//! Usage:
//!   --apex=72,90,240,246              Apex elements (required)
//!   --method=fast|factorize|both      Construction (default: both)
//!   --cocliques                       Also list the maximum cocliques
//!   --json                            Emit JSON instead of text

use num_bigint::BigUint;
use serde::Serialize;

use prime_graph::{prime_graph, Graph, PrimeGraphBuilder};
use spectrum_core::SpectrumError;

/// CLI configuration parsed from command-line arguments.
struct CliConfig {
    apex: Vec<BigUint>,
    method: Method,
    cocliques: bool,
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Method {
    Fast,
    Factorize,
    Both,
}

#[derive(Serialize)]
struct GraphReport {
    method: String,
    vertices: Vec<String>,
    edges: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_cocliques: Option<Vec<Vec<String>>>,
}

fn parse_args(args: &[String]) -> Result<CliConfig, SpectrumError> {
    let apex = args
        .iter()
        .find_map(|a| a.strip_prefix("--apex="))
        .ok_or_else(|| SpectrumError::InvalidArgument("--apex=a,b,c is required".to_string()))?
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim()
                .parse::<BigUint>()
                .map_err(|_| SpectrumError::InvalidArgument(format!("apex element {:?}", s)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let method = match args.iter().find_map(|a| a.strip_prefix("--method=")) {
        None | Some("both") => Method::Both,
        Some("fast") => Method::Fast,
        Some("factorize") => Method::Factorize,
        Some(other) => return Err(SpectrumError::InvalidArgument(format!("--method={}", other))),
    };

    Ok(CliConfig {
        apex,
        method,
        cocliques: args.iter().any(|a| a == "--cocliques"),
        json: args.iter().any(|a| a == "--json"),
    })
}

fn report(method: &str, graph: &Graph<BigUint>, cocliques: bool) -> GraphReport {
    let (vertices, edges) = graph.as_sparse_graph();
    let max_cocliques = cocliques.then(|| {
        graph
            .max_cocliques()
            .into_iter()
            .map(|c| c.iter().map(|v| v.to_string()).collect())
            .collect()
    });
    GraphReport {
        method: method.to_string(),
        vertices: vertices.iter().map(|v| v.to_string()).collect(),
        edges: edges.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect(),
        max_cocliques,
    }
}

fn print_report(report: &GraphReport) {
    println!("{} graph: {} vertices, {} edges", report.method, report.vertices.len(), report.edges.len());
    println!("  vertices: {}", report.vertices.join(", "));
    for (a, b) in &report.edges {
        println!("  {} - {}", a, b);
    }
    if let Some(cocliques) = &report.max_cocliques {
        println!("  maximum cocliques:");
        for coclique in cocliques {
            println!("    {{{}}}", coclique.join(", "));
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut reports = Vec::new();
    if config.method != Method::Factorize {
        let mut builder = PrimeGraphBuilder::new();
        for value in &config.apex {
            builder.add_element(value);
        }
        reports.push(report("block", builder.graph(), false));
        let expanded = builder.into_prime_graph();
        reports.push(report("fast", &expanded, config.cocliques));
    }
    if config.method != Method::Fast {
        let full = prime_graph(&config.apex);
        reports.push(report("factorize", &full, config.cocliques));
    }
    if config.method == Method::Both {
        let agree = reports[1].vertices == reports[2].vertices && reports[1].edges == reports[2].edges;
        log::info!("fast and factorized graphs agree: {}", agree);
        if !agree {
            eprintln!("Warning: fast and factorized prime graphs differ");
        }
    }

    if config.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: could not serialize results: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }
    for report in &reports {
        print_report(report);
        println!();
    }
}

//! spectra CLI: partitions, bounded sets and element orders of classical
//! groups.
//!
//! Modes:
//!   --mode=partitions --n=10 [--length=3]     Partitions of n
//!   --mode=sets --n=10 [--sets=maximal]       Bounded sets (all|maximal|full)
//!   --mode=semisimple --q=9 --n=4             Semisimple element orders
//!   --mode=mixed --q=9 --n=3 [--char=3]       Orders p^k * semisimple(n - f(k))
//!
//! Options:
//!   --min-length=<t>          At least t terms (default: 1)
//!   --parity=even|odd         Parity of the number of `+` terms
//!   --sign=linear|unitary     Uniform sign rule (excludes --parity)
//!   --char=<p>                Characteristic for mixed mode (default: char of F_q)
//!   --apex                    Keep only values maximal under divisibility
//!   --verbose                 Print how each value was built
//!   --json                    Emit JSON instead of text

use std::collections::BTreeMap;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::Serialize;

use semisimple::{MixedElements, Parity, SemisimpleElements, SignMode, SpectraElement, UniformSign};
use spectrum_core::numeric::sort_and_filter;
use spectrum_core::{BoundedSets, Field, Partitions, SetMode, SpectrumError};

/// CLI configuration parsed from command-line arguments.
struct CliConfig {
    mode: Mode,
    n: u32,
    q: u64,
    /// Fixed partition length for the partitions mode.
    length: Option<usize>,
    sets: SetMode,
    min_length: usize,
    sign_mode: SignMode,
    characteristic: Option<u64>,
    apex: bool,
    verbose: bool,
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Partitions,
    Sets,
    Semisimple,
    Mixed,
}

#[derive(Serialize)]
struct ElementReport {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    verbose: Option<String>,
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .find_map(|a| a.strip_prefix(name)?.strip_prefix('='))
}

fn parse_flag<T: FromStr>(args: &[String], name: &str, default: T) -> Result<T, SpectrumError> {
    match flag(args, name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| SpectrumError::InvalidArgument(format!("{}={}", name, raw))),
        None => Ok(default),
    }
}

fn parse_args(args: &[String]) -> Result<CliConfig, SpectrumError> {
    let mode = match flag(args, "--mode").unwrap_or("semisimple") {
        "partitions" => Mode::Partitions,
        "sets" => Mode::Sets,
        "semisimple" => Mode::Semisimple,
        "mixed" => Mode::Mixed,
        other => return Err(SpectrumError::InvalidArgument(format!("--mode={}", other))),
    };

    let sets = match flag(args, "--sets").unwrap_or("all") {
        "all" => SetMode::All,
        "maximal" => SetMode::Maximal,
        "full" => SetMode::Full,
        other => return Err(SpectrumError::InvalidArgument(format!("--sets={}", other))),
    };

    let parity = match flag(args, "--parity") {
        None => None,
        Some("even") => Some(Parity::Even),
        Some("odd") => Some(Parity::Odd),
        Some(other) => return Err(SpectrumError::InvalidArgument(format!("--parity={}", other))),
    };
    let sign = match flag(args, "--sign") {
        None => None,
        Some("linear") => Some(UniformSign::Linear),
        Some("unitary") => Some(UniformSign::Unitary),
        Some(other) => return Err(SpectrumError::InvalidArgument(format!("--sign={}", other))),
    };
    let sign_mode = match (parity, sign) {
        (None, None) => SignMode::General,
        (Some(parity), None) => SignMode::Parity(parity),
        (None, Some(sign)) => SignMode::Uniform(sign),
        (Some(_), Some(_)) => {
            return Err(SpectrumError::InvalidArgument(
                "--parity and --sign cannot be combined".to_string(),
            ))
        }
    };

    let length = match flag(args, "--length") {
        Some(_) => Some(parse_flag(args, "--length", 0usize)?),
        None => None,
    };
    let characteristic = match flag(args, "--char") {
        Some(_) => Some(parse_flag(args, "--char", 0u64)?),
        None => None,
    };

    Ok(CliConfig {
        mode,
        n: parse_flag(args, "--n", 5)?,
        q: parse_flag(args, "--q", 2)?,
        length,
        sets,
        min_length: parse_flag(args, "--min-length", 1)?,
        sign_mode,
        characteristic,
        apex: args.iter().any(|a| a == "--apex"),
        verbose: args.iter().any(|a| a == "--verbose" || a == "-v"),
        json: args.iter().any(|a| a == "--json"),
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let result = parse_args(&args).and_then(|config| run(&config));
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), SpectrumError> {
    match config.mode {
        Mode::Partitions => {
            let partitions: Vec<Vec<u32>> = match config.length {
                Some(k) => Partitions::with_length(config.n, k).collect(),
                None => Partitions::new(config.n)?.collect(),
            };
            print_sequences(config, "partitions", &partitions);
        }
        Mode::Sets => {
            let sets: Vec<Vec<u32>> = BoundedSets::new(config.n, config.sets).collect();
            print_sequences(config, "bounded sets", &sets);
        }
        Mode::Semisimple => {
            let field = Field::new(config.q)?;
            let mut elements = SemisimpleElements::new(config.q, config.n)
                .min_length(config.min_length)
                .mode(config.sign_mode);
            let collected: Vec<SpectraElement> = elements.iter().collect();
            if !config.json {
                println!("Semisimple elements over {}, n = {}, {:?}", field, config.n, config.sign_mode);
            }
            print_elements(config, collected);
        }
        Mode::Mixed => {
            let field = Field::new(config.q)?;
            let p = config.characteristic.unwrap_or_else(|| field.characteristic());
            let p = u32::try_from(p)
                .map_err(|_| SpectrumError::InvalidArgument(format!("--char={}", p)))?;
            if p < 2 {
                return Err(SpectrumError::InvalidArgument(format!("--char={}", p)));
            }
            let mixed = MixedElements::new(
                config.q,
                config.n,
                move |k| {
                    // (p^(k-1) + 1) / 2, saturating
                    p.checked_pow(k - 1).map_or(u32::MAX, |x| x / 2 + x % 2)
                },
                move |k| BigUint::from(p).pow(k),
            )
            .min_length(config.min_length);
            let mixed = match config.sign_mode {
                SignMode::General => mixed,
                SignMode::Parity(parity) => mixed.parity(parity),
                SignMode::Uniform(sign) => mixed.sign(sign),
            };
            let collected: Vec<SpectraElement> = mixed.iter().collect();
            if !config.json {
                println!("Mixed elements over {}, n = {}, p = {}", field, config.n, p);
            }
            print_elements(config, collected);
        }
    }
    Ok(())
}

fn print_sequences(config: &CliConfig, label: &str, sequences: &[Vec<u32>]) {
    if config.json {
        print_json(sequences);
        return;
    }
    println!("{} {} of {}:", sequences.len(), label, config.n);
    for sequence in sequences {
        println!("  {:?}", sequence);
    }
}

/// Prints `value` as pretty JSON, exiting with status 1 if it cannot be
/// serialized.
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: could not serialize results: {}", e);
            std::process::exit(1);
        }
    }
}

/// Keeps every element, or with `--apex` one element per apex value in
/// decreasing order.
fn select_elements(config: &CliConfig, elements: Vec<SpectraElement>) -> Vec<SpectraElement> {
    if !config.apex {
        return elements;
    }
    let mut by_value: BTreeMap<BigUint, SpectraElement> = BTreeMap::new();
    for element in elements {
        by_value.entry(element.value().clone()).or_insert(element);
    }
    let apex = sort_and_filter(by_value.keys().cloned(), true);
    apex.iter().filter_map(|value| by_value.remove(value)).collect()
}

fn element_reports(config: &CliConfig, elements: &[SpectraElement]) -> Vec<ElementReport> {
    elements
        .iter()
        .map(|element| ElementReport {
            value: element.value().to_string(),
            verbose: config.verbose.then(|| element.str_verbose()),
        })
        .collect()
}

fn print_elements(config: &CliConfig, elements: Vec<SpectraElement>) {
    let total = elements.len();
    let selected = select_elements(config, elements);
    log::info!("{} of {} elements selected", selected.len(), total);

    if config.json {
        print_json(&element_reports(config, &selected));
        return;
    }

    for element in &selected {
        if config.verbose {
            println!("  {:>12} = {}", element.value(), element.str_verbose());
        } else {
            println!("  {}", element.value());
        }
    }
    println!("{} values", selected.len());
}

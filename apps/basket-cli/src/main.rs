//! # Basket Pricer CLI
//!
//! Prices a JSON pricing request and prints the formatted totals.
//!
//! ## Usage
//! ```bash
//! # Price a request file
//! cargo run -p basket-cli -- demos/mixed-offers.json
//!
//! # Read the request from stdin
//! cat request.json | cargo run -p basket-cli
//!
//! # Emit JSON instead of a table
//! cargo run -p basket-cli -- --json demos/mixed-offers.json
//!
//! # Debug logging
//! RUST_LOG=basket_core=debug cargo run -p basket-cli -- demos/shampoo.json
//! ```
//!
//! ## Currency
//! `currencyOptions` in the request wins; otherwise `BASKET_CURRENCY` and
//! `BASKET_LOCALE`; otherwise GBP / en-GB.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use basket_core::{BasketTotals, CoreError, CurrencyOptions, PricingRequest};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("Failed to encode output: {0}")]
    Encode(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

struct Args {
    path: Option<String>,
    json: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        path: None,
        json: false,
    };
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => args.json = true,
            _ => args.path = Some(arg),
        }
    }
    args
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show dropped entries and per-line pricing
/// - Default: INFO for basket crates, WARN otherwise
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,basket_core=info,basket_cli=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_request(path: Option<&str>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_string(),
            source,
        }),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let raw = read_request(args.path.as_deref())?;
    let request = PricingRequest::from_json(&raw)?;
    let currency = request.currency_or(CurrencyOptions::from_env().map_err(CoreError::from)?);

    let priced = request.price()?;
    let totals = BasketTotals::from(&priced);
    let formatted = totals.format(&currency);

    info!(
        line_items = totals.item_count,
        currency = %currency.currency,
        locale = %currency.locale,
        "Basket priced"
    );

    if args.json {
        let out = serde_json::to_string_pretty(&formatted)
            .map_err(|e| CliError::Encode(e.to_string()))?;
        println!("{out}");
    } else {
        println!("┌──────────┬──────────────┐");
        println!("│ subTotal │ {:>12} │", formatted.sub_total);
        println!("│ discount │ {:>12} │", formatted.discount);
        println!("│ total    │ {:>12} │", formatted.total);
        println!("└──────────┴──────────────┘");
    }

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let args = parse_args();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Pricing failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

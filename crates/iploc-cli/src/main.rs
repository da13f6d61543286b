//! iploc — command-line interface for iploc-core
//!
//! Resolves IP addresses and country names/codes against a range-based
//! geolocation dataset (headerless CSV, one IPv4 range per row).
//!
//! Usage examples
//! --------------
//!
//! - Resolve an address or a country
//!   $ iploc 8.8.8.8
//!   $ iploc AU
//!   $ iploc "United States" --offset 10 --limit 5
//!
//! - Several queries in one run (the dataset is opened once)
//!   $ iploc 1.0.0.5 DE Japan
//!
//! - List the countries present in the dataset
//!   $ iploc --list
//!
//! - Dump every record
//!   $ iploc --all --limit 100 --format csv
//!
//! Per-query resolution errors are reported and the remaining queries still
//! run; only argument errors and a dataset that cannot be opened are fatal.

mod args;
mod printer;

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use iploc_core::DatasetSource;

use crate::args::CliArgs;
use crate::printer::Printer;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    args.validate()?;

    if !args.silent {
        printer::banner();
        for w in args.warnings() {
            printer::warning(&w);
        }
    }

    let mut source = DatasetSource::open(&args.input)
        .with_context(|| format!("cannot open dataset at {}", args.input))?;
    log::debug!("dataset opened from {}", args.input);

    let output = Printer::new(args.format);
    let started = Instant::now();
    let mut counts: Vec<usize> = Vec::new();

    if !args.query.is_empty() {
        for token in &args.query {
            if !args.silent {
                printer::query_header(token);
            }

            match iploc_core::resolve(&mut source, token, args.offset, args.limit) {
                Ok(records) => {
                    log::debug!("query {token:?} matched {} records", records.len());
                    counts.push(records.len());
                    for record in &records {
                        output.record(record)?;
                    }
                }
                // A failed query never aborts the rest of the batch.
                Err(err) => {
                    printer::error(&err.to_string());
                    counts.push(0);
                }
            }
        }
    } else if args.list {
        match iploc_core::list_countries(&mut source) {
            Ok(mut countries) => {
                // The scan hands the list back sorted descending; display
                // ascending by 2-letter code.
                countries.sort_by(|a, b| a[0].cmp(&b[0]));
                counts.push(countries.len());
                for (index, country) in countries.iter().enumerate() {
                    printer::country_line(index, country);
                }
            }
            Err(err) => printer::error(&err.to_string()),
        }
    } else if args.all {
        match iploc_core::resolve_all(&mut source, args.offset, args.limit) {
            Ok(records) => {
                counts.push(records.len());
                for record in &records {
                    output.record(record)?;
                }
            }
            Err(err) => printer::error(&err.to_string()),
        }
    }

    if !args.no_summary {
        printer::summary(&counts, started.elapsed());
    }

    Ok(())
}

// crates/iploc-core/src/lib.rs

//! # iploc-core
//!
//! Streaming resolver for range-based IP geolocation datasets.
//!
//! The dataset is flat, headerless CSV: one row per IPv4 range with its
//! registry and country triple. There is no index and no sorted search
//! structure; every query is one restartable linear pass, driven by a
//! pluggable [`QueryProcess`] (predicate + accumulation/stop policy +
//! finalization) over a rewindable [`DatasetSource`].
//!
//! ```no_run
//! use iploc_core::{resolve, DatasetSource};
//!
//! fn main() -> iploc_core::Result<()> {
//!     let mut source = DatasetSource::open("geoip.csv")?;
//!
//!     // The same open source serves many sequential queries; the scan
//!     // driver rewinds it after every pass.
//!     let by_ip = resolve(&mut source, "1.0.0.5", 0, 0)?;
//!     let by_country = resolve(&mut source, "AU", 0, 10)?;
//!
//!     println!("{} + {} records", by_ip.len(), by_country.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod query;
pub mod record;
pub mod scan;
pub mod source;

// Re-exports
pub use crate::error::{IplocError, Result};
pub use crate::query::{
    list_countries, resolve, resolve_all, resolve_country, resolve_ip, AllQuery, CountryQuery,
    IpQuery, ListCountriesQuery,
};
pub use crate::record::{addr_to_u32, CountryTriple, GeoIpRecord};
pub use crate::scan::{run_scan, QueryProcess};
pub use crate::source::DatasetSource;

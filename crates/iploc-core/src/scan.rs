// crates/iploc-core/src/scan.rs

use crate::error::{IplocError, Result};
use crate::record::GeoIpRecord;
use crate::source::DatasetSource;

/// One unit of query work driving a single scan of a [`DatasetSource`].
///
/// The scan driver invokes the operations in a fixed protocol:
/// create → [`init`] → {[`matches`] / [`accumulate`] / [`on_decode_error`]}*
/// → [`finalize`] → discard. An instance is never reused across scans.
///
/// [`init`]: QueryProcess::init
/// [`matches`]: QueryProcess::matches
/// [`accumulate`]: QueryProcess::accumulate
/// [`on_decode_error`]: QueryProcess::on_decode_error
/// [`finalize`]: QueryProcess::finalize
pub trait QueryProcess {
    type Output;

    /// One-time setup before scanning begins (e.g. precomputing the numeric
    /// form of a query address). An error here aborts the scan before any
    /// row is read.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Pure predicate, called for every successfully decoded record.
    fn matches(&self, index: usize, record: &GeoIpRecord) -> bool;

    /// Called only when [`matches`](Self::matches) returned true. Takes
    /// ownership of the record; returns whether the scan should continue
    /// (`false` stops and finalizes immediately).
    fn accumulate(&mut self, index: usize, record: GeoIpRecord) -> bool;

    /// Called when a row fails to decode (end of data is a silent stop and
    /// never routed here). Returns whether to skip the bad row and continue.
    fn on_decode_error(&mut self, index: usize, error: IplocError) -> bool;

    /// Called exactly once after the scan loop ends, by exhaustion, early
    /// stop or error alike. Yields the accumulated result or the scan's
    /// terminal error; a terminal error supersedes anything accumulated
    /// before it. Zero matches is an empty result, not an error.
    fn finalize(self) -> Result<Self::Output>;
}

/// Runs `process` over one full pass of `source`.
///
/// `cap` bounds the number of iterations; 0 means unbounded. After the loop
/// terminates by any path the source is rewound unconditionally, so the same
/// open source can serve many sequential queries without reopening the
/// dataset. A rewind failure takes precedence over the finalized result.
pub fn run_scan<P: QueryProcess>(
    source: &mut DatasetSource,
    mut process: P,
    cap: usize,
) -> Result<P::Output> {
    process.init()?;

    let mut index = 0;
    while cap == 0 || index < cap {
        match source.decode_next() {
            Ok(Some(record)) => {
                if process.matches(index, &record) && !process.accumulate(index, record) {
                    break;
                }
            }
            Ok(None) => break,
            Err(err) => {
                if !process.on_decode_error(index, err) {
                    break;
                }
            }
        }
        index += 1;
    }

    let rewound = source.rewind();
    let output = process.finalize();
    rewound?;
    output
}

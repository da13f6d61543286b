// crates/iploc-core/src/source.rs

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use csv::{Position, ReaderBuilder, StringRecord};

use crate::error::{IplocError, Result};
use crate::record::GeoIpRecord;

/// Sequential, rewindable provider of [`GeoIpRecord`]s from a CSV dataset.
///
/// The dataset is comma-separated, headerless, exactly 7 fields per row:
/// `from,to,registry,num,country_code2,country_code3,country_name`.
///
/// The source owns the open file and a single decode cursor. Scans never
/// interleave: the scan driver is the only consumer of [`decode_next`] and
/// [`rewind`], and it rewinds after every scan so the source is always
/// positioned at the start of data for the next query.
///
/// [`decode_next`]: DatasetSource::decode_next
/// [`rewind`]: DatasetSource::rewind
#[derive(Debug)]
pub struct DatasetSource {
    reader: csv::Reader<File>,
    row: StringRecord,
}

impl DatasetSource {
    /// Opens the dataset at `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;

        // flexible: field-count validation is ours, with a per-row error the
        // running query process can elect to skip.
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            reader,
            row: StringRecord::new(),
        })
    }

    /// Decodes the next row, or `None` at end of data.
    pub fn decode_next(&mut self) -> Result<Option<GeoIpRecord>> {
        let more = self
            .reader
            .read_record(&mut self.row)
            .map_err(map_csv_err)?;

        if !more {
            return Ok(None);
        }

        decode_row(&self.row).map(Some)
    }

    /// Repositions the cursor to the logical start of data.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader.seek(Position::new()).map_err(map_csv_err)
    }
}

fn map_csv_err(err: csv::Error) -> IplocError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => IplocError::Io(e),
        _ => IplocError::Format { line, reason },
    }
}

fn decode_row(row: &StringRecord) -> Result<GeoIpRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);

    if row.len() != 7 {
        return Err(IplocError::Format {
            line,
            reason: format!("expected 7 fields, found {}", row.len()),
        });
    }

    Ok(GeoIpRecord {
        from: parse_numeric(&row[0], line, "from")?,
        to: parse_numeric(&row[1], line, "to")?,
        registry: row[2].to_string(),
        num: parse_numeric(&row[3], line, "num")?,
        country: [row[4].to_string(), row[5].to_string(), row[6].to_string()],
    })
}

fn parse_numeric<T>(raw: &str, line: u64, field: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e| IplocError::Format {
        line,
        reason: format!("field `{field}`: {e}"),
    })
}

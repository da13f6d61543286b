// crates/iploc-core/src/query.rs

use std::net::IpAddr;

use crate::error::{IplocError, Result};
use crate::record::{addr_to_u32, CountryTriple, GeoIpRecord};
use crate::scan::{run_scan, QueryProcess};
use crate::source::DatasetSource;

/// Category query: match the country triple against a name or code.
///
/// The field compared depends on the query string's length: 2 characters
/// match the 2-letter code, 3 the 3-letter code, anything else the full
/// name. Accumulation skips `offset` matches silently, then collects until
/// `limit` is reached (0 = unbounded) and stops the scan.
pub struct CountryQuery {
    name: String,
    offset: usize,
    limit: usize,

    records: Vec<GeoIpRecord>,
    found: usize,
    err: Option<IplocError>,
}

impl CountryQuery {
    pub fn new(name: impl Into<String>, offset: usize, limit: usize) -> Self {
        Self {
            name: name.into(),
            offset,
            limit,
            records: Vec::new(),
            found: 0,
            err: None,
        }
    }
}

impl QueryProcess for CountryQuery {
    type Output = Vec<GeoIpRecord>;

    fn matches(&self, _index: usize, record: &GeoIpRecord) -> bool {
        match self.name.len() {
            2 => record.code2() == self.name,
            3 => record.code3() == self.name,
            _ => record.country_name() == self.name,
        }
    }

    fn accumulate(&mut self, _index: usize, record: GeoIpRecord) -> bool {
        if self.offset > 0 {
            self.offset -= 1;
            return true;
        }

        self.records.push(record);
        self.found += 1;
        self.limit == 0 || self.found < self.limit
    }

    fn on_decode_error(&mut self, _index: usize, error: IplocError) -> bool {
        self.err = Some(error);
        false
    }

    fn finalize(self) -> Result<Self::Output> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Containment query: match the range holding a query address.
///
/// Accumulates the first containing range and stops the scan immediately;
/// with overlapping ranges the first row in file order wins.
pub struct IpQuery {
    addr: IpAddr,
    q: Option<u32>,

    records: Vec<GeoIpRecord>,
    err: Option<IplocError>,
}

impl IpQuery {
    pub fn new(addr: IpAddr) -> Self {
        Self {
            addr,
            q: None,
            records: Vec::new(),
            err: None,
        }
    }
}

impl QueryProcess for IpQuery {
    type Output = Vec<GeoIpRecord>;

    fn init(&mut self) -> Result<()> {
        self.q = addr_to_u32(self.addr);
        Ok(())
    }

    fn matches(&self, _index: usize, record: &GeoIpRecord) -> bool {
        self.q.is_some_and(|q| record.contains(q))
    }

    fn accumulate(&mut self, _index: usize, record: GeoIpRecord) -> bool {
        self.records.push(record);
        false
    }

    fn on_decode_error(&mut self, _index: usize, error: IplocError) -> bool {
        self.err = Some(error);
        false
    }

    fn finalize(self) -> Result<Self::Output> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Unrestricted pass-through: every record matches, with the same
/// offset/limit policy as [`CountryQuery`].
pub struct AllQuery {
    offset: usize,
    limit: usize,

    records: Vec<GeoIpRecord>,
    found: usize,
    err: Option<IplocError>,
}

impl AllQuery {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            records: Vec::new(),
            found: 0,
            err: None,
        }
    }
}

impl QueryProcess for AllQuery {
    type Output = Vec<GeoIpRecord>;

    fn matches(&self, _index: usize, _record: &GeoIpRecord) -> bool {
        true
    }

    fn accumulate(&mut self, _index: usize, record: GeoIpRecord) -> bool {
        if self.offset > 0 {
            self.offset -= 1;
            return true;
        }

        self.records.push(record);
        self.found += 1;
        self.limit == 0 || self.found < self.limit
    }

    fn on_decode_error(&mut self, _index: usize, error: IplocError) -> bool {
        self.err = Some(error);
        false
    }

    fn finalize(self) -> Result<Self::Output> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Distinct-country collection: each country triple is collected once.
///
/// The accumulator is probed linearly on every row; the distinct-country set
/// is small (a few hundred entries at most) so the quadratic probe is fine.
/// Finalize sorts descending by 2-letter code; display layers re-sort
/// ascending.
#[derive(Default)]
pub struct ListCountriesQuery {
    countries: Vec<CountryTriple>,
    err: Option<IplocError>,
}

impl ListCountriesQuery {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueryProcess for ListCountriesQuery {
    type Output = Vec<CountryTriple>;

    fn matches(&self, _index: usize, record: &GeoIpRecord) -> bool {
        !self.countries.iter().any(|c| c[0] == record.code2())
    }

    fn accumulate(&mut self, _index: usize, record: GeoIpRecord) -> bool {
        self.countries.push(record.country);
        true
    }

    fn on_decode_error(&mut self, _index: usize, error: IplocError) -> bool {
        self.err = Some(error);
        false
    }

    fn finalize(mut self) -> Result<Self::Output> {
        match self.err {
            Some(err) => Err(err),
            None => {
                self.countries.sort_by(|a, b| b[0].cmp(&a[0]));
                Ok(self.countries)
            }
        }
    }
}

/// Resolves a single query token: strings that parse as an IP address run a
/// containment scan, everything else a country match with `offset`/`limit`.
pub fn resolve(
    source: &mut DatasetSource,
    query: &str,
    offset: usize,
    limit: usize,
) -> Result<Vec<GeoIpRecord>> {
    match query.parse::<IpAddr>() {
        Ok(addr) => resolve_ip(source, addr),
        Err(_) => resolve_country(source, query, offset, limit),
    }
}

/// Finds the range containing `addr`; at most one record, first row in file
/// order wins.
pub fn resolve_ip(source: &mut DatasetSource, addr: IpAddr) -> Result<Vec<GeoIpRecord>> {
    run_scan(source, IpQuery::new(addr), 0)
}

/// Finds all records for a country name or code, paginated.
pub fn resolve_country(
    source: &mut DatasetSource,
    name: &str,
    offset: usize,
    limit: usize,
) -> Result<Vec<GeoIpRecord>> {
    run_scan(source, CountryQuery::new(name, offset, limit), 0)
}

/// Returns every record in the dataset, paginated.
pub fn resolve_all(
    source: &mut DatasetSource,
    offset: usize,
    limit: usize,
) -> Result<Vec<GeoIpRecord>> {
    run_scan(source, AllQuery::new(offset, limit), 0)
}

/// Collects the distinct country triples present in the dataset, sorted
/// descending by 2-letter code.
pub fn list_countries(source: &mut DatasetSource) -> Result<Vec<CountryTriple>> {
    run_scan(source, ListCountriesQuery::new(), 0)
}

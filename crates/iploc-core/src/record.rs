// crates/iploc-core/src/record.rs

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Country triple as stored in the dataset: 2-letter code, 3-letter code,
/// full name, in that order.
pub type CountryTriple = [String; 3];

/// One decoded dataset row mapping an IPv4 range to a country/registry.
///
/// `from` and `to` are IPv4 addresses in their big-endian integer form.
/// `from <= to` is expected of a well-formed dataset but not enforced at
/// decode time. A record is immutable once built; ownership moves into the
/// query's result collection when a scan keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoIpRecord {
    pub from: u32,
    pub to: u32,
    pub registry: String,
    pub num: u64,
    pub country: CountryTriple,
}

impl GeoIpRecord {
    /// Inclusive range check: `from <= addr <= to`.
    #[inline]
    pub fn contains(&self, addr: u32) -> bool {
        self.from <= addr && addr <= self.to
    }

    #[inline]
    pub fn from_ip(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.from)
    }

    #[inline]
    pub fn to_ip(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.to)
    }

    /// 2-letter country code (e.g. "AU").
    #[inline]
    pub fn code2(&self) -> &str {
        &self.country[0]
    }

    /// 3-letter country code (e.g. "AUS").
    #[inline]
    pub fn code3(&self) -> &str {
        &self.country[1]
    }

    /// Full country name (e.g. "Australia").
    #[inline]
    pub fn country_name(&self) -> &str {
        &self.country[2]
    }
}

/// Numeric form of a query address, if it has one.
///
/// The dataset is IPv4-only, so IPv6 addresses are usable only through their
/// IPv4-mapped form (`::ffff:a.b.c.d`); any other IPv6 address yields `None`
/// and can never match a range.
pub fn addr_to_u32(addr: IpAddr) -> Option<u32> {
    match addr {
        IpAddr::V4(v4) => Some(u32::from(v4)),
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(u32::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: u32, to: u32) -> GeoIpRecord {
        GeoIpRecord {
            from,
            to,
            registry: "apnic".to_string(),
            num: 1,
            country: [
                "AU".to_string(),
                "AUS".to_string(),
                "Australia".to_string(),
            ],
        }
    }

    #[test]
    fn containment_is_inclusive_on_both_ends() {
        let r = record(16_777_216, 16_777_471);
        assert!(r.contains(16_777_216));
        assert!(r.contains(16_777_471));
        assert!(r.contains(16_777_300));
        assert!(!r.contains(16_777_215));
        assert!(!r.contains(16_777_472));
    }

    #[test]
    fn integer_form_matches_dotted_decimal() {
        let r = record(16_777_216, 16_777_471);
        assert_eq!(r.from_ip().to_string(), "1.0.0.0");
        assert_eq!(r.to_ip().to_string(), "1.0.0.255");
    }

    #[test]
    fn v6_queries_only_match_through_mapped_form() {
        assert_eq!(
            addr_to_u32("1.0.0.5".parse().unwrap()),
            Some(16_777_221)
        );
        assert_eq!(
            addr_to_u32("::ffff:1.0.0.5".parse().unwrap()),
            Some(16_777_221)
        );
        assert_eq!(addr_to_u32("2001:db8::1".parse().unwrap()), None);
    }
}

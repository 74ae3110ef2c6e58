//! MaxMind GeoLite2 数据库实现
//!
//! 使用本地 MaxMind GeoLite2-City.mmdb 文件进行 IP 地理位置查询

use std::net::IpAddr;

use maxminddb::Reader;
use tracing::trace;

use super::provider::{GeoIpLookup, GeoLocation};
use crate::errors::{MapIpError, Result};
use crate::map::GeoCoordinate;

/// MaxMind GeoIP Provider
pub struct MaxMindProvider {
    reader: Reader<Vec<u8>>,
}

impl MaxMindProvider {
    /// 从文件路径创建 MaxMind Provider
    pub fn new(path: &str) -> std::result::Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self { reader })
    }
}

impl GeoIpLookup for MaxMindProvider {
    fn lookup(&self, ip: &str) -> Result<GeoLocation> {
        let ip_addr: IpAddr = ip
            .parse()
            .map_err(|_| MapIpError::lookup(format!("'{}' is not an IP address", ip)))?;

        let result = self
            .reader
            .lookup(ip_addr)
            .map_err(|e| MapIpError::lookup(format!("MaxMind lookup for {} failed: {}", ip, e)))?;
        let city: Option<maxminddb::geoip2::City> = result
            .decode()
            .map_err(|e| MapIpError::lookup(format!("MaxMind record for {} is invalid: {}", ip, e)))?;
        let city = city.ok_or_else(|| {
            MapIpError::lookup(format!("{} is not in the MaxMind database", ip))
        })?;

        let (Some(latitude), Some(longitude)) = (city.location.latitude, city.location.longitude)
        else {
            return Err(MapIpError::lookup(format!(
                "MaxMind has no coordinates for {}",
                ip
            )));
        };

        // 新版 API: 字段直接访问，不再是 Option
        let country = city.country.iso_code.map(String::from);
        let city_name = city.city.names.english.map(|s| s.to_string());
        let region = city
            .subdivisions
            .first()
            .and_then(|s| s.names.english)
            .map(|s| s.to_string());

        trace!(
            "MaxMind lookup for {}: lat={}, lon={}, country={:?}, city={:?}",
            ip, latitude, longitude, country, city_name
        );

        Ok(GeoLocation {
            coordinate: GeoCoordinate::new(latitude, longitude).clamped(),
            city: city_name,
            region,
            country,
        })
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_DB: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/GeoIP2-City-Test.mmdb");

    fn provider() -> MaxMindProvider {
        MaxMindProvider::new(TEST_DB).unwrap()
    }

    #[test]
    fn test_lookup_hit() {
        let loc = provider().lookup("81.2.69.142").unwrap();

        assert_eq!(loc.coordinate.latitude, 51.5142);
        assert_eq!(loc.coordinate.longitude, -0.0931);
        assert_eq!(loc.city.as_deref(), Some("London"));
        assert_eq!(loc.region.as_deref(), Some("England"));
        assert_eq!(loc.country.as_deref(), Some("GB"));
        assert_eq!(loc.place_label(), "London, England, GB");
    }

    #[test]
    fn test_lookup_hit_other_network() {
        let loc = provider().lookup("175.16.199.7").unwrap();
        assert_eq!(loc.coordinate.longitude, 125.3228);
        assert_eq!(loc.region.as_deref(), Some("Jilin Sheng"));
        assert_eq!(loc.country.as_deref(), Some("CN"));
    }

    #[test]
    fn test_lookup_miss_is_lookup_error() {
        let p = provider();
        assert!(matches!(p.lookup("8.8.8.8"), Err(MapIpError::Lookup(_))));
        assert!(matches!(p.lookup("10.0.0.1"), Err(MapIpError::Lookup(_))));
    }

    #[test]
    fn test_record_without_coordinates_is_lookup_error() {
        let err = provider().lookup("2.125.160.216").unwrap_err();
        assert!(matches!(err, MapIpError::Lookup(_)));
        assert!(err.message().contains("no coordinates"));
    }

    #[test]
    fn test_invalid_input_is_lookup_error() {
        let p = provider();
        assert!(matches!(p.lookup("not-an-ip"), Err(MapIpError::Lookup(_))));
        // IPv4-only 数据库不能查询 IPv6
        assert!(matches!(p.lookup("2001:db8::1"), Err(MapIpError::Lookup(_))));
    }

    #[test]
    fn test_open_missing_database() {
        assert!(MaxMindProvider::new("/nonexistent/GeoLite2-City.mmdb").is_err());
    }

    #[test]
    fn test_open_garbage_database() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not a maxmind database").unwrap();
        assert!(MaxMindProvider::new(&file.path().to_string_lossy()).is_err());
    }
}

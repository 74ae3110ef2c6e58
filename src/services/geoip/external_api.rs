//! 外部 GeoIP API 实现
//!
//! 使用外部 HTTP API 进行 IP 地理位置查询，兼容几种常见的响应格式：
//! - ipinfo.io:  `{"loc": "37.4056,-122.0775", "city": ..., "region": ..., "country": "US"}`
//! - ip-api.com: `{"status": "success", "lat": 37.4, "lon": -122.1, "regionName": ...}`
//! - ipapi.co / ipwho.is: `{"latitude": 37.4, "longitude": -122.1, ...}`

use serde_json::Value;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{GeoIpLookup, GeoLocation};
use crate::config::GeoIpConfig;
use crate::config::validators::IP_PLACEHOLDER;
use crate::errors::{MapIpError, Result};
use crate::map::GeoCoordinate;
use crate::services::build_agent;

/// 外部 API GeoIP Provider
pub struct ExternalApiProvider {
    agent: Agent,
    api_url_template: String,
}

impl ExternalApiProvider {
    /// 创建外部 API Provider
    ///
    /// `api_url_template` 使用 `{ip}` 作为占位符
    /// 例如: `https://ipinfo.io/{ip}/json`
    pub fn new(api_url_template: &str, timeout: std::time::Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            api_url_template: api_url_template.to_string(),
        }
    }

    pub fn from_config(config: &GeoIpConfig) -> Self {
        Self::new(
            &config.geoip_api_url,
            std::time::Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn url_for(&self, ip: &str) -> String {
        self.api_url_template.replace(IP_PLACEHOLDER, ip)
    }

    fn fetch_json(&self, url: &str) -> Result<Value> {
        let resp = self.agent.get(url).call().map_err(|e| match e {
            // 4xx（超时与限流除外）说明服务不认识这个地址
            ureq::Error::StatusCode(code) if is_lookup_rejection(code) => {
                MapIpError::lookup(format!("GeoIP API rejected the address (HTTP {})", code))
            }
            other => {
                let err = MapIpError::from(other);
                MapIpError::network(format!(
                    "GeoIP API request to \"{}\" failed: {}",
                    url,
                    err.message()
                ))
            }
        })?;

        resp.into_body().read_json::<Value>().map_err(|e| {
            MapIpError::network(format!(
                "GeoIP API response from \"{}\" parse failed: {}",
                url, e
            ))
        })
    }
}

impl GeoIpLookup for ExternalApiProvider {
    fn lookup(&self, ip: &str) -> Result<GeoLocation> {
        let url = self.url_for(ip);
        trace!("GeoIP lookup for {} via {}", ip, url);

        let json = self.fetch_json(&url)?;
        let location = parse_location(&json)
            .map_err(|e| MapIpError::lookup(format!("{}: {}", ip, e.message())))?;

        trace!(
            "External API lookup: coord={}, place={}",
            location.coordinate,
            location.place_label()
        );
        Ok(location)
    }

    fn name(&self) -> &'static str {
        "ExternalAPI"
    }
}

fn is_lookup_rejection(code: u16) -> bool {
    (400..500).contains(&code) && code != 408 && code != 429
}

/// 解析 API 返回的 JSON
pub fn parse_location(json: &Value) -> Result<GeoLocation> {
    if !json.is_object() {
        return Err(MapIpError::lookup("response is not a JSON object"));
    }

    // ip-api.com 失败时返回: {"status": "fail", "message": "private range"}
    if json["status"].as_str() == Some("fail") {
        let reason = json["message"].as_str().unwrap_or("lookup failed");
        return Err(MapIpError::lookup(reason.to_string()));
    }
    // ipinfo.io 对私有/保留地址返回 {"bogon": true}
    if json["bogon"].as_bool() == Some(true) {
        return Err(MapIpError::lookup("private or reserved address"));
    }
    // ipwho.is
    if json["success"].as_bool() == Some(false) {
        let reason = json["message"].as_str().unwrap_or("lookup failed");
        return Err(MapIpError::lookup(reason.to_string()));
    }
    // ipapi.co: {"error": true, "reason": ...}; ipinfo.io: {"error": {"title": ...}}
    if !json["error"].is_null() && json["error"] != Value::Bool(false) {
        let reason = json["reason"]
            .as_str()
            .or_else(|| json["error"]["message"].as_str())
            .or_else(|| json["error"]["title"].as_str())
            .unwrap_or("lookup failed");
        return Err(MapIpError::lookup(reason.to_string()));
    }

    let coordinate = parse_coordinate(json)?;
    let coordinate = if coordinate.is_valid() {
        coordinate
    } else {
        warn!(
            "GeoIP API returned out-of-range coordinates {}, clamping",
            coordinate
        );
        coordinate.clamped()
    };

    Ok(GeoLocation {
        coordinate,
        city: string_field(json, &["city"]),
        region: string_field(json, &["region", "regionName", "region_name"]),
        country: string_field(json, &["country", "countryCode", "country_code"]),
    })
}

fn parse_coordinate(json: &Value) -> Result<GeoCoordinate> {
    if let Some(loc) = json["loc"].as_str() {
        let (lat, lon) = loc
            .split_once(',')
            .ok_or_else(|| MapIpError::lookup(format!("malformed loc field '{}'", loc)))?;
        let lat = parse_degrees(lat.trim())?;
        let lon = parse_degrees(lon.trim())?;
        return Ok(GeoCoordinate::new(lat, lon));
    }

    for (lat_key, lon_key) in [("lat", "lon"), ("latitude", "longitude")] {
        if let (Some(lat), Some(lon)) = (number_field(&json[lat_key]), number_field(&json[lon_key]))
        {
            return Ok(GeoCoordinate::new(lat, lon));
        }
    }

    Err(MapIpError::lookup("response has no coordinates"))
}

fn parse_degrees(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MapIpError::lookup(format!("invalid coordinate '{}'", text)))
}

/// 数字或数字字符串
fn number_field(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

fn string_field(json: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| json[*key].as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ipinfo() {
        let body = json!({
            "ip": "8.8.8.8",
            "city": "Mountain View",
            "region": "California",
            "country": "US",
            "loc": "37.4056,-122.0775",
            "org": "AS15169 Google LLC"
        });
        let loc = parse_location(&body).unwrap();
        assert_eq!(loc.coordinate, GeoCoordinate::new(37.4056, -122.0775));
        assert_eq!(loc.place_label(), "Mountain View, California, US");
    }

    #[test]
    fn test_parse_ip_api() {
        let body = json!({
            "status": "success",
            "countryCode": "DE",
            "regionName": "Hesse",
            "city": "Frankfurt am Main",
            "lat": 50.1109,
            "lon": 8.68213
        });
        let loc = parse_location(&body).unwrap();
        assert_eq!(loc.coordinate, GeoCoordinate::new(50.1109, 8.68213));
        assert_eq!(loc.region.as_deref(), Some("Hesse"));
        assert_eq!(loc.country.as_deref(), Some("DE"));
    }

    #[test]
    fn test_parse_latitude_longitude_strings() {
        let body = json!({"latitude": "-33.8688", "longitude": "151.2093", "city": ""});
        let loc = parse_location(&body).unwrap();
        assert_eq!(loc.coordinate, GeoCoordinate::new(-33.8688, 151.2093));
        assert_eq!(loc.city, None);
    }

    #[test]
    fn test_bogon_is_lookup_error() {
        let body = json!({"ip": "192.168.1.1", "bogon": true});
        assert!(matches!(
            parse_location(&body),
            Err(MapIpError::Lookup(_))
        ));
    }

    #[test]
    fn test_fail_status_is_lookup_error() {
        let body = json!({"status": "fail", "message": "private range", "query": "10.0.0.1"});
        let err = parse_location(&body).unwrap_err();
        assert!(matches!(err, MapIpError::Lookup(_)));
        assert!(err.message().contains("private range"));
    }

    #[test]
    fn test_error_object_is_lookup_error() {
        let body = json!({"error": {"title": "Wrong ip", "message": "Please provide a valid IP address"}});
        let err = parse_location(&body).unwrap_err();
        assert!(err.message().contains("valid IP"));

        let body = json!({"ip": "127.0.0.1", "error": true, "reason": "Reserved IP Address"});
        let err = parse_location(&body).unwrap_err();
        assert!(err.message().contains("Reserved"));
    }

    #[test]
    fn test_missing_coordinates() {
        let body = json!({"ip": "8.8.8.8", "city": "Somewhere"});
        let err = parse_location(&body).unwrap_err();
        assert!(err.message().contains("no coordinates"));

        let body = json!({"loc": "north,west"});
        assert!(parse_location(&body).is_err());

        assert!(parse_location(&json!("8.8.8.8")).is_err());
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let body = json!({"lat": 120.0, "lon": -200.0});
        let loc = parse_location(&body).unwrap();
        assert_eq!(loc.coordinate, GeoCoordinate::new(90.0, -180.0));
    }

    #[test]
    fn test_url_for() {
        let provider = ExternalApiProvider::new(
            "http://ip-api.com/json/{ip}?fields=status,lat,lon",
            std::time::Duration::from_secs(1),
        );
        assert_eq!(
            provider.url_for("1.1.1.1"),
            "http://ip-api.com/json/1.1.1.1?fields=status,lat,lon"
        );
    }

    #[test]
    fn test_lookup_rejection_codes() {
        assert!(is_lookup_rejection(404));
        assert!(is_lookup_rejection(400));
        assert!(!is_lookup_rejection(429));
        assert!(!is_lookup_rejection(408));
        assert!(!is_lookup_rejection(503));
    }

    /// 依赖外部网络服务，CI 环境可能失败
    #[test]
    #[ignore]
    fn test_external_api_provider_lookup() {
        let provider = ExternalApiProvider::new(
            "https://ipinfo.io/{ip}/json",
            std::time::Duration::from_secs(5),
        );
        let loc = provider.lookup("8.8.8.8").unwrap();
        assert_eq!(loc.country.as_deref(), Some("US"));
    }

    /// 依赖外部网络服务，CI 环境可能失败
    #[test]
    #[ignore]
    fn test_external_api_provider_private_ip() {
        let provider = ExternalApiProvider::new(
            "https://ipinfo.io/{ip}/json",
            std::time::Duration::from_secs(5),
        );
        assert!(matches!(
            provider.lookup("192.168.1.1"),
            Err(MapIpError::Lookup(_))
        ));
    }
}

//! GeoIP 服务模块
//!
//! 提供 IP 地址地理位置查询功能，支持：
//! - MaxMind GeoLite2 本地数据库（`maxmind` feature）
//! - 外部 API（默认 ipinfo.io）

mod external_api;
#[cfg(feature = "maxmind")]
mod maxmind;
mod provider;

pub use external_api::{ExternalApiProvider, parse_location};
#[cfg(feature = "maxmind")]
pub use maxmind::MaxMindProvider;
pub use provider::{GeoIpLookup, GeoIpProvider, GeoLocation};

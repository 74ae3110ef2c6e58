//! GeoIP Provider 抽象层
//!
//! 统一的 GeoIP 查询接口，根据配置自动选择实现：
//! 1. 检查 maxminddb_path 是否配置且文件可读
//! 2. 可读 → MaxMindProvider
//! 3. 不可读或未启用 maxmind feature → ExternalApiProvider

use tracing::{debug, info, warn};

use super::external_api::ExternalApiProvider;
#[cfg(feature = "maxmind")]
use super::maxmind::MaxMindProvider;
use crate::config::GeoIpConfig;
use crate::errors::Result;
use crate::map::GeoCoordinate;

const UNKNOWN: &str = "Unknown";

/// 地理位置信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoLocation {
    pub coordinate: GeoCoordinate,
    pub city: Option<String>,
    pub region: Option<String>,
    /// 国家（ISO 代码或名称，取决于数据源）
    pub country: Option<String>,
}

impl GeoLocation {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinate: GeoCoordinate::new(latitude, longitude),
            ..Default::default()
        }
    }

    /// `"City, Region, Country"`，缺失的部分显示为 Unknown
    pub fn place_label(&self) -> String {
        [&self.city, &self.region, &self.country]
            .iter()
            .map(|part| part.as_deref().unwrap_or(UNKNOWN))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// GeoIP 查询 trait
pub trait GeoIpLookup {
    /// 查询 IP 地址的地理位置
    fn lookup(&self, ip: &str) -> Result<GeoLocation>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 统一 GeoIP Provider
///
/// 启动时根据配置自动选择实现
pub struct GeoIpProvider {
    inner: Box<dyn GeoIpLookup>,
}

impl GeoIpProvider {
    /// 根据 GeoIpConfig 初始化
    pub fn new(config: &GeoIpConfig) -> Self {
        let inner: Box<dyn GeoIpLookup> = match config.maxminddb_path {
            Some(ref path) => Self::open_database(path, config),
            None => {
                debug!("GeoIP: No MaxMind database configured, using external API");
                Box::new(ExternalApiProvider::from_config(config))
            }
        };

        info!("GeoIP: Initialized with {} provider", inner.name());
        Self { inner }
    }

    #[cfg(feature = "maxmind")]
    fn open_database(path: &str, config: &GeoIpConfig) -> Box<dyn GeoIpLookup> {
        match MaxMindProvider::new(path) {
            Ok(provider) => {
                info!("GeoIP: Using MaxMind database at {}", path);
                Box::new(provider)
            }
            Err(e) => {
                warn!(
                    "GeoIP: Failed to load MaxMind database at {}: {}, falling back to external API",
                    path, e
                );
                Box::new(ExternalApiProvider::from_config(config))
            }
        }
    }

    #[cfg(not(feature = "maxmind"))]
    fn open_database(path: &str, config: &GeoIpConfig) -> Box<dyn GeoIpLookup> {
        warn!(
            "GeoIP: Built without the `maxmind` feature, ignoring database {} and using external API",
            path
        );
        Box::new(ExternalApiProvider::from_config(config))
    }

    /// 查询 IP 地址的地理位置
    pub fn lookup(&self, ip: &str) -> Result<GeoLocation> {
        self.inner.lookup(ip)
    }

    /// 获取当前使用的 provider 名称
    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }
}

impl GeoIpLookup for GeoIpProvider {
    fn lookup(&self, ip: &str) -> Result<GeoLocation> {
        self.inner.lookup(ip)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 应用配置（由命令行参数构建，不读取配置文件）
///
/// - network: IP 查询端点与超时
/// - geoip: 地理位置查询来源
/// - display: 地图、标记与颜色
/// - watch: 轮询模式
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub geoip: GeoIpConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 网络配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    #[serde(default = "default_ip_endpoint")]
    pub ip_endpoint: String,
    /// 跳过 IP 查询，直接定位该地址
    #[serde(default)]
    pub fixed_ip: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// GeoIP 配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoIpConfig {
    /// 外部 API 模板，`{ip}` 为占位符
    #[serde(default = "default_geoip_api_url")]
    pub geoip_api_url: String,
    /// MaxMind GeoLite2-City.mmdb 路径
    #[serde(default)]
    pub maxminddb_path: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 颜色输出策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// 显示配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_marker")]
    pub marker: char,
    /// 自定义地图文件，None 使用内置地图
    #[serde(default)]
    pub map_file: Option<String>,
    #[serde(default)]
    pub mark_ocean: bool,
    #[serde(default = "default_show_header")]
    pub show_header: bool,
    #[serde(default)]
    pub color: ColorMode,
}

/// 轮询配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

// ============================================================
// Default value functions
// ============================================================

fn default_ip_endpoint() -> String {
    "https://f13rce.net/ip.php".to_string()
}

fn default_geoip_api_url() -> String {
    "https://ipinfo.io/{ip}/json".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_marker() -> char {
    'X'
}

fn default_show_header() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ip_endpoint: default_ip_endpoint(),
            fixed_ip: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            geoip_api_url: default_geoip_api_url(),
            maxminddb_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            map_file: None,
            mark_ocean: false,
            show_header: default_show_header(),
            color: ColorMode::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

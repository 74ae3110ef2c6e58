//! 配置值验证模块
//!
//! 在启动前检查命令行给出的配置是否合法，失败时返回 `InvalidConfig`。

use unicode_width::UnicodeWidthChar;

use super::AppConfig;
use crate::errors::{MapIpError, Result};
use crate::utils::url_validator::validate_url;

/// Placeholder the GeoIP API template must contain
pub const IP_PLACEHOLDER: &str = "{ip}";

/// 验证整个配置
pub fn validate_config(config: &AppConfig) -> Result<()> {
    validate_endpoint("--ip-endpoint", &config.network.ip_endpoint)?;
    validate_api_template(&config.geoip.geoip_api_url)?;

    if config.network.timeout_secs == 0 || config.geoip.timeout_secs == 0 {
        return Err(MapIpError::invalid_config(
            "--timeout must be greater than 0",
        ));
    }

    if config.watch.enabled && config.watch.interval_secs == 0 {
        return Err(MapIpError::invalid_config(
            "--interval must be greater than 0",
        ));
    }

    if let Some(ref ip) = config.network.fixed_ip
        && ip.trim().is_empty()
    {
        return Err(MapIpError::invalid_config("--ip cannot be empty"));
    }

    validate_marker(config.display.marker)?;
    validate_log_format(&config.logging.format)?;

    Ok(())
}

/// 验证 IP 查询端点
pub fn validate_endpoint(flag: &str, url: &str) -> Result<()> {
    validate_url(url)
        .map(|_| ())
        .map_err(|e| MapIpError::invalid_config(format!("{}: {}", flag, e)))
}

/// 验证 GeoIP API 模板：必须包含 `{ip}`，替换后是合法 URL
pub fn validate_api_template(template: &str) -> Result<()> {
    if !template.contains(IP_PLACEHOLDER) {
        return Err(MapIpError::invalid_config(format!(
            "--geo-api must contain the '{}' placeholder",
            IP_PLACEHOLDER
        )));
    }
    validate_endpoint("--geo-api", &template.replace(IP_PLACEHOLDER, "8.8.8.8"))
}

/// 验证标记字符：必须可见且正好占一个终端列宽
pub fn validate_marker(marker: char) -> Result<()> {
    if marker.is_whitespace() || marker.is_control() {
        return Err(MapIpError::invalid_config(
            "--marker must be a visible character",
        ));
    }
    if marker.width() != Some(1) {
        return Err(MapIpError::invalid_config(
            "--marker must occupy exactly one terminal column",
        ));
    }
    Ok(())
}

fn validate_log_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(MapIpError::invalid_config(format!(
            "Invalid log format: '{}'. Valid: text, json",
            other
        ))),
    }
}

mod structs;
pub mod validators;

pub use structs::*;
pub use validators::validate_config;

use crate::cli::Cli;
use crate::errors::{MapIpError, Result};
use crate::map::MapSource;

impl AppConfig {
    /// 从命令行参数构建并验证配置
    ///
    /// 没有配置文件，也不读取额外的环境变量；
    /// 所有值来自 clap 的默认值或用户传入的参数。
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Self {
            network: NetworkConfig {
                ip_endpoint: cli.ip_endpoint.trim().to_string(),
                fixed_ip: cli.ip.as_ref().map(|ip| ip.trim().to_string()),
                timeout_secs: cli.timeout,
            },
            geoip: GeoIpConfig {
                geoip_api_url: cli.geo_api.trim().to_string(),
                maxminddb_path: cli.geoip_db.clone(),
                timeout_secs: cli.timeout,
            },
            display: DisplayConfig {
                marker: cli.marker,
                map_file: cli.map.clone(),
                mark_ocean: cli.mark_ocean,
                show_header: !cli.no_header,
                color: cli.color.into(),
            },
            watch: WatchConfig {
                enabled: cli.watch,
                interval_secs: cli.interval,
            },
            logging: LoggingConfig {
                level: cli.log_level.clone(),
                format: cli.log_format.as_str().to_string(),
                file: cli.log_file.clone(),
            },
        };

        validate_config(&config)?;
        Ok(config)
    }

    pub fn map_source(&self) -> MapSource {
        match self.display.map_file {
            Some(ref path) => MapSource::File(path.clone()),
            None => MapSource::Bundled,
        }
    }

    /// Effective configuration as pretty JSON (for `--print-config`)
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MapIpError::invalid_config(format!("cannot serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["mapip"]).unwrap();
        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.map_source(), MapSource::Bundled);
    }

    #[test]
    fn test_from_cli_overrides() {
        let cli = Cli::try_parse_from([
            "mapip",
            "--ip",
            " 1.1.1.1 ",
            "--timeout",
            "2",
            "--no-header",
            "--map",
            "custom.txt",
            "--log-format",
            "json",
        ])
        .unwrap();
        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(config.network.fixed_ip.as_deref(), Some("1.1.1.1"));
        assert_eq!(config.geoip.timeout_secs, 2);
        assert!(!config.display.show_header);
        assert_eq!(config.map_source(), MapSource::File("custom.txt".into()));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_from_cli_rejects_bad_template() {
        let cli = Cli::try_parse_from(["mapip", "--geo-api", "https://ipinfo.io/json"]).unwrap();
        assert!(matches!(
            AppConfig::from_cli(&cli),
            Err(MapIpError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_json() {
        let json = AppConfig::default().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["display"]["marker"], "X");
        assert_eq!(value["display"]["color"], "auto");
        assert_eq!(value["watch"]["interval_secs"], 60);
    }
}

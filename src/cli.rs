//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for mapip using clap's derive macros.

use clap::{Parser, ValueEnum};

use crate::config::ColorMode;

/// mapip - Show your external IP location on an ASCII world map
#[derive(Parser, Debug, Clone)]
#[command(name = "mapip")]
#[command(version)]
#[command(
    about = "A tool to display your external IP location on an ASCII world map",
    long_about = None
)]
pub struct Cli {
    /// Endpoint that echoes the caller's public IP as plain text
    #[arg(long, value_name = "URL", default_value = "https://f13rce.net/ip.php")]
    pub ip_endpoint: String,

    /// Geolocation API URL template; `{ip}` is replaced with the address
    #[arg(long, value_name = "TEMPLATE", default_value = "https://ipinfo.io/{ip}/json")]
    pub geo_api: String,

    /// Local MaxMind GeoLite2-City database (falls back to --geo-api if unreadable)
    #[arg(long, value_name = "PATH")]
    pub geoip_db: Option<String>,

    /// Locate this address instead of resolving the external IP
    #[arg(long, value_name = "IP")]
    pub ip: Option<String>,

    /// HTTP timeout in seconds for each request
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub timeout: u64,

    /// Keep running and redraw when the external IP changes
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// How often to check for IP changes in watch mode (seconds)
    #[arg(long, short = 'i', value_name = "SECS", default_value_t = 60)]
    pub interval: u64,

    /// Glyph used to mark the location
    #[arg(long, value_name = "CHAR", default_value_t = 'X')]
    pub marker: char,

    /// Use a custom ASCII map file instead of the bundled world map
    #[arg(long, value_name = "PATH")]
    pub map: Option<String>,

    /// Draw ocean cells as dots
    #[arg(long)]
    pub mark_ocean: bool,

    /// Do not print the IP/location header line
    #[arg(long)]
    pub no_header: bool,

    /// When to use ANSI colors
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorArg::Auto)]
    pub color: ColorArg,

    /// Log filter directive (RUST_LOG takes precedence when set)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl LogFormatArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormatArg::Text => "text",
            LogFormatArg::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mapip"]).unwrap();
        assert_eq!(cli.ip_endpoint, "https://f13rce.net/ip.php");
        assert_eq!(cli.geo_api, "https://ipinfo.io/{ip}/json");
        assert_eq!(cli.timeout, 5);
        assert_eq!(cli.interval, 60);
        assert_eq!(cli.marker, 'X');
        assert!(!cli.watch);
        assert_eq!(cli.color, ColorArg::Auto);
    }

    #[test]
    fn test_watch_flags() {
        let cli = Cli::try_parse_from(["mapip", "-w", "-i", "30", "--marker", "@"]).unwrap();
        assert!(cli.watch);
        assert_eq!(cli.interval, 30);
        assert_eq!(cli.marker, '@');
    }

    #[test]
    fn test_multi_char_marker_rejected() {
        assert!(Cli::try_parse_from(["mapip", "--marker", "XY"]).is_err());
    }

    #[test]
    fn test_color_values() {
        let cli = Cli::try_parse_from(["mapip", "--color", "never"]).unwrap();
        assert_eq!(ColorMode::from(cli.color), ColorMode::Never);
        assert!(Cli::try_parse_from(["mapip", "--color", "sometimes"]).is_err());
    }
}

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapIpError {
    Network(String),
    Lookup(String),
    InvalidConfig(String),
    MapAsset(String),
    Io(String),
}

impl MapIpError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            MapIpError::Network(_) => "E001",
            MapIpError::Lookup(_) => "E002",
            MapIpError::InvalidConfig(_) => "E003",
            MapIpError::MapAsset(_) => "E004",
            MapIpError::Io(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            MapIpError::Network(_) => "Network Error",
            MapIpError::Lookup(_) => "Lookup Error",
            MapIpError::InvalidConfig(_) => "Invalid Configuration",
            MapIpError::MapAsset(_) => "Map Asset Error",
            MapIpError::Io(_) => "I/O Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            MapIpError::Network(msg) => msg,
            MapIpError::Lookup(msg) => msg,
            MapIpError::InvalidConfig(msg) => msg,
            MapIpError::MapAsset(msg) => msg,
            MapIpError::Io(msg) => msg,
        }
    }

    /// 格式化为彩色输出（写到 stderr）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for MapIpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for MapIpError {}

// 便捷的构造函数
impl MapIpError {
    pub fn network<T: Into<String>>(msg: T) -> Self {
        MapIpError::Network(msg.into())
    }

    pub fn lookup<T: Into<String>>(msg: T) -> Self {
        MapIpError::Lookup(msg.into())
    }

    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        MapIpError::InvalidConfig(msg.into())
    }

    pub fn map_asset<T: Into<String>>(msg: T) -> Self {
        MapIpError::MapAsset(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        MapIpError::Io(msg.into())
    }
}

impl From<std::io::Error> for MapIpError {
    fn from(err: std::io::Error) -> Self {
        MapIpError::Io(err.to_string())
    }
}

impl From<ureq::Error> for MapIpError {
    fn from(err: ureq::Error) -> Self {
        match &err {
            ureq::Error::StatusCode(status) => {
                MapIpError::Network(format!("server responded with HTTP {}", status))
            }
            ureq::Error::Timeout(_) => MapIpError::Network(format!("request timed out: {}", err)),
            _ => MapIpError::Network(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapIpError>;

//! 配置基础设施
//!
//! 配置全部来自环境变量，启动时可先从 `.env` 文件补充环境变量。
//! 未设置的键使用默认值，无法解析的数值记录警告后同样回退到默认值。

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 服务配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 数据快照配置
    pub data: DataConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// 绑定地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
    /// 健康检查中返回的服务名
    pub service_name: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 数据快照配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 启动时读取的 JSON 快照路径
    pub snapshot_path: PathBuf,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            timeout_seconds: 30,
            service_name: "backend".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("db.json"),
        }
    }
}

/// 配置错误类型
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("配置验证错误: {0}")]
    Validation(String),
}

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// 先加载 `.env`（不存在时忽略），再从环境变量读取配置
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => info!("已加载环境文件: {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("读取 .env 失败: {}", e),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 通过键查找函数构造配置，便于在测试中替换环境变量来源
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let level = lookup("LOG_LEVEL")
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.logging.level);

        Self {
            http: HttpConfig {
                host: lookup("HOST")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(defaults.http.host),
                port: parse_or(&lookup, "PORT", defaults.http.port),
                timeout_seconds: parse_or(
                    &lookup,
                    "REQUEST_TIMEOUT_SECS",
                    defaults.http.timeout_seconds,
                ),
                service_name: lookup("SERVICE_NAME")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(defaults.http.service_name),
            },
            logging: LoggingConfig { level },
            data: DataConfig {
                snapshot_path: lookup("DB_PATH")
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or(defaults.data.snapshot_path),
            },
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.host.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }
        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, VALID_LEVELS
            )));
        }

        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("{} 的值 {:?} 无效 ({})，使用默认值 {}", key, raw, e, default);
            default
        }),
    }
}

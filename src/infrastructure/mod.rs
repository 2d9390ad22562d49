//! 基础设施层：配置、日志、数据快照

pub mod config;
pub mod logger;
pub mod snapshot;

//! 商品模块：数据模型、列表查询、存储、业务服务与处理器

pub mod handler;
pub mod model;
pub mod query;
pub mod repository;
pub mod service;

//! # 商品列表后端
//!
//! 基于 Axum 的商品 REST 服务，数据保存在内存中，启动时从 JSON 快照加载一次。
//!
//! - `app`：路由、处理器、商品查询与存储
//! - `core`：错误处理、响应封装、中间件
//! - `infrastructure`：配置、日志、数据快照

pub mod app;
pub mod core;
pub mod infrastructure;

use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use app::AppState;
use crate::core::{
    middleware::{panic_response, request_logging_middleware, REQUEST_ID_HEADER},
    response::TOTAL_COUNT_HEADER,
};
use crate::infrastructure::config::Config;

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([TOTAL_COUNT_HEADER, REQUEST_ID_HEADER])
}

/// 组装完整的应用路由（含中间件）
pub fn build_router(state: AppState, config: &Config) -> Router {
    app::routes()
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.http.timeout_seconds,
        )))
        .with_state(state)
}

//! 应用层：路由与处理器

pub mod productos;
pub mod system;

use std::sync::Arc;

use axum::{routing::get, Router};

use self::productos::{
    model::Product,
    repository::{InMemoryProductRepository, ProductRepository},
    service::ProductService,
};

/// 处理器共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
    pub service_name: Arc<str>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ProductRepository>, service_name: &str) -> Self {
        Self {
            product_service: ProductService::new(repository),
            service_name: Arc::from(service_name),
        }
    }

    /// 以给定的种子数据构造内存存储
    pub fn in_memory(products: Vec<Product>, service_name: &str) -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::new(products)),
            service_name,
        )
    }
}

/// API 路由，不含中间件
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(system::handler::health_check))
        .route("/api/hello", get(system::handler::hello))
        .route(
            "/api/productos",
            get(productos::handler::list_products).post(productos::handler::create_product),
        )
        .route(
            "/api/productos/:id",
            get(productos::handler::get_product).delete(productos::handler::delete_product),
        )
}

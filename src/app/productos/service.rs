//! 商品业务服务

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use super::model::{CreateProductRequest, Product};
use super::query::{Page, ProductQuery, SortField};
use super::repository::ProductRepository;
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub fn list_products(&self, query: &ProductQuery) -> Result<Page, CoreError> {
        if query.sort == SortField::Unrecognized {
            debug!("未知的排序字段，保持过滤后的顺序");
        }
        self.repository.query(query)
    }

    pub fn get_product(&self, id: i64) -> Result<Product, CoreError> {
        self.repository
            .get_by_id(id)?
            .ok_or_else(|| not_found(id))
    }

    pub fn create_product(&self, request: CreateProductRequest) -> Result<Product, CoreError> {
        if let Err(errors) = request.validate() {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect();
            fields.sort();
            return Err(CoreError::BadRequest(format!(
                "缺少必填字段: {}",
                fields.join(", ")
            )));
        }

        let product = self.repository.insert(request)?;
        info!("已创建商品 {} ({})", product.id, product.titulo);
        Ok(product)
    }

    pub fn delete_product(&self, id: i64) -> Result<(), CoreError> {
        if self.repository.delete(id)? {
            info!("已删除商品 {}", id);
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

fn not_found(id: i64) -> CoreError {
    CoreError::NotFound(format!("商品 {} 不存在", id))
}

//! 商品存储

use std::sync::{PoisonError, RwLock};

use super::model::{timestamp_now, CreateProductRequest, Product};
use super::query::{Page, ProductQuery};
use crate::core::error::CoreError;

/// 商品存储接口
///
/// 只暴露插入与删除两种写操作，不支持更新。
pub trait ProductRepository: Send + Sync {
    /// 对当前数据执行查询
    fn query(&self, query: &ProductQuery) -> Result<Page, CoreError>;
    fn get_by_id(&self, id: i64) -> Result<Option<Product>, CoreError>;
    /// 分配新 id 并追加记录，调用方负责事先校验请求
    fn insert(&self, request: CreateProductRequest) -> Result<Product, CoreError>;
    /// 删除成功返回 true，id 不存在返回 false
    fn delete(&self, id: i64) -> Result<bool, CoreError>;
    /// 全部记录的副本，按插入顺序
    fn list_all(&self) -> Result<Vec<Product>, CoreError>;
}

/// 内存存储，所有写操作在同一把写锁下串行执行
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

fn poisoned<T>(_: PoisonError<T>) -> CoreError {
    CoreError::Internal("商品存储锁已中毒".to_string())
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.products.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.len()? == 0)
    }
}

/// 新 id = max(现有 id, 0) + 1，删除后的 id 不会被复用，除非它恰好是当前最大值
fn next_id(products: &[Product]) -> i64 {
    products.iter().map(|p| p.id).fold(0, i64::max) + 1
}

impl ProductRepository for InMemoryProductRepository {
    fn query(&self, query: &ProductQuery) -> Result<Page, CoreError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(query.apply(products.iter()))
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Product>, CoreError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    fn insert(&self, request: CreateProductRequest) -> Result<Product, CoreError> {
        let mut products = self.products.write().map_err(poisoned)?;
        let product = request.into_product(next_id(&products), &timestamp_now());
        products.push(product.clone());
        Ok(product)
    }

    fn delete(&self, id: i64) -> Result<bool, CoreError> {
        let mut products = self.products.write().map_err(poisoned)?;
        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_all(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.products.read().map_err(poisoned)?.clone())
    }
}

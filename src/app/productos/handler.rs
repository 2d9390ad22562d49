//! 商品处理器

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use tracing::warn;

use super::model::{CreateProductRequest, Product};
use super::query::{ListParams, ProductQuery};
use crate::app::AppState;
use crate::core::{error::CoreError, response::PagedResponse};

/// 路径 id：接受整数以及小数部分为 0 的数字（如 `1.0`），其余视为不存在
fn parse_id(raw: &str) -> Result<i64, CoreError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && n.fract() == 0.0)
                .filter(|n| *n >= i64::MIN as f64 && *n < i64::MAX as f64)
                .map(|n| n as i64)
        })
        .ok_or_else(|| CoreError::NotFound(format!("商品 {} 不存在", raw)))
}

/// 列表查询从不因查询字符串失败：无法解析时记录警告并使用默认条件
pub async fn list_products(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<PagedResponse<Product>, CoreError> {
    let params = match pairs {
        Ok(Query(pairs)) => ListParams::from_pairs(pairs),
        Err(rejection) => {
            warn!("无法解析查询字符串，使用默认条件: {}", rejection.body_text());
            ListParams::default()
        }
    };
    let query = ProductQuery::from(params);
    let page = state.product_service.list_products(&query)?;
    Ok(PagedResponse::new(page.items, page.total))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let product = state.product_service.get_product(parse_id(&id)?)?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let Json(request) = payload?;
    let product = state.product_service.create_product(request)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.product_service.delete_product(parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integral_numbers() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert_eq!(parse_id("1.0").unwrap(), 1);
        assert!(matches!(parse_id("1.5"), Err(CoreError::NotFound(_))));
        assert!(matches!(parse_id("abc"), Err(CoreError::NotFound(_))));
        assert!(matches!(parse_id("NaN"), Err(CoreError::NotFound(_))));
    }
}

//! 系统处理器：健康检查与问候

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::core::response::HealthResponse;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(&*state.service_name))
}

pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hola desde el backend!" }))
}

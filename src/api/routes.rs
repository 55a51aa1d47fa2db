//! HTTP 路由
//!
//! - `GET /` 静态页面
//! - `GET /health` 存活检查
//! - `POST /compare-words` 词语对比

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};
use tracing::warn;

use crate::error::{AppError, Result};
use crate::models::{ComparisonRequest, ComparisonResult};
use crate::services::ComparisonService;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub comparison: Arc<ComparisonService>,
}

impl AppState {
    pub fn new(comparison: ComparisonService) -> Self {
        Self {
            comparison: Arc::new(comparison),
        }
    }
}

/// 构建路由
///
/// `static_dir` 下的 `index.html` 作为首页。
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let index = static_dir.as_ref().join("index.html");

    Router::new()
        .route_service("/", ServeFile::new(index))
        .route("/health", get(health_check))
        .route("/compare-words", post(compare_words))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// 词语对比
///
/// 请求体不是合法 JSON 对象时与缺少词语同样处理（400）。
async fn compare_words(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ComparisonRequest>, JsonRejection>,
) -> Result<Json<ComparisonResult>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("无法解析请求体: {}", rejection.body_text());
        AppError::Validation
    })?;

    let result = state
        .comparison
        .compare(&request.word1, &request.word2)
        .await?;

    Ok(Json(result))
}

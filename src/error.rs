use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// 校验失败时返回给用户的提示
pub const VALIDATION_MESSAGE: &str = "Please provide both words to compare.";
/// 上游返回内容无法解析时返回给用户的提示
pub const UPSTREAM_FORMAT_MESSAGE: &str = "Failed to process the comparison. Please try again.";
/// 上游调用失败时返回给用户的提示
pub const UPSTREAM_CALL_MESSAGE: &str = "Failed to compare words. Please try again.";

/// 应用程序错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 输入校验失败（任一词语为空）
    #[error("both words required")]
    Validation,

    /// LLM 返回的文本去掉代码块后不是合法 JSON
    #[error("LLM 返回内容无法解析为 JSON: {0}")]
    UpstreamFormat(#[from] serde_json::Error),

    /// LLM 调用本身失败（网络、鉴权、限流、超时、空响应）
    #[error("LLM API 调用失败: {0}")]
    UpstreamCall(String),

    /// 启动配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(e: async_openai::error::OpenAIError) -> Self {
        AppError::UpstreamCall(e.to_string())
    }
}

impl AppError {
    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation => StatusCode::BAD_REQUEST,
            AppError::UpstreamFormat(_) | AppError::UpstreamCall(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 返回给用户的固定提示，内部细节只写日志
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Validation => VALIDATION_MESSAGE,
            AppError::UpstreamFormat(_) => UPSTREAM_FORMAT_MESSAGE,
            AppError::UpstreamCall(_) | AppError::Config(_) => UPSTREAM_CALL_MESSAGE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation => warn!("请求校验失败: {}", self),
            AppError::UpstreamFormat(e) => error!("Failed to parse JSON response: {}", e),
            _ => error!("Error calling LLM API: {}", self),
        }

        let body = Json(json!({ "error": self.user_message() }));
        (self.status_code(), body).into_response()
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;

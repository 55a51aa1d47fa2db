//! # Word Constellation
//!
//! 输入两个词语，通过 LLM 生成各自的"星座"画像和两者之间的"桥接"关系，
//! 以 JSON 形式返回给浏览器页面。
//!
//! ## 架构设计
//!
//! ### ① 能力层（Services）
//! - `LlmService` - 唯一的 LLM 客户端，实现 `CompletionClient`
//! - `prompts` - 固定的提示词模板
//!
//! ### ② 编排层
//! - `ComparisonService` - 校验 → 三次 LLM 调用 → 解析 → 组装
//!
//! ### ③ 接口层（API）
//! - `api::routes` - axum 路由，把 `AppError` 转换为 HTTP 响应
//!
//! ### ④ 应用层
//! - `App` - 从配置创建客户端和路由，运行服务
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use api::{build_router, AppState};
pub use app::App;
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{BridgeProfile, ComparisonRequest, ComparisonResult, WordProfile};
pub use services::{CompletionClient, ComparisonService, LlmService};

//! API 模块
//!
//! 负责对外暴露的 HTTP 接口

pub mod routes;

pub use routes::{build_router, AppState};

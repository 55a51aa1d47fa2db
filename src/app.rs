use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

use crate::api::{build_router, AppState};
use crate::config::Config;
use crate::services::{ComparisonService, LlmService};
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    router: Router,
}

impl App {
    /// 初始化应用
    ///
    /// LLM 客户端只在这里创建一次，之后通过路由状态注入到每个请求。
    pub fn initialize(config: Config) -> Self {
        logging::log_startup(&config);

        let llm = Arc::new(LlmService::new(&config));
        let comparison = ComparisonService::new(llm).with_parallel(config.llm_parallel_requests);
        let router = build_router(AppState::new(comparison), &config.static_dir);

        Self { config, router }
    }

    /// 运行 HTTP 服务，收到 Ctrl-C 后优雅退出
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("无法监听 {}", addr))?;

        info!("✓ 服务已启动: http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        info!("👋 服务已停止");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("无法监听 Ctrl-C 信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在关闭...");
}

//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 默认日志过滤规则，可通过 `RUST_LOG` 覆盖
const DEFAULT_FILTER: &str = "word_constellation=info,tower_http=info";

/// 初始化全局日志
///
/// 重复调用不会 panic（测试中会多次调用）。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 Word Constellation 启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 监听地址: http://{}", config.bind_addr());
    info!("🤖 模型: {} ({})", config.llm_model_name, config.llm_api_base_url);
    info!(
        "⏱️ 超时: {}s, 并发请求: {}",
        config.llm_timeout_secs, config.llm_parallel_requests
    );
    info!("{}", "=".repeat(60));
}

/// 按字符数截断 LLM 原始回复，超出部分以 `...` 结尾
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

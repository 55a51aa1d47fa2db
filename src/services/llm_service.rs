//! LLM 服务 - 业务能力层
//!
//! 只负责"发一条提示词，拿回一段文本"，不关心提示词内容和结果解析。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, Result};

/// 采样温度
pub const TEMPERATURE: f32 = 0.7;
/// 单次回复的最大 token 数
pub const MAX_TOKENS: u32 = 800;

/// 文本补全能力
///
/// 编排层只依赖这个 trait，测试时可以替换为脚本化的实现。
/// 实现必须可以被多个请求同时使用。
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// 发送系统消息和用户消息，返回去掉首尾空白的回复文本
    async fn complete(&self, system_message: &str, user_message: &str) -> Result<String>;
}

/// 基于 async-openai 的 LLM 服务
///
/// 进程启动时创建一次，之后在所有请求之间共享。
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    timeout: Duration,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        // 关闭 SDK 内置的 5xx / 429 重试，每个提示词只请求一次
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(openai_config).with_backoff(no_retry),
            model_name: config.llm_model_name.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn send_to_llm(&self, system_message: &str, user_message: &str) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_message)
                    .build()?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(TEMPERATURE)
            .max_tokens(MAX_TOKENS)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::from(e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::UpstreamCall("LLM 返回内容为空".to_string()))?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl CompletionClient for LlmService {
    async fn complete(&self, system_message: &str, user_message: &str) -> Result<String> {
        tokio::time::timeout(self.timeout, self.send_to_llm(system_message, user_message))
            .await
            .map_err(|_| {
                warn!("LLM API 调用超时 ({}s)", self.timeout.as_secs());
                AppError::UpstreamCall(format!("请求超时 ({}s)", self.timeout.as_secs()))
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn test_config() -> Config {
        Config {
            llm_api_key: "sk-test".to_string(),
            // 不可路由的地址，保证不会真正访问外网
            llm_api_base_url: "http://127.0.0.1:9/v1".to_string(),
            llm_timeout_secs: 5,
            ..Config::default()
        }
    }

    #[test]
    fn test_new_uses_configured_model() {
        let config = Config {
            llm_model_name: "gpt-4o".to_string(),
            ..test_config()
        };
        let service = LlmService::new(&config);
        assert_eq!(service.model_name(), "gpt-4o");
        assert_eq!(service.timeout, Duration::from_secs(5));
    }

    /// 连接失败必须归类为上游调用错误
    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream_call_error() {
        let service = LlmService::new(&test_config());
        let err = service.complete("system", "user").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamCall(_)), "{:?}", err);
    }

    /// 读完一个 HTTP 请求（请求头 + Content-Length 指定的请求体）
    async fn read_request(stream: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let body_len = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + body_len {
                    return;
                }
            }
        }
    }

    /// 启动一个总是返回 503 的本地上游，返回 base url 和请求计数
    async fn spawn_unavailable_upstream() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let counter = counter.clone();
                tokio::spawn(async move {
                    read_request(&mut stream).await;
                    counter.fetch_add(1, Ordering::SeqCst);
                    let body = "upstream overloaded";
                    let response = format!(
                        "HTTP/1.1 503 Service Unavailable\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        (format!("http://{}/v1", addr), hits)
    }

    /// 启动一个只接收连接、永不回复的本地上游
    async fn spawn_silent_upstream() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    read_request(&mut stream).await;
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    drop(stream);
                });
            }
        });

        format!("http://{}/v1", addr)
    }

    /// 5xx 只请求一次，直接返回上游错误而不是等到超时
    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let (base_url, hits) = spawn_unavailable_upstream().await;
        let config = Config {
            llm_api_base_url: base_url,
            llm_timeout_secs: 10,
            ..test_config()
        };
        let service = LlmService::new(&config);

        let started = Instant::now();
        let err = service.complete("system", "user").await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        match err {
            AppError::UpstreamCall(detail) => assert!(detail.contains("overloaded"), "{}", detail),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// 上游不回复时按配置的超时返回上游调用错误
    #[tokio::test]
    async fn test_silent_upstream_times_out() {
        let config = Config {
            llm_api_base_url: spawn_silent_upstream().await,
            llm_timeout_secs: 1,
            ..test_config()
        };
        let service = LlmService::new(&config);

        let started = Instant::now();
        let err = service.complete("system", "user").await.unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(err, AppError::UpstreamCall(_)), "{:?}", err);
        assert!(elapsed >= Duration::from_millis(900), "{:?}", elapsed);
        assert!(elapsed < Duration::from_secs(3), "{:?}", elapsed);
    }

    /// 测试真实 LLM 调用
    #[tokio::test]
    #[ignore] // 需要手动运行并设置 GPT_API_KEY：cargo test -- --ignored
    async fn test_complete_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env().expect("需要设置 GPT_API_KEY");
        let service = LlmService::new(&config);

        let response = service
            .complete(crate::services::prompts::SYSTEM_PROMPT, "Return {\"ok\": true}")
            .await
            .expect("LLM 调用失败");

        println!("LLM 响应: {}", response);
        assert!(!response.is_empty());
    }
}

//! 词语对比编排
//!
//! 校验 → 构建三个提示词 → 调用 LLM → 去代码块并解析 → 组装结果。
//! 任一步失败都让整个请求失败，不返回部分结果，也不重试。

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::Result;
use crate::models::{BridgeProfile, ComparisonRequest, ComparisonResult, WordProfile};
use crate::services::llm_service::CompletionClient;
use crate::services::prompts::{build_bridge_prompt, build_word_prompt, SYSTEM_PROMPT};
use crate::utils::{parse_json_response, truncate_text};

/// 日志中保留的原始响应长度
const LOG_PREVIEW_CHARS: usize = 200;

/// 三次 LLM 调用的原始回复，顺序固定
struct RawResponses {
    constellation1: String,
    constellation2: String,
    bridge: String,
}

/// 词语对比服务
pub struct ComparisonService {
    client: Arc<dyn CompletionClient>,
    parallel: bool,
}

impl ComparisonService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            parallel: false,
        }
    }

    /// 是否并发发出三个请求（默认按顺序）
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 对比两个词语
    ///
    /// 输入先去空白并转小写；任一为空时直接返回校验错误，不发起任何网络请求。
    pub async fn compare(&self, word1: &str, word2: &str) -> Result<ComparisonResult> {
        let ComparisonRequest { word1, word2 } = ComparisonRequest::new(word1, word2).normalize()?;

        info!("🔍 开始对比: \"{}\" ↔ \"{}\"", word1, word2);

        let prompts = [
            build_word_prompt(&word1),
            build_word_prompt(&word2),
            build_bridge_prompt(&word1, &word2),
        ];

        let raw = if self.parallel {
            self.fetch_parallel(&prompts).await?
        } else {
            self.fetch_sequential(&prompts).await?
        };

        let constellation1: WordProfile = parse_logged(&raw.constellation1, "constellation1")?;
        let constellation2: WordProfile = parse_logged(&raw.constellation2, "constellation2")?;
        let bridge: BridgeProfile = parse_logged(&raw.bridge, "bridge")?;

        info!("✓ 对比完成: \"{}\" ↔ \"{}\"", word1, word2);

        Ok(ComparisonResult {
            word1,
            word2,
            constellation1,
            constellation2,
            bridge,
        })
    }

    async fn fetch_sequential(&self, prompts: &[String; 3]) -> Result<RawResponses> {
        let constellation1 = self.request(0, &prompts[0]).await?;
        let constellation2 = self.request(1, &prompts[1]).await?;
        let bridge = self.request(2, &prompts[2]).await?;

        Ok(RawResponses {
            constellation1,
            constellation2,
            bridge,
        })
    }

    async fn request(&self, idx: usize, prompt: &str) -> Result<String> {
        debug!("发送第 {}/3 个提示词", idx + 1);
        self.client.complete(SYSTEM_PROMPT, prompt).await
    }

    async fn fetch_parallel(&self, prompts: &[String; 3]) -> Result<RawResponses> {
        debug!("并发发送 {} 个提示词", prompts.len());
        let (constellation1, constellation2, bridge) = futures::try_join!(
            self.client.complete(SYSTEM_PROMPT, &prompts[0]),
            self.client.complete(SYSTEM_PROMPT, &prompts[1]),
            self.client.complete(SYSTEM_PROMPT, &prompts[2]),
        )?;

        Ok(RawResponses {
            constellation1,
            constellation2,
            bridge,
        })
    }
}

fn parse_logged<T: serde::de::DeserializeOwned>(raw: &str, label: &str) -> Result<T> {
    parse_json_response(raw).map_err(|e| {
        error!(
            "{} 解析失败: {} | 原始内容: {}",
            label,
            e,
            truncate_text(raw, LOG_PREVIEW_CHARS)
        );
        e
    })
}

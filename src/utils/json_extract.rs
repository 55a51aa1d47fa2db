//! 从 LLM 文本响应中提取 JSON
//!
//! LLM 经常把 JSON 包在 markdown 代码块里（```json ... ```），
//! 解析前需要去掉首尾的代码块标记。

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::Result;

const FENCE: &str = "```";

fn fenced_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\A```[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)\r?\n?[ \t]*```\s*\z")
            .expect("fence regex is valid")
    })
}

/// 去掉可选的首尾代码块标记
///
/// - 完整的代码块：返回块内内容
/// - 只有开头标记没有结尾：去掉第一行
/// - 不以 ``` 开头：原样返回（多行 JSON 不会被误删行）
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();

    if !text.starts_with(FENCE) {
        return text;
    }

    if let Some(inner) = fenced_block().captures(text).and_then(|c| c.get(1)) {
        return inner.as_str().trim();
    }

    // 单行 ```{...}```
    if let Some(inner) = text
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_suffix(FENCE))
    {
        return inner.trim();
    }

    // 未闭合的代码块，只去掉开头那一行
    match text.split_once('\n') {
        Some((_, rest)) => rest.trim(),
        None => "",
    }
}

/// 去掉代码块后按目标类型解析 JSON
pub fn parse_json_response<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(strip_code_fence(text))?)
}

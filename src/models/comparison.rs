//! 词语对比的数据模型
//!
//! 请求、单词画像（constellation）、桥接画像（bridge）和最终结果。
//! 所有对象只存在于一次 HTTP 请求内，不做持久化。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};

/// 对比请求
///
/// 缺失的字段按空字符串处理，随后在 [`ComparisonRequest::normalize`] 中校验。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    #[serde(default)]
    pub word1: String,
    #[serde(default)]
    pub word2: String,
}

impl ComparisonRequest {
    pub fn new(word1: impl Into<String>, word2: impl Into<String>) -> Self {
        Self {
            word1: word1.into(),
            word2: word2.into(),
        }
    }

    /// 去除首尾空白并转为小写；任一词语为空时返回 [`AppError::Validation`]
    pub fn normalize(&self) -> Result<Self> {
        let word1 = normalize_word(&self.word1);
        let word2 = normalize_word(&self.word2);

        if word1.is_empty() || word2.is_empty() {
            return Err(AppError::Validation);
        }

        Ok(Self { word1, word2 })
    }
}

fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// 单个词语的画像
///
/// LLM 返回的 JSON 对象原样保存，不校验字段类型和数组长度；
/// 引文可能是字符串，也可能是 `{"quote", "author"}` 对象。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordProfile(pub Map<String, Value>);

impl WordProfile {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn etymology(&self) -> Option<&str> {
        self.get("etymology").and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// 两个词语之间的关联画像，同样原样保存
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BridgeProfile(pub Map<String, Value>);

impl BridgeProfile {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn tension(&self) -> Option<&str> {
        self.get("tension").and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// 对比结果，直接作为 `POST /compare-words` 的响应体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub word1: String,
    pub word2: String,
    pub constellation1: WordProfile,
    pub constellation2: WordProfile,
    pub bridge: BridgeProfile,
}

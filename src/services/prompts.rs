//! 提示词模板
//!
//! 三个提示词：两个单词画像（同一模板）和一个桥接画像。
//! 所有提示词都要求 LLM 只返回 JSON，且不得编造引文。

/// 系统消息
pub const SYSTEM_PROMPT: &str = "You are a linguistic and literary expert. \
Always respond with valid JSON only. \
Never invent quotations or sources.";

/// 构建单个词语的画像提示词
pub fn build_word_prompt(word: &str) -> String {
    format!(
        r#"Explore the word "{word}" concisely. Return a JSON object:
{{
    "etymology": "Brief origin (1 sentence)",
    "synonyms": ["4-5 synonyms"],
    "metaphors": ["2 common metaphors"],
    "quotes": [
        "1-2 REAL, verifiable quotes containing this word, with author/source.
         If none exist, return an empty array."
    ]
}}
IMPORTANT:
- Do NOT invent quotes.
- Do NOT use anonymous or fake authors.
Return ONLY valid JSON."#
    )
}

/// 构建两个词语之间的桥接提示词
pub fn build_bridge_prompt(word1: &str, word2: &str) -> String {
    format!(
        r#"Find connections between "{word1}" and "{word2}". Return a JSON object:
{{
    "quotes_with_both": [
        "2-3 REAL, verifiable literary quotes or famous sayings containing BOTH words, including author/source.
         If none exist, return an empty array."
    ],
    "shared_idioms": [
        "2-3 idioms or phrases that pair these words together, if any exist.
         If none exist, return an empty array."
    ],
    "conceptual_links": ["3-4 ways these words connect thematically or philosophically"],
    "shared_metaphors": ["2-3 metaphors that could apply to both words"],
    "tension": "One sentence describing the creative tension or contrast between these words"
}}

IMPORTANT RULES:
- Do NOT fabricate quotes.
- Do NOT create fake attributions.
- If no verified quote exists, return [].

Return ONLY valid JSON."#
    )
}

use crate::error::{AppError, Result};

/// API 密钥可用的环境变量名，按顺序取第一个非空值
pub const API_KEY_VARS: [&str; 2] = ["GPT_API_KEY", "OPENAI_API_KEY"];

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 静态页面目录（包含 index.html）
    pub static_dir: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 单次 LLM 调用的超时时间（秒）
    pub llm_timeout_secs: u64,
    /// 是否并发发出三个 LLM 请求
    pub llm_parallel_requests: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "static".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_timeout_secs: 60,
            llm_parallel_requests: false,
        }
    }
}

impl Config {
    /// 从进程环境变量读取配置
    ///
    /// 缺少 API 密钥时返回 [`AppError::Config`]，调用方应当终止启动。
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意查找函数构建配置，便于测试时不修改真实环境变量
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_api_key = API_KEY_VARS
            .iter()
            .find_map(|&key| non_empty(key))
            .ok_or_else(|| {
                AppError::Config(format!(
                    "API key not found. Please set the {} environment variable.",
                    API_KEY_VARS.join(" or ")
                ))
            })?;

        Ok(Self {
            host: non_empty("HOST").unwrap_or(default.host),
            port: non_empty("PORT").and_then(|v| v.parse().ok()).unwrap_or(default.port),
            static_dir: non_empty("STATIC_DIR").unwrap_or(default.static_dir),
            llm_api_key,
            llm_api_base_url: non_empty("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: non_empty("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_timeout_secs: non_empty("LLM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.llm_timeout_secs),
            llm_parallel_requests: non_empty("LLM_PARALLEL_REQUESTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.llm_parallel_requests),
        })
    }

    /// 服务监听地址，形如 `0.0.0.0:5000`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

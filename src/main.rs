use anyhow::Result;
use word_constellation::utils::logging;
use word_constellation::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 读取 .env（如果存在）
    dotenvy::dotenv().ok();

    // 初始化日志
    logging::init();

    // 加载配置，缺少 API 密钥时直接退出
    let config = Config::from_env().map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}

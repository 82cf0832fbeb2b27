use anyhow::{Context, Result};
use doc_analyze_batch::utils::logging;
use doc_analyze_batch::{App, Config};
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置（.env 中的值不覆盖已有环境变量）
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("加载配置失败")?;
    logging::log_startup(&config);

    // 第一次 Ctrl+C 取消当前任务，第二次立即退出
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if signal_token.is_cancelled() {
                warn!("再次收到 Ctrl+C，立即退出");
                std::process::exit(130);
            }
            warn!("收到 Ctrl+C，正在停止...（再按一次立即退出）");
            signal_token.cancel();
        }
    });

    // 初始化并运行应用
    let report = App::initialize(config, cancel)?.run().await?;
    logging::log_report(&report);

    Ok(())
}

//! 日志工具模块
//!
//! 提供日志初始化和批处理报告的输出

use crate::config::Config;
use crate::orchestrator::{BatchReport, BatchSummary, ItemOutcome};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化全局日志（`RUST_LOG` 未设置时默认 info）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文档分析批处理");
    info!("🌐 服务地址: {}", config.endpoint);
    info!("🧩 模型: {} (api-version {})", config.model_id, config.api_version);
    info!("📂 输入: {} → 输出: {}", config.input_dir, config.output_dir);
    match config.max_poll_wait {
        Some(max) => info!(
            "⏱️ 轮询间隔: {:?}, 等待上限: {:?}",
            config.poll_interval, max
        ),
        None => info!("⏱️ 轮询间隔: {:?}, 不设等待上限", config.poll_interval),
    }
    info!("{}", "=".repeat(60));
}

/// 输出批处理报告
pub fn log_report(report: &BatchReport) {
    match report {
        BatchReport::InputDirMissing(dir) => {
            warn!("⚠️ 输入目录 '{}' 不存在，程序结束", dir.display());
        }
        BatchReport::NoInputFiles(dir) => {
            warn!("⚠️ 在 '{}' 中没有找到文件，程序结束", dir.display());
        }
        BatchReport::Completed(summary) => print_final_stats(summary),
    }
}

/// 打印最终统计信息
fn print_final_stats(summary: &BatchSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.saved(), summary.total());
    info!("❌ 分析失败: {}", summary.failed());
    info!("🚫 提交被拒: {}", summary.rejected());
    for (item, outcome) in &summary.outcomes {
        match outcome {
            ItemOutcome::Saved { .. } => {}
            ItemOutcome::Failed { reason } => {
                warn!("  - {}: 分析失败 {}", item.name, truncate_text(&reason.to_string(), 200))
            }
            ItemOutcome::Rejected { status, body } => {
                warn!("  - {}: 提交被拒 {} {}", item.name, status, truncate_text(body, 200))
            }
        }
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_chars_not_bytes() {
        assert_eq!(truncate_text("分析失败原因", 2), "分析...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}

//! 单个文档处理器 - 编排层
//!
//! 读取文档 → 交给 JobOrchestrator → 成功时写入结果。
//! 每个文档恰好得到一个 `ItemOutcome`，分析失败或提交被拒不影响其他文档；
//! 致命错误（网络、协议、文件系统、超时、取消）通过 `Err` 向上传递。

use std::path::PathBuf;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{read_document, JobResult, WorkItem};
use crate::services::{write_json, JobOrchestrator};
use crate::utils::logging::truncate_text;

/// 单个工作项的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// 分析成功并已写入
    Saved { output: PathBuf, polls: u32 },
    /// 服务端分析失败
    Failed { reason: Value },
    /// 提交被拒绝
    Rejected { status: u16, body: String },
}

impl ItemOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, ItemOutcome::Saved { .. })
    }
}

/// 处理单个文档
///
/// # 参数
/// - `orchestrator`: 任务编排器
/// - `item`: 工作项
/// - `index`: 序号（仅用于日志）
pub async fn process_document(
    orchestrator: &JobOrchestrator,
    item: &WorkItem,
    index: usize,
) -> AppResult<ItemOutcome> {
    info!("[文件 {}] 📄 正在处理 '{}'...", index, item.name);

    let document = read_document(item).await?;

    if document.is_empty() {
        warn!("[文件 {}] ⚠️ '{}' 内容为空，仍然提交", index, item.name);
    }

    let report = orchestrator
        .analyze(&item.name, document, &item.content_type)
        .await?;

    let outcome = match report.result {
        JobResult::Succeeded(payload) => {
            write_json(&item.output_path, &payload).await?;
            info!(
                "[文件 {}] ✓ '{}' 处理成功，结果已保存至 '{}'",
                index,
                item.name,
                item.output_path.display()
            );
            ItemOutcome::Saved {
                output: item.output_path.clone(),
                polls: report.polls,
            }
        }
        JobResult::Failed(reason) => {
            error!(
                "[文件 {}] ❌ '{}' 分析失败: {}",
                index,
                item.name,
                truncate_text(&reason.to_string(), 500)
            );
            ItemOutcome::Failed { reason }
        }
        JobResult::SubmissionRejected { status, body } => {
            error!(
                "[文件 {}] ❌ '{}' 提交失败: {}",
                index, item.name, status
            );
            error!("[文件 {}] 响应内容: {}", index, truncate_text(&body, 500));
            ItemOutcome::Rejected { status, body }
        }
    };

    Ok(outcome)
}

/// 记录中止批处理的错误
pub(crate) fn log_fatal(index: usize, item: &WorkItem, err: &AppError) {
    error!(
        "[文件 {}] ❌ 处理 '{}' 时发生致命错误，批处理中止: {}",
        index, item.name, err
    );
}

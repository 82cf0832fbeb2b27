//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建 JobOrchestrator（持有 HTTP 客户端和凭据）
//! 2. **目录准备**：确保输出目录存在
//! 3. **批量加载**：扫描输入目录，生成 `Vec<WorkItem>`
//! 4. **顺序处理**：逐个委托 document_processor，单个失败不影响其他文档；
//!    收到取消信号后不再开始新的文档
//! 5. **全局统计**：返回结构化的 `BatchReport`，展示交给调用方

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult, JobError};
use crate::models::{list_work_items, InputListing, WorkItem};
use crate::orchestrator::document_processor::{self, ItemOutcome};
use crate::services::{ensure_output_dir, JobOrchestrator};

/// 批处理报告
#[derive(Debug, Clone, PartialEq)]
pub enum BatchReport {
    /// 输入目录不存在，未处理任何文档
    InputDirMissing(PathBuf),
    /// 输入目录为空，未处理任何文档
    NoInputFiles(PathBuf),
    Completed(BatchSummary),
}

/// 处理统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub outcomes: Vec<(WorkItem, ItemOutcome)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn saved(&self) -> usize {
        self.count(|o| o.is_saved())
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed { .. }))
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Rejected { .. }))
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    orchestrator: JobOrchestrator,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, cancel: CancellationToken) -> AppResult<Self> {
        let orchestrator = JobOrchestrator::new(&config, cancel)?;
        Ok(Self {
            config,
            orchestrator,
        })
    }

    /// 运行批处理
    pub async fn run(&self) -> AppResult<BatchReport> {
        let input_dir = Path::new(&self.config.input_dir);
        let output_dir = Path::new(&self.config.output_dir);

        ensure_output_dir(output_dir).await?;

        info!("\n📁 正在扫描待处理的文档...");
        let items = match list_work_items(
            input_dir,
            output_dir,
            self.config.content_type_override.as_deref(),
        )
        .await?
        {
            InputListing::Missing(dir) => return Ok(BatchReport::InputDirMissing(dir)),
            InputListing::Empty(dir) => return Ok(BatchReport::NoInputFiles(dir)),
            InputListing::Items(items) => items,
        };

        info!("✓ 找到 {} 个待处理的文档", items.len());

        let summary = self.process_all(items).await?;
        Ok(BatchReport::Completed(summary))
    }

    /// 顺序处理所有文档
    async fn process_all(&self, items: Vec<WorkItem>) -> AppResult<BatchSummary> {
        let mut summary = BatchSummary::default();

        for (idx, item) in items.into_iter().enumerate() {
            let index = idx + 1;
            if self.orchestrator.is_cancelled() {
                let err = AppError::from(JobError::Cancelled { polls: 0 });
                document_processor::log_fatal(index, &item, &err);
                return Err(err);
            }
            match document_processor::process_document(&self.orchestrator, &item, index).await {
                Ok(outcome) => summary.outcomes.push((item, outcome)),
                Err(e) => {
                    document_processor::log_fatal(index, &item, &e);
                    return Err(e);
                }
            }
        }

        Ok(summary)
    }
}

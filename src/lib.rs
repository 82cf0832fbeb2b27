//! # Doc Analyze Batch
//!
//! 把目录中的文档逐个提交到远程文档分析服务，轮询直到分析完成，
//! 并把结果保存为 JSON 文件。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 与分析服务的 HTTP 交互
//! - `AnalysisClient` - 提交文档、查询任务状态，持有凭据
//!
//! ### ② 业务能力层（Services）
//! - `JobOrchestrator` - 单个任务：提交 → 轮询 → 终态结果
//! - `result_writer` - 写 JSON 结果文件
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 扫描输入目录，顺序处理，汇总统计
//! - `orchestrator/document_processor` - 单个文档的读取、分析、保存

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::AnalysisClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{JobHandle, JobReport, JobResult, WorkItem};
pub use orchestrator::{App, BatchReport, BatchSummary, ItemOutcome};
pub use services::{JobOrchestrator, PollPolicy};

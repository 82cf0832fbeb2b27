//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行）
//! - 扫描输入目录（Vec<WorkItem>）
//! - 顺序处理，汇总统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 读取文档，调用 JobOrchestrator
//! - 成功时写入 JSON，失败时记录原因
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<WorkItem>)
//!     ↓
//! document_processor (处理单个 WorkItem)
//!     ↓
//! services (能力层：job_orchestrator / result_writer)
//!     ↓
//! clients (分析服务 HTTP 客户端)
//! ```

pub mod batch_processor;
pub mod document_processor;

// 重新导出主要类型
pub use batch_processor::{App, BatchReport, BatchSummary};
pub use document_processor::{process_document, ItemOutcome};

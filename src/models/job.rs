//! 分析任务相关的数据类型

use serde_json::Value;
use std::fmt;

/// 任务句柄：提交成功后服务返回的 Operation-Location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 状态查询返回的 `status` 字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    /// 未知值或缺失，按进行中处理
    Other(String),
}

impl JobStatus {
    /// 从状态响应体中读取 `status`
    pub fn from_body(body: &Value) -> Self {
        match body.get("status").and_then(|v| v.as_str()) {
            Some("notStarted") => JobStatus::NotStarted,
            Some("running") => JobStatus::Running,
            Some("succeeded") => JobStatus::Succeeded,
            Some("failed") => JobStatus::Failed,
            Some(other) => JobStatus::Other(other.to_string()),
            None => JobStatus::Other(String::new()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::NotStarted => write!(f, "notStarted"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Succeeded => write!(f, "succeeded"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Other(s) if s.is_empty() => write!(f, "<missing>"),
            JobStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// 任务的终态结果，每个提交的工作项恰好产生一个
#[derive(Debug, Clone, PartialEq)]
pub enum JobResult {
    /// 分析成功，携带完整的状态响应体
    Succeeded(Value),
    /// 服务端分析失败，携带诊断信息
    Failed(Value),
    /// 提交被拒绝（非 202）
    SubmissionRejected { status: u16, body: String },
}

impl JobResult {
    /// 从 `failed` 响应中提取诊断信息：优先 `error` 字段
    pub fn failed_from_body(body: Value) -> Self {
        match body.get("error") {
            Some(error) if !error.is_null() => JobResult::Failed(error.clone()),
            _ => JobResult::Failed(body),
        }
    }
}

/// 一次任务编排的报告
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub result: JobResult,
    /// 状态查询次数（被拒绝时为 0）
    pub polls: u32,
}

impl JobReport {
    /// 两次轮询之间的等待次数
    pub fn sleeps(&self) -> u32 {
        self.polls.saturating_sub(1)
    }
}

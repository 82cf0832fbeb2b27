//! 任务编排服务 - 业务能力层
//!
//! 负责单个分析任务的完整生命周期：提交 → 获取句柄 → 轮询 → 终态结果。
//! 不写文件，不关心批次。

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::clients::{AnalysisClient, SubmitResponse};
use crate::config::Config;
use crate::error::{AppResult, JobError};
use crate::models::{JobHandle, JobReport, JobResult, JobStatus};

/// 轮询策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// 两次状态查询之间的固定间隔
    pub interval: Duration,
    /// 总等待上限，为空表示一直等到终态
    pub max_wait: Option<Duration>,
}

impl PollPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.poll_interval,
            max_wait: config.max_poll_wait,
        }
    }
}

/// 任务编排器
pub struct JobOrchestrator {
    client: AnalysisClient,
    policy: PollPolicy,
    cancel: CancellationToken,
}

impl JobOrchestrator {
    /// 创建新的任务编排器
    pub fn new(config: &Config, cancel: CancellationToken) -> AppResult<Self> {
        Ok(Self {
            client: AnalysisClient::new(config)?,
            policy: PollPolicy::from_config(config),
            cancel,
        })
    }

    /// 是否已收到取消信号
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 分析一个文档，直到得到终态结果
    ///
    /// # 参数
    /// - `name`: 文档名（仅用于日志）
    /// - `document`: 文档字节，原样提交，空文档由服务端决定是否受理
    /// - `content_type`: 文档格式对应的 Content-Type
    ///
    /// # 返回
    /// 返回终态结果和轮询次数；网络或协议错误、超时、取消以 `Err` 返回
    pub async fn analyze(
        &self,
        name: &str,
        document: Vec<u8>,
        content_type: &str,
    ) -> AppResult<JobReport> {
        if self.is_cancelled() {
            return Err(JobError::Cancelled { polls: 0 }.into());
        }

        let submitted = self
            .unless_cancelled(0, self.client.submit(document, content_type))
            .await?;

        let handle = match submitted {
            SubmitResponse::Accepted(handle) => handle,
            SubmitResponse::Rejected { status, body } => {
                return Ok(JobReport {
                    result: JobResult::SubmissionRejected { status, body },
                    polls: 0,
                });
            }
        };

        self.wait_for_result(name, &handle).await
    }

    /// 轮询任务句柄直到终态
    async fn wait_for_result(&self, name: &str, handle: &JobHandle) -> AppResult<JobReport> {
        let started = Instant::now();
        let mut polls = 0u32;

        loop {
            let body = self.unless_cancelled(polls, self.client.poll(handle)).await?;
            polls += 1;

            let status = JobStatus::from_body(&body);
            debug!("'{}' 第 {} 次查询，状态: {}", name, polls, status);

            if status.is_terminal() {
                let result = if status == JobStatus::Succeeded {
                    JobResult::Succeeded(body)
                } else {
                    JobResult::failed_from_body(body)
                };
                return Ok(JobReport { result, polls });
            }

            if let Some(max_wait) = self.policy.max_wait {
                let waited = started.elapsed();
                if waited + self.policy.interval > max_wait {
                    return Err(JobError::PollTimedOut { waited, polls }.into());
                }
            }

            info!(
                "⏳ 正在处理 '{}' ({})... {} 秒后重试",
                name,
                status,
                self.policy.interval.as_secs_f32()
            );

            self.unless_cancelled(polls, async {
                sleep(self.policy.interval).await;
                Ok(())
            })
            .await?;
        }
    }

    /// 等待 `fut` 完成；期间收到取消信号则立即放弃
    async fn unless_cancelled<T>(
        &self,
        polls: u32,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(JobError::Cancelled { polls }.into()),
            result = fut => result,
        }
    }
}

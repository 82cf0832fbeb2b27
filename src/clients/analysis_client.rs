//! 文档分析 API 客户端
//!
//! 封装所有与文档分析服务的 HTTP 交互：提交文档、查询任务状态

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};
use crate::models::JobHandle;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::debug;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "Operation-Location";

/// 提交请求的响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResponse {
    /// 202，已受理
    Accepted(JobHandle),
    /// 其他状态码，原样保留响应体
    Rejected { status: u16, body: String },
}

/// 文档分析客户端
pub struct AnalysisClient {
    http: Client,
    analyze_url: String,
    api_key: String,
}

impl AnalysisClient {
    /// 创建新的分析客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            analyze_url: config.analyze_url(),
            api_key: config.api_key.clone(),
        })
    }

    /// 提交文档
    ///
    /// # 参数
    /// - `document`: 文档字节
    /// - `content_type`: 文档格式对应的 Content-Type
    ///
    /// # 返回
    /// 202 时返回任务句柄，其他状态码返回拒绝信息（不重试）
    pub async fn submit(&self, document: Vec<u8>, content_type: &str) -> AppResult<SubmitResponse> {
        debug!("提交文档: {} 字节, Content-Type: {}", document.len(), content_type);

        let response = self
            .http
            .post(&self.analyze_url)
            .header(header::CONTENT_TYPE, content_type)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .body(document)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&self.analyze_url, e))?;

        let status = response.status();
        if status != StatusCode::ACCEPTED {
            let body = response
                .text()
                .await
                .map_err(|e| AppError::api_request_failed(&self.analyze_url, e))?;
            debug!("提交被拒绝: {} {}", status, body);
            return Ok(SubmitResponse::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let location = response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::MissingOperationLocation {
                endpoint: self.analyze_url.clone(),
            })?;

        debug!("提交成功，任务地址: {}", location);

        Ok(SubmitResponse::Accepted(JobHandle::new(location)))
    }

    /// 查询任务状态，返回完整的 JSON 响应体
    pub async fn poll(&self, handle: &JobHandle) -> AppResult<Value> {
        let endpoint = handle.as_str();

        let response = self
            .http
            .get(endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        if !status.is_success() {
            return Err(ApiError::BadPollResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        serde_json::from_str(&text).map_err(|source| {
            ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            }
            .into()
        })
    }
}

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 分析任务错误
    #[error("任务错误: {0}")]
    Job(#[from] JobError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// HTTP 客户端构建失败
    #[error("HTTP 客户端构建失败: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 202 响应缺少 Operation-Location
    #[error("提交已被接受但响应缺少 Operation-Location 头 ({endpoint})")]
    MissingOperationLocation { endpoint: String },
    /// 状态查询返回非成功状态码
    #[error("状态查询返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadPollResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 结果序列化失败
    #[error("结果序列化失败 ({}): {source}", .path.display())]
    SerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 分析任务错误
///
/// 与网络、协议、文件系统错误一样会中止整个批处理
#[derive(Debug, Error)]
pub enum JobError {
    /// 轮询超过等待上限
    #[error("轮询超时: 已等待 {waited:?}，共轮询 {polls} 次")]
    PollTimedOut { waited: Duration, polls: u32 },
    /// 轮询被取消
    #[error("轮询已取消 (已轮询 {polls} 次)")]
    Cancelled { polls: u32 },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

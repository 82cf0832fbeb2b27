use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

/// 程序配置
///
/// 启动时构建一次，按引用传给客户端和编排器。
#[derive(Clone, Debug)]
pub struct Config {
    // --- 文档分析服务配置 ---
    /// 服务根地址（以 `/` 结尾）
    pub endpoint: String,
    /// 订阅密钥（Ocp-Apim-Subscription-Key）
    pub api_key: String,
    pub model_id: String,
    pub api_version: String,
    pub output_content_format: String,
    /// 强制所有文件使用的 Content-Type；为空时按扩展名推断
    pub content_type_override: Option<String>,
    /// 单次 HTTP 请求超时
    pub request_timeout: Duration,
    // --- 轮询配置 ---
    pub poll_interval: Duration,
    /// 轮询总等待上限；为空表示不限
    pub max_poll_wait: Option<Duration>,
    // --- 目录配置 ---
    pub input_dir: String,
    pub output_dir: String,
}

impl Config {
    /// 使用默认值创建配置，只需提供服务地址和密钥
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint.into()),
            api_key: api_key.into(),
            model_id: "prebuilt-layout".to_string(),
            api_version: "2024-11-30".to_string(),
            output_content_format: "markdown".to_string(),
            content_type_override: None,
            request_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(5),
            max_poll_wait: None,
            input_dir: "input_documents".to_string(),
            output_dir: "content_json".to_string(),
        }
    }

    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 通过任意变量来源加载配置，空白值视为未设置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = EnvVars { lookup };
        let mut config = Self::new(vars.required("ADI_ENDPOINT")?, vars.required("ADI_API_KEY")?);

        if let Some(v) = vars.optional("ADI_MODEL_ID") {
            config.model_id = v;
        }
        if let Some(v) = vars.optional("ADI_API_VERSION") {
            config.api_version = v;
        }
        if let Some(v) = vars.optional("ADI_OUTPUT_FORMAT") {
            config.output_content_format = v;
        }
        config.content_type_override = vars.optional("ADI_CONTENT_TYPE");
        if let Some(v) = vars.optional("INPUT_DIR") {
            config.input_dir = v;
        }
        if let Some(v) = vars.optional("OUTPUT_DIR") {
            config.output_dir = v;
        }
        if let Some(secs) = vars.parsed::<u64>("POLL_INTERVAL_SECS")? {
            config.poll_interval = Duration::from_secs(secs);
        }
        config.max_poll_wait = vars.parsed::<u64>("POLL_MAX_WAIT_SECS")?.map(Duration::from_secs);
        if let Some(secs) = vars.parsed::<u64>("REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_dirs(mut self, input_dir: impl Into<String>, output_dir: impl Into<String>) -> Self {
        self.input_dir = input_dir.into();
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_poll_wait(mut self, max_wait: Duration) -> Self {
        self.max_poll_wait = Some(max_wait);
        self
    }

    /// 提交分析请求的完整 URL
    pub fn analyze_url(&self) -> String {
        format!(
            "{}documentintelligence/documentModels/{}:analyze?api-version={}&outputContentFormat={}",
            self.endpoint, self.model_id, self.api_version, self.output_content_format
        )
    }
}

fn normalize_endpoint(mut endpoint: String) -> String {
    if !endpoint.ends_with('/') {
        endpoint.push('/');
    }
    endpoint
}

struct EnvVars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> EnvVars<F> {
    fn optional(&self, var_name: &str) -> Option<String> {
        (self.lookup)(var_name).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, var_name: &str) -> Result<String, ConfigError> {
        self.optional(var_name).ok_or_else(|| ConfigError::EnvVarNotFound {
            var_name: var_name.to_string(),
        })
    }

    fn parsed<T: FromStr>(&self, var_name: &str) -> Result<Option<T>, ConfigError> {
        match self.optional(var_name) {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::EnvVarParseFailed {
                    var_name: var_name.to_string(),
                    value,
                    expected_type: std::any::type_name::<T>().to_string(),
                }),
        }
    }
}

//! 结果写入服务 - 业务能力层
//!
//! 只负责"把分析结果写成 JSON 文件"能力，不关心流程

use crate::error::{AppResult, FileError};
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// 确保输出目录存在（包括父目录）
pub async fn ensure_output_dir(dir: &Path) -> AppResult<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|source| FileError::CreateDirFailed {
            path: dir.to_path_buf(),
            source,
        })?;
    Ok(())
}

/// 以两空格缩进写入 JSON 结果，覆盖已有文件
pub async fn write_json(path: &Path, payload: &Value) -> AppResult<()> {
    let text = serde_json::to_string_pretty(payload).map_err(|source| FileError::SerializeFailed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("写入结果: {} ({} 字节)", path.display(), text.len());

    fs::write(path, text)
        .await
        .map_err(|source| FileError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}

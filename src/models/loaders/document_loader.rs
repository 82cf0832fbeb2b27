use crate::error::{AppError, AppResult};
use crate::models::work_item::WorkItem;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 扫描输入目录的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputListing {
    /// 输入目录不存在
    Missing(PathBuf),
    /// 目录存在但没有文件
    Empty(PathBuf),
    Items(Vec<WorkItem>),
}

/// 列出输入目录下的所有文件（不递归，接受任意扩展名），按文件名排序
pub async fn list_work_items(
    input_dir: &Path,
    output_dir: &Path,
    content_type_override: Option<&str>,
) -> AppResult<InputListing> {
    if !fs::try_exists(input_dir)
        .await
        .map_err(|e| AppError::file_read_failed(input_dir, e))?
    {
        return Ok(InputListing::Missing(input_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(input_dir)
        .await
        .map_err(|e| AppError::file_read_failed(input_dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(input_dir, e))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| AppError::file_read_failed(&path, e))?;
        if file_type.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        tracing::warn!("在文件夹 {} 中没有找到文件", input_dir.display());
        return Ok(InputListing::Empty(input_dir.to_path_buf()));
    }

    files.sort();

    let items = files
        .iter()
        .map(|path| WorkItem::new(path, output_dir, content_type_override))
        .collect();

    Ok(InputListing::Items(items))
}

/// 读取工作项对应的文档内容
pub async fn read_document(item: &WorkItem) -> AppResult<Vec<u8>> {
    fs::read(&item.input_path)
        .await
        .map_err(|e| AppError::file_read_failed(&item.input_path, e))
}

use std::path::{Path, PathBuf};

/// 一个待分析文档及其输出位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// 文件名（仅用于日志显示）
    pub name: String,
    pub input_path: PathBuf,
    /// `<文件名主干>.json`，位于输出目录下
    pub output_path: PathBuf,
    pub content_type: String,
}

impl WorkItem {
    /// 根据输入文件和输出目录创建工作项
    ///
    /// `content_type_override` 不为空时覆盖按扩展名推断的类型。
    pub fn new(input_path: &Path, output_dir: &Path, content_type_override: Option<&str>) -> Self {
        let name = input_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content_type = content_type_override
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for(input_path).to_string());

        Self {
            name,
            input_path: input_path.to_path_buf(),
            output_path: output_path_for(input_path, output_dir),
            content_type,
        }
    }
}

/// 输出文件路径：替换扩展名为 `.json`
pub fn output_path_for(input_path: &Path, output_dir: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{}.json", stem))
}

/// 按扩展名推断文档的 Content-Type
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heif" => "image/heif",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "html" | "htm" => "text/html",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_replaces_extension() {
        let item = WorkItem::new(Path::new("in/report.v2.xlsx"), Path::new("out"), None);
        assert_eq!(item.name, "report.v2.xlsx");
        assert_eq!(item.output_path, PathBuf::from("out/report.v2.json"));
        assert_eq!(
            item.content_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn file_without_extension_gets_json_suffix() {
        assert_eq!(
            output_path_for(Path::new("in/README"), Path::new("out")),
            PathBuf::from("out/README.json")
        );
        assert_eq!(content_type_for(Path::new("in/README")), "application/octet-stream");
    }

    #[test]
    fn content_type_is_case_insensitive_and_overridable() {
        assert_eq!(content_type_for(Path::new("SCAN.JPG")), "image/jpeg");
        let item = WorkItem::new(Path::new("a.pdf"), Path::new("out"), Some("image/png"));
        assert_eq!(item.content_type, "image/png");
    }
}

//! 错误处理模块
//!
//! 定义导出流程中使用的错误类型。只有致命错误会离开本库：
//! 源文件不可读、源文本无法扫描、配置错误以及词典文件写入失败。
//! 翻译失败在客户端内部被吸收，不会出现在这里。

use std::path::PathBuf;

/// 导出错误类型
///
/// # 变体说明
///
/// * `SourceUnreadable` - 源词典文件无法读取，导出开始前即失败
/// * `Parse` - 源内容不是可扫描的文本（例如非UTF-8字节）
/// * `Persistence` - 写入某个词条或结束标记失败，整个导出中止
/// * `Config` - 配置文件读取或解析失败
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// 源文件读取失败
    #[error("cannot read source dictionary {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 源文本扫描失败，零条记录
    #[error("Parse error: {0}")]
    Parse(String),

    /// 词典文件写入失败
    #[error("failed to write {artifact} at entry {index}: {source}")]
    Persistence {
        /// 输出文件标识
        artifact: String,
        /// 失败时的词条序号（结束标记失败时等于已写入词条数）
        index: usize,
        #[source]
        source: std::io::Error,
    },

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ExportError {
    fn from(error: toml::de::Error) -> Self {
        ExportError::Config(error.to_string())
    }
}

impl From<toml::ser::Error> for ExportError {
    fn from(error: toml::ser::Error) -> Self {
        ExportError::Config(error.to_string())
    }
}

/// 单次翻译请求的失败原因
///
/// 仅在翻译客户端内部使用，最终都会折叠为 `TranslationOutcome::Unavailable`。
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    /// HTTP请求错误
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 非成功状态码
    #[error("API error {code}: {message}")]
    Status { code: u16, message: String },

    /// 响应体不是预期的JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// 响应中缺少 translatedText 字段
    #[error("response has no translatedText")]
    MissingText,
}

/// 导出结果类型别名
///
/// # 示例
///
/// ```rust
/// use dictionary_exporter::{ExportError, Result};
///
/// fn example_function() -> Result<usize> {
///     Err(ExportError::Config("missing targets".to_string()))
/// }
///
/// assert!(example_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, ExportError>;

//! # Dictionary Exporter
//!
//! 将一份源词典（词头、释义、发音、英语对应词）转换为多种语言的查找表，
//! 可选地通过远程翻译服务翻译每条记录的词头和释义。
//!
//! ## 主要特性
//!
//! - **容错提取**: 从格式松散的文本中恢复记录，残缺的块被静默跳过
//! - **逐条写入**: 词典表逐条写出并刷新，结束标记写入后才可用
//! - **失败无害的翻译**: 任何翻译失败都回退到原文，不会中止导出
//! - **节奏控制**: 翻译模式下逐条处理并在每条之后等待，限制请求频率
//! - **配置灵活**: 支持TOML配置文件和程序化配置
//!
//! ## 快速开始
//!
//! ```no_run
//! use dictionary_exporter::{
//!     extract_records, read_source, ExporterConfig, Exporter, LibreTranslateClient,
//!     TracingReporter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExporterConfig::default();
//!     let records = extract_records(&read_source(&config.export.source_path)?);
//!
//!     let client = LibreTranslateClient::new(config.translation.clone());
//!     let exporter = Exporter::new(client, &config.export);
//!     exporter
//!         .export_all(&config.targets, &records, &mut TracingReporter)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod translator;
pub mod types;
pub mod writer;

pub use config::ExporterConfig;
pub use error::{ExportError, Result, TranslationError};
pub use exporter::{Exporter, ProgressReporter, TracingReporter};
pub use extractor::{extract_from_bytes, extract_records, read_source};
pub use translator::{LibreTranslateClient, Translator};
pub use types::{
    DictionaryRecord, ExportSettings, ExportSummary, ExportTarget, KeyingMode, Progress,
    TableEntry, TranslationConfig, TranslationOutcome,
};
pub use writer::{preview, render_entry, TableWriter, CLOSING_MARKER, OPENING_MARKER};

//! 词典表写入模块
//!
//! 以 `const dictionary = { ... };` 的形式逐条写出词典表。
//! 每写入一条就刷新一次，结束标记写入之前文件不可用。

use crate::error::{ExportError, Result};
use crate::types::TableEntry;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 词典表开头标记
pub const OPENING_MARKER: &str = "const dictionary = {\n";
/// 词典表结束标记
pub const CLOSING_MARKER: &str = "};\n";

/// 逐条写入的词典表写入器
///
/// 持有唯一的输出句柄，直到 `finish` 或被丢弃。
/// 键不做去重：重复的键会原样写出两次，按映射加载时后写入的生效。
pub struct TableWriter<W: Write> {
    out: W,
    artifact: String,
    entries_written: usize,
}

impl TableWriter<File> {
    /// 截断（或创建）输出文件并写入开头标记
    pub fn create<P: AsRef<Path>>(path: P, artifact: impl Into<String>) -> Result<Self> {
        let artifact = artifact.into();
        let file = File::create(path.as_ref()).map_err(|source| ExportError::Persistence {
            artifact: artifact.clone(),
            index: 0,
            source,
        })?;
        Self::from_writer(file, artifact)
    }
}

impl<W: Write> TableWriter<W> {
    /// 包装已打开的输出并写入开头标记
    pub fn from_writer(out: W, artifact: impl Into<String>) -> Result<Self> {
        let mut writer = Self {
            out,
            artifact: artifact.into(),
            entries_written: 0,
        };
        writer.write_chunk(OPENING_MARKER)?;
        Ok(writer)
    }

    /// 写入一条词条
    pub fn write_entry(&mut self, entry: &TableEntry) -> Result<()> {
        self.write_chunk(&render_entry(entry))?;
        self.entries_written += 1;
        Ok(())
    }

    /// 写入结束标记，返回词条数和底层写入器
    pub fn finish(mut self) -> Result<(usize, W)> {
        self.write_chunk(CLOSING_MARKER)?;
        Ok((self.entries_written, self.out))
    }

    pub fn entries_written(&self) -> usize {
        self.entries_written
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        self.out
            .write_all(chunk.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|source| ExportError::Persistence {
                artifact: self.artifact.clone(),
                index: self.entries_written,
                source,
            })
    }
}

/// 渲染一条词条，所有字符串都经过JSON转义
pub fn render_entry(entry: &TableEntry) -> String {
    format!(
        "  {}: {{\n    definition: {},\n    pronunciation: {},\n    englishEquivalent: {}\n  }},\n",
        json_string(&entry.key),
        json_string(&entry.definition),
        json_string(&entry.pronunciation),
        json_string(&entry.english_equivalent),
    )
}

/// 预览前 `limit` 条词条，其余以 `...and N more.` 概括
pub fn preview(entries: &[TableEntry], limit: usize) -> String {
    let mut text = entries
        .iter()
        .take(limit)
        .map(|entry| {
            format!(
                "{}: {{\n  definition: {},\n  pronunciation: {},\n  englishEquivalent: {}\n}},",
                json_string(&entry.key),
                json_string(&entry.definition),
                json_string(&entry.pronunciation),
                json_string(&entry.english_equivalent),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    if entries.len() > limit {
        text.push_str(&format!("\n...and {} more.", entries.len() - limit));
    }
    text
}

fn json_string(value: &str) -> String {
    // 序列化 &str 不会失败
    serde_json::Value::String(value.to_string()).to_string()
}

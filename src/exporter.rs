//! 导出编排模块
//!
//! 对每个导出目标选择键生成方式：直接重新键控，或者先翻译再键控。
//! 翻译模式下逐条顺序处理记录，每条记录的词头和释义并发翻译，
//! 之后固定等待一段时间以限制请求频率，并按固定间隔报告进度。
//! 唯一的中止条件是写入失败。

use crate::error::Result;
use crate::translator::Translator;
use crate::types::{
    DictionaryRecord, ExportSettings, ExportSummary, ExportTarget, KeyingMode, Progress, TableEntry,
};
use crate::writer::TableWriter;
use std::io::Write;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// 进度观察者
///
/// 渲染方式（控制台、界面、日志）由实现方决定。
/// 导出函数接收 `dyn ProgressReporter + Send`，导出的 future 可以交给 `tokio::spawn`。
pub trait ProgressReporter {
    fn progress(&mut self, update: Progress);

    fn finished(&mut self, summary: &ExportSummary);
}

/// 通过 `tracing` 输出进度的观察者
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn progress(&mut self, update: Progress) {
        info!("Translated {} / {} entries...", update.completed, update.total);
    }

    fn finished(&mut self, summary: &ExportSummary) {
        info!(
            target_code = %summary.target,
            translated_keys = summary.translated_keys,
            "Exported {} entries to {}",
            summary.exported,
            summary.output
        );
    }
}

/// 导出编排器
pub struct Exporter<T: Translator> {
    translator: T,
    pacing: Duration,
    progress_every: usize,
}

impl<T: Translator> Exporter<T> {
    pub fn new(translator: T, settings: &ExportSettings) -> Self {
        Self {
            translator,
            pacing: Duration::from_millis(settings.pacing_delay_ms),
            progress_every: settings.progress_every,
        }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    /// 截断目标输出文件并导出全部记录
    pub async fn run_export(
        &self,
        target: &ExportTarget,
        records: &[DictionaryRecord],
        reporter: &mut (dyn ProgressReporter + Send),
    ) -> Result<ExportSummary> {
        let writer = TableWriter::create(&target.output, target.output.as_str())?;
        let (summary, _) = self.export_into(writer, target, records, reporter).await?;
        Ok(summary)
    }

    /// 依次导出多个目标，遇到第一个致命错误即停止
    pub async fn export_all(
        &self,
        targets: &[ExportTarget],
        records: &[DictionaryRecord],
        reporter: &mut (dyn ProgressReporter + Send),
    ) -> Result<Vec<ExportSummary>> {
        let mut summaries = Vec::with_capacity(targets.len());
        for target in targets {
            summaries.push(self.run_export(target, records, reporter).await?);
        }
        info!("All exports complete.");
        Ok(summaries)
    }

    /// 将记录写入已打开的写入器，返回汇总和关闭后的底层写入器
    pub async fn export_into<W: Write>(
        &self,
        mut writer: TableWriter<W>,
        target: &ExportTarget,
        records: &[DictionaryRecord],
        reporter: &mut (dyn ProgressReporter + Send),
    ) -> Result<(ExportSummary, W)> {
        let mut translated_keys = 0;

        match &target.mode {
            KeyingMode::IdentityByWord => {
                for record in records {
                    writer.write_entry(&TableEntry::keyed_by(record, &record.word))?;
                }
            }
            KeyingMode::IdentityByEnglishEquivalent => {
                for record in records {
                    writer.write_entry(&TableEntry::keyed_by(record, &record.english_equivalent))?;
                }
            }
            KeyingMode::Translate {
                source_lang,
                target_lang,
            } => {
                info!(
                    "Translating {} entries to {} - this may take a while...",
                    records.len(),
                    target_lang
                );
                translated_keys = self
                    .translate_records(&mut writer, records, source_lang, target_lang, reporter)
                    .await?;
            }
        }

        let (exported, out) = writer.finish()?;
        let summary = ExportSummary {
            target: target.code.clone(),
            output: target.output.clone(),
            exported,
            translated_keys,
        };
        reporter.finished(&summary);
        Ok((summary, out))
    }

    async fn translate_records<W: Write>(
        &self,
        writer: &mut TableWriter<W>,
        records: &[DictionaryRecord],
        source_lang: &str,
        target_lang: &str,
        reporter: &mut (dyn ProgressReporter + Send),
    ) -> Result<usize> {
        let total = records.len();
        let mut translated_keys = 0;

        for (i, record) in records.iter().enumerate() {
            let (word, definition) = tokio::join!(
                self.translator.translate(&record.word, source_lang, target_lang),
                self.translator.translate(&record.definition, source_lang, target_lang),
            );
            if word.is_translated() {
                translated_keys += 1;
            }

            writer.write_entry(&TableEntry::from_translation(record, word, definition))?;

            let completed = i + 1;
            if self.should_report(completed, total) {
                reporter.progress(Progress { completed, total });
            }

            sleep(self.pacing).await;
        }

        Ok(translated_keys)
    }

    fn should_report(&self, completed: usize, total: usize) -> bool {
        completed == total || (self.progress_every > 0 && completed % self.progress_every == 0)
    }
}

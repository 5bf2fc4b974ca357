//! 类型定义模块
//!
//! 定义词典记录、导出目标、翻译结果以及进度报告使用的数据结构。

use serde::{Deserialize, Serialize};

/// 词典记录
///
/// 从源词典中提取出的一条完整记录。四个字段必须同时存在，
/// 缺少任意字段的块在提取阶段就会被丢弃。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryRecord {
    /// 源语言词头
    pub word: String,
    /// 释义，可能包含引号或标点
    pub definition: String,
    /// 自由格式的发音标注
    pub pronunciation: String,
    /// 英语对应词
    pub english_equivalent: String,
}

impl DictionaryRecord {
    pub fn new(
        word: impl Into<String>,
        definition: impl Into<String>,
        pronunciation: impl Into<String>,
        english_equivalent: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
            pronunciation: pronunciation.into(),
            english_equivalent: english_equivalent.into(),
        }
    }
}

/// 词条键的生成方式
///
/// 在TOML中写作：
///
/// ```toml
/// mode = "identity-by-word"
/// ```
///
/// 或者：
///
/// ```toml
/// mode = "translate"
/// source_lang = "es"
/// target_lang = "fr"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum KeyingMode {
    /// 直接使用词头作为键
    IdentityByWord,
    /// 直接使用英语对应词作为键
    IdentityByEnglishEquivalent,
    /// 翻译词头和释义后再作为键
    Translate {
        source_lang: String,
        target_lang: String,
    },
}

impl KeyingMode {
    /// 非翻译模式下直接作为键的字段，翻译模式返回 `None`
    pub fn identity_key<'a>(&self, record: &'a DictionaryRecord) -> Option<&'a str> {
        match self {
            KeyingMode::IdentityByWord => Some(&record.word),
            KeyingMode::IdentityByEnglishEquivalent => Some(&record.english_equivalent),
            KeyingMode::Translate { .. } => None,
        }
    }
}

/// 导出目标
///
/// 一个目标语言代码，绑定输出文件和键生成方式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTarget {
    /// 目标语言代码，如 "fr"
    pub code: String,
    /// 输出文件路径
    pub output: String,
    #[serde(flatten)]
    pub mode: KeyingMode,
}

impl ExportTarget {
    pub fn identity_by_word(code: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            output: output.into(),
            mode: KeyingMode::IdentityByWord,
        }
    }

    pub fn identity_by_english(code: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            output: output.into(),
            mode: KeyingMode::IdentityByEnglishEquivalent,
        }
    }

    /// 翻译目标，目标语言代码同时作为翻译服务的 target
    pub fn translated(
        code: impl Into<String>,
        output: impl Into<String>,
        source_lang: impl Into<String>,
    ) -> Self {
        let code = code.into();
        Self {
            output: output.into(),
            mode: KeyingMode::Translate {
                source_lang: source_lang.into(),
                target_lang: code.clone(),
            },
            code,
        }
    }
}

/// 一行待写入的词条
///
/// 只在写入一行时短暂存在。`pronunciation` 和 `english_equivalent`
/// 始终来自原始记录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    pub key: String,
    pub definition: String,
    pub pronunciation: String,
    pub english_equivalent: String,
}

impl TableEntry {
    /// 以记录的某个字段原样作为键
    pub fn keyed_by(record: &DictionaryRecord, key: &str) -> Self {
        Self {
            key: key.to_string(),
            definition: record.definition.clone(),
            pronunciation: record.pronunciation.clone(),
            english_equivalent: record.english_equivalent.clone(),
        }
    }

    /// 按翻译模式的回退策略生成词条
    pub fn from_translation(
        record: &DictionaryRecord,
        word: TranslationOutcome,
        definition: TranslationOutcome,
    ) -> Self {
        Self {
            key: word.or_original(&record.word),
            definition: definition.or_original(&record.definition),
            pronunciation: record.pronunciation.clone(),
            english_equivalent: record.english_equivalent.clone(),
        }
    }
}

/// 单次翻译调用的结果
///
/// 空字符串的翻译结果与失败无法区分，两者都记为 `Unavailable`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    Unavailable,
}

impl TranslationOutcome {
    /// 失败时回退到原文
    pub fn or_original(self, original: &str) -> String {
        match self {
            TranslationOutcome::Translated(text) => text,
            TranslationOutcome::Unavailable => original.to_string(),
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, TranslationOutcome::Translated(_))
    }
}

/// 进度更新
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// 导出完成后的汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// 目标语言代码
    pub target: String,
    /// 输出文件标识
    pub output: String,
    /// 写入的词条数
    pub exported: usize,
    /// 成功翻译了词头的词条数，非翻译模式为0
    pub translated_keys: usize,
}

/// 翻译服务配置
///
/// # 字段说明
///
/// * `api_url` - LibreTranslate 兼容的翻译接口地址
/// * `timeout_secs` - 单次请求超时时间（秒）
/// * `user_agent` - 请求使用的 User-Agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub api_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://translate.argosopentech.com/translate".to_string(),
            timeout_secs: 30,
            user_agent: concat!("dictionary-exporter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// 导出流程配置
///
/// 节奏延迟和进度间隔只是策略值，并非来自翻译服务的实测限额。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// 源词典路径
    pub source_path: String,
    /// 翻译模式下每条记录之后的等待时间（毫秒）
    pub pacing_delay_ms: u64,
    /// 每隔多少条记录报告一次进度，0表示只在最后一条报告
    pub progress_every: usize,
    /// 预览时显示的词条数
    pub preview_limit: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            source_path: "dictionary.txt".to_string(),
            pacing_delay_ms: 150,
            progress_every: 25,
            preview_limit: 10,
        }
    }
}

/// LibreTranslate 请求体
#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
}

/// LibreTranslate 响应体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibreTranslateResponse {
    pub translated_text: Option<String>,
}

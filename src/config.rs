//! 配置管理模块
//!
//! 提供TOML配置文件的读取、写入和自动发现功能。

use crate::error::{ExportError, Result};
use crate::types::{ExportSettings, ExportTarget, TranslationConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// 导出工具配置结构
///
/// # 示例
///
/// ```no_run
/// use dictionary_exporter::ExporterConfig;
///
/// // 从默认位置加载配置
/// let config = ExporterConfig::load_from_default_locations();
///
/// // 从指定文件加载配置
/// let config = ExporterConfig::from_file("dictionary-exporter.toml").unwrap();
///
/// // 保存配置到文件
/// config.save_to_file("output.toml").unwrap();
/// ```
///
/// ```toml
/// [translation]
/// api_url = "https://translate.argosopentech.com/translate"
/// timeout_secs = 30
///
/// [export]
/// source_path = "dictionary.txt"
/// pacing_delay_ms = 150
/// progress_every = 25
///
/// [[targets]]
/// code = "fr"
/// output = "frenchdictionary.js"
/// mode = "translate"
/// source_lang = "es"
/// target_lang = "fr"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// 翻译配置
    #[serde(default)]
    pub translation: TranslationConfig,
    /// 导出配置
    #[serde(default)]
    pub export: ExportSettings,
    /// 导出目标
    #[serde(default = "default_targets")]
    pub targets: Vec<ExportTarget>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            translation: TranslationConfig::default(),
            export: ExportSettings::default(),
            targets: default_targets(),
        }
    }
}

/// Spanish and English tables are re-keyed, the rest are translated from Spanish.
pub fn default_targets() -> Vec<ExportTarget> {
    vec![
        ExportTarget::identity_by_word("es", "spanishdictionary.js"),
        ExportTarget::identity_by_english("en", "englishdictionary.js"),
        ExportTarget::translated("fr", "frenchdictionary.js", "es"),
        ExportTarget::translated("hi", "hindidictionary.js", "es"),
        ExportTarget::translated("vi", "vietnamesedictionary.js", "es"),
        ExportTarget::translated("zh", "mandarindictionary.js", "es"),
    ]
}

impl ExporterConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ExportError::Config(format!("{}: {}", path.display(), e)))?;
        let config: ExporterConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| ExportError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Load configuration from multiple possible locations
    pub fn load_from_default_locations() -> Self {
        let possible_paths = [
            "dictionary-exporter.toml",
            "config.toml",
            ".dictionary-exporter.toml",
        ];

        for path in &possible_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        info!("Loaded configuration from: {}", path);
                        return config;
                    }
                    Err(e) => {
                        warn!("Failed to load config from {}: {}", path, e);
                    }
                }
            }
        }

        info!("No configuration file found, using defaults");
        Self::default()
    }

    /// Generate example configuration file
    pub fn generate_example_config<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::default().save_to_file(path)
    }

    /// 按语言代码查找导出目标
    pub fn target(&self, code: &str) -> Option<&ExportTarget> {
        self.targets.iter().find(|t| t.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyingMode;

    #[test]
    fn defaults_cover_the_six_dictionaries() {
        let config = ExporterConfig::default();
        let codes: Vec<_> = config.targets.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, ["es", "en", "fr", "hi", "vi", "zh"]);
        assert_eq!(config.target("es").unwrap().mode, KeyingMode::IdentityByWord);
        assert_eq!(
            config.target("zh").unwrap().mode,
            KeyingMode::Translate {
                source_lang: "es".to_string(),
                target_lang: "zh".to_string()
            }
        );
        assert!(config.target("de").is_none());
    }

    #[test]
    fn example_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary-exporter.toml");

        ExporterConfig::generate_example_config(&path).unwrap();
        let loaded = ExporterConfig::from_file(&path).unwrap();

        assert_eq!(loaded, ExporterConfig::default());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: ExporterConfig = toml::from_str(
            r#"
            [export]
            pacing_delay_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.export.pacing_delay_ms, 0);
        assert_eq!(config.export.progress_every, 25);
        assert_eq!(config.translation, TranslationConfig::default());
        assert_eq!(config.targets.len(), 6);
    }

    #[test]
    fn invalid_mode_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(
            &path,
            "[[targets]]\ncode = \"de\"\noutput = \"germandictionary.js\"\nmode = \"guess\"\n",
        )
        .unwrap();

        assert!(matches!(
            ExporterConfig::from_file(&path),
            Err(ExportError::Config(_))
        ));
    }
}

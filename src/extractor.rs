//! 记录提取模块
//!
//! 从格式松散的源词典文本中恢复词典记录。扫描分两步：
//! 先按花括号定位块边界，再在块内按固定顺序要求
//! `word`、`definition`、`pronunciation`、`englishEquivalent` 四个字段。
//! 任意字段缺失的块被静默跳过。

use crate::error::{ExportError, Result};
use crate::types::DictionaryRecord;
use std::fs;
use std::path::Path;

const REQUIRED_FIELDS: [&str; 4] = ["word", "definition", "pronunciation", "englishEquivalent"];

/// 从源文本中提取全部有效记录，保持源顺序
///
/// # 示例
///
/// ```rust
/// use dictionary_exporter::extract_records;
///
/// let text = r#"{ word: "manzana", definition: "a fruit", pronunciation: "man-ZA-na", englishEquivalent: "apple" }"#;
/// let records = extract_records(text);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].english_equivalent, "apple");
/// ```
pub fn extract_records(text: &str) -> Vec<DictionaryRecord> {
    blocks(text).filter_map(parse_block).collect()
}

/// 从原始字节中提取记录，非UTF-8输入视为解析失败
pub fn extract_from_bytes(bytes: &[u8]) -> Result<Vec<DictionaryRecord>> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExportError::Parse(format!("source is not valid UTF-8 text: {}", e))
    })?;
    Ok(extract_records(text))
}

/// 读取整个源词典，任何读取失败都记为 `SourceUnreadable`
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ExportError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes)
        .map_err(|e| ExportError::Parse(format!("{} is not valid UTF-8 text: {}", path.display(), e)))
}

/// 引号之外最内层的 `{ ... }` 片段
fn blocks(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_quote = false;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'"' if !in_quote => in_quote = true,
            b'"' if is_closing_quote(bytes, i) => in_quote = false,
            // 引号内的值不跨行
            b'\n' => in_quote = false,
            b'{' if !in_quote => start = Some(i + 1),
            b'}' if !in_quote => {
                if let Some(s) = start.take() {
                    spans.push(&text[s..i]);
                }
            }
            _ => {}
        }
    }

    spans.into_iter()
}

/// 值内部可以出现引号：只有后面（跳过空格和制表符）紧跟
/// `,`、`}`、`:`、换行或文本结尾的引号才结束字面量
fn is_closing_quote(bytes: &[u8], quote: usize) -> bool {
    let next = bytes[quote + 1..]
        .iter()
        .find(|&&b| b != b' ' && b != b'\t');
    matches!(next, None | Some(b',' | b'}' | b':' | b'\n' | b'\r'))
}

fn parse_block(block: &str) -> Option<DictionaryRecord> {
    let fields = Scanner::new(block).fields();
    let mut remaining = fields.iter();
    let mut values: [&str; 4] = [""; 4];

    for (slot, name) in values.iter_mut().zip(REQUIRED_FIELDS) {
        let (_, value) = remaining.by_ref().find(|(field, _)| *field == name)?;
        *slot = *value;
    }

    let [word, definition, pronunciation, english_equivalent] = values;
    Some(DictionaryRecord::new(word, definition, pronunciation, english_equivalent))
}

/// 块内的 `name: "value"` 扫描器
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'$') {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    /// 从开引号开始读取引号字面量，同一行内没有闭合时返回 `None`
    fn quoted(&mut self) -> Option<&'a str> {
        if !self.eat(b'"') {
            return None;
        }
        let bytes = self.text.as_bytes();
        let start = self.pos;
        while let Some(b) = self.peek() {
            match b {
                b'"' if is_closing_quote(bytes, self.pos) => {
                    let value = &self.text[start..self.pos];
                    self.pos += 1;
                    return Some(value);
                }
                b'\n' => return None,
                _ => self.pos += 1,
            }
        }
        None
    }

    /// 字段名之后的 `: "value"`
    fn value(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        if !self.eat(b':') {
            return None;
        }
        self.skip_whitespace();
        if self.peek() != Some(b'"') {
            return None;
        }
        self.quoted()
    }

    fn fields(mut self) -> Vec<(&'a str, &'a str)> {
        let mut fields = Vec::new();

        while let Some(b) = self.peek() {
            let name = if b == b'"' {
                match self.quoted() {
                    Some(name) => name,
                    None => continue,
                }
            } else if b.is_ascii_alphabetic() || b == b'_' || b == b'$' {
                self.identifier()
            } else {
                self.pos += 1;
                continue;
            };

            if let Some(value) = self.value() {
                fields.push((name, value));
            }
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANZANA: &str = r#"{ word: "manzana", definition: "a fruit", pronunciation: "man-ZA-na", englishEquivalent: "apple" }"#;

    #[test]
    fn extracts_single_block() {
        let records = extract_records(MANZANA);
        assert_eq!(
            records,
            vec![DictionaryRecord::new("manzana", "a fruit", "man-ZA-na", "apple")]
        );
    }

    #[test]
    fn tolerates_irregular_whitespace_and_line_breaks() {
        let text = "[\n  {\n    word:\"perro\",\n\n    definition:   \"a dog\" ,\n\tpronunciation: \"PEH-rro\",\n    englishEquivalent:\n      \"dog\"\n  },\n]";
        let records = extract_records(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, "perro");
        assert_eq!(records[0].definition, "a dog");
        assert_eq!(records[0].english_equivalent, "dog");
    }

    #[test]
    fn preserves_source_order() {
        let text = r#"
            { word: "uno", definition: "one", pronunciation: "OO-no", englishEquivalent: "one" },
            { word: "dos", definition: "two", pronunciation: "dohs", englishEquivalent: "two" },
            { word: "tres", definition: "three", pronunciation: "trehs", englishEquivalent: "three" }
        "#;
        let words: Vec<_> = extract_records(text).into_iter().map(|r| r.word).collect();
        assert_eq!(words, ["uno", "dos", "tres"]);
    }

    #[test]
    fn skips_block_missing_a_field_without_affecting_neighbours() {
        let text = r#"
            { word: "uno", definition: "one", pronunciation: "OO-no", englishEquivalent: "one" },
            { word: "dos", definition: "two", englishEquivalent: "two" },
            { word: "tres", definition: "three", pronunciation: "trehs", englishEquivalent: "three" }
        "#;
        let words: Vec<_> = extract_records(text).into_iter().map(|r| r.word).collect();
        assert_eq!(words, ["uno", "tres"]);
    }

    #[test]
    fn missing_pronunciation_yields_nothing() {
        let text = r#"{ word: "manzana", definition: "a fruit", englishEquivalent: "apple" }"#;
        assert!(extract_records(text).is_empty());
    }

    #[test]
    fn fields_out_of_order_are_rejected() {
        let text = r#"{ definition: "a fruit", word: "manzana", pronunciation: "man-ZA-na", englishEquivalent: "apple" }"#;
        assert!(extract_records(text).is_empty());
    }

    #[test]
    fn values_are_taken_literally() {
        let text = r#"{ word: "a\n", definition: "it's {braced}, really", pronunciation: "x: y", englishEquivalent: "trailing \" }"#;
        let records = extract_records(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, r"a\n");
        assert_eq!(records[0].definition, "it's {braced}, really");
        assert_eq!(records[0].pronunciation, "x: y");
        assert_eq!(records[0].english_equivalent, r"trailing \");
    }

    #[test]
    fn escaped_quotes_stay_inside_the_definition() {
        let text = r#"{ word: "decir", definition: "to say, as in \"hola\" to a friend", pronunciation: "deh-SEER", englishEquivalent: "to say" }"#;
        let records = extract_records(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].definition, r#"to say, as in \"hola\" to a friend"#);
        assert_eq!(records[0].pronunciation, "deh-SEER");
    }

    #[test]
    fn bare_embedded_quote_keeps_the_block() {
        let text = r#"
            { word: "pulgada", definition: "an inch (1")", pronunciation: "pool-GAH-dah", englishEquivalent: "inch" },
            { word: "pie", definition: "a foot (12")", pronunciation: "pyeh", englishEquivalent: "foot" }
        "#;
        let records = extract_records(text);
        assert_eq!(
            records,
            vec![
                DictionaryRecord::new("pulgada", r#"an inch (1")"#, "pool-GAH-dah", "inch"),
                DictionaryRecord::new("pie", r#"a foot (12")"#, "pyeh", "foot"),
            ]
        );
    }

    #[test]
    fn closing_quote_allows_whitespace_before_terminator() {
        let text = "{ word: \"ojo\"  , definition: \"say \"ah\"\t}";
        let spans: Vec<_> = blocks(text).collect();
        assert_eq!(spans.len(), 1);
        assert!(is_closing_quote(b"\"x\" ,", 2));
        assert!(is_closing_quote(b"\"x\"", 2));
        assert!(!is_closing_quote(b"\"x\" y", 2));
    }

    #[test]
    fn field_names_inside_values_do_not_count() {
        let text = r#"{ word: "casa", definition: "pronunciation: \"no\"", englishEquivalent: "house" }"#;
        assert!(extract_records(text).is_empty());
    }

    #[test]
    fn quoted_keys_and_extra_fields_are_accepted() {
        let text = r#"{ "word": "gato", "gender": "m", "definition": "a cat", "pronunciation": "GAH-toh", "englishEquivalent": "cat", "notes": "" }"#;
        let records = extract_records(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].word, "gato");
        assert_eq!(records[0].pronunciation, "GAH-toh");
    }

    #[test]
    fn value_broken_across_lines_invalidates_block() {
        let text = "{ word: \"man\nzana\", definition: \"a fruit\", pronunciation: \"p\", englishEquivalent: \"apple\" }";
        assert!(extract_records(text).is_empty());
    }

    #[test]
    fn empty_and_blockless_text_yield_nothing() {
        assert!(extract_records("").is_empty());
        assert!(extract_records(r#"word: "x", definition: "y""#).is_empty());
    }

    #[test]
    fn non_utf8_bytes_are_a_parse_failure() {
        let err = extract_from_bytes(&[0x7b, 0xff, 0xfe, 0x7d]).unwrap_err();
        assert!(matches!(err, ExportError::Parse(_)));
        assert_eq!(extract_from_bytes(MANZANA.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn missing_source_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(dir.path().join("dictionary.txt")).unwrap_err();
        assert!(matches!(err, ExportError::SourceUnreadable { .. }));
    }
}

//! 日付抽出モジュール

use super::{DateToken, MonthVocabulary, VocabularyError};
use regex::Regex;

/// 月名 + 日 の日付抽出器
///
/// `\b(月名)\s+([0-9]{1,2})` に続く文字が数字でない最初の一致だけを使う。
/// 大文字小文字は区別する。日は ASCII 数字のみ。
#[derive(Debug, Clone)]
pub struct DateExtractor {
    pattern: Regex,
    vocabulary: MonthVocabulary,
}

impl DateExtractor {
    /// 月名辞書から正規表現を組み立てる
    pub fn new(vocabulary: &MonthVocabulary) -> Result<Self, VocabularyError> {
        // 長い名前から順に並べる
        let mut names: Vec<&str> = vocabulary.names().collect();
        names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));

        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!(r"\b({})\s+([0-9]{{1,2}})(?:[^0-9]|$)", alternation))
            .map_err(VocabularyError::Pattern)?;

        Ok(Self {
            pattern,
            vocabulary: vocabulary.clone(),
        })
    }

    /// テキストから最初の日付を抽出
    ///
    /// 最初の一致の日が 1..=31 の範囲外なら、後続の一致は見ずに `None`。
    pub fn extract(&self, text: &str) -> Option<DateToken> {
        let caps = self.pattern.captures(text)?;
        let month = self.vocabulary.month_of(caps.get(1)?.as_str())?;
        let day: u8 = caps.get(2)?.as_str().parse().ok()?;
        DateToken::new(month, day)
    }
}

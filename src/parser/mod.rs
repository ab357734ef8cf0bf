//! テキスト解析モジュール - OCRテキストからの日付抽出

mod date;

pub use date::DateExtractor;

use chrono::Month;
use thiserror::Error;

/// 月名辞書のエラー
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("月名が空です")]
    EmptyName,

    #[error("月番号は 1〜12 で指定してください: {name}={number}")]
    MonthOutOfRange { name: String, number: u32 },

    #[error("月名辞書が空です")]
    Empty,

    #[error("月名の指定は NAME=NUMBER 形式です: {0:?}")]
    MalformedEntry(String),

    #[error("月名パターンのコンパイルに失敗: {0}")]
    Pattern(#[source] regex::Error),
}

/// OCRテキストから認識した (月, 日)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateToken {
    month: u8,
    day: u8,
}

impl DateToken {
    /// 月は 1..=12、日は 1..=31 の範囲外なら `None`
    pub fn new(month: u8, day: u8) -> Option<Self> {
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some(Self { month, day })
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// 新しいファイル名を生成
    /// フォーマット: [MM]-[DD].[拡張子]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{:02}-{:02}.{}", self.month, self.day, extension)
    }
}

/// 月名 → 月番号 の対応表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthVocabulary {
    entries: Vec<(String, u8)>,
}

impl MonthVocabulary {
    /// 英語の正式な月名12個 ("January" → 1 ... "December" → 12)
    pub fn english() -> Self {
        let mut month = Month::January;
        let entries = (1..=12u8)
            .map(|number| {
                let entry = (month.name().to_string(), number);
                month = month.succ();
                entry
            })
            .collect();
        Self { entries }
    }

    /// 任意の (月名, 月番号) から辞書を作成
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, u8)> = Vec::new();

        for (name, number) in pairs {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(VocabularyError::EmptyName);
            }
            let month = u8::try_from(number)
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or_else(|| VocabularyError::MonthOutOfRange {
                    name: name.clone(),
                    number,
                })?;

            // 同じ月名は後の指定で上書き
            match entries.iter_mut().find(|(existing, _)| *existing == name) {
                Some(entry) => entry.1 = month,
                None => entries.push((name, month)),
            }
        }

        if entries.is_empty() {
            return Err(VocabularyError::Empty);
        }

        Ok(Self { entries })
    }

    /// "Janvier=1" 形式の1エントリを解析
    pub fn parse_entry(entry: &str) -> Result<(String, u32), VocabularyError> {
        let (name, number) = entry
            .split_once('=')
            .ok_or_else(|| VocabularyError::MalformedEntry(entry.to_string()))?;
        let number: u32 = number
            .trim()
            .parse()
            .map_err(|_| VocabularyError::MalformedEntry(entry.to_string()))?;
        Ok((name.trim().to_string(), number))
    }

    /// 月名から月番号を取得（大文字小文字を区別）
    pub fn month_of(&self, name: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, month)| *month)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MonthVocabulary {
    fn default() -> Self {
        Self::english()
    }
}

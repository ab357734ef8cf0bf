//! リネーム設定

use crate::parser::MonthVocabulary;
use crate::renamer::{CollisionPolicy, ErrorPolicy, NoMatchPolicy};
use std::path::PathBuf;

pub const DEFAULT_SOURCE_DIR: &str = "split_images";
pub const DEFAULT_OUTPUT_DIR: &str = "renamed_images";
pub const DEFAULT_EXTENSION: &str = "png";

/// パイプラインに渡す不変の設定値
#[derive(Debug, Clone)]
pub struct RenameConfig {
    /// 元画像のフォルダ
    pub source_dir: PathBuf,
    /// コピー先フォルダ (なければ作成)
    pub output_dir: PathBuf,
    /// 対象拡張子 (ドットなし、大文字小文字を区別)
    pub extension: String,
    /// 月名辞書
    pub vocabulary: MonthVocabulary,
    /// ファイル名順に処理するか
    pub sorted: bool,
    pub no_match: NoMatchPolicy,
    pub collision: CollisionPolicy,
    pub on_error: ErrorPolicy,
}

impl RenameConfig {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = normalize_extension(extension);
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: MonthVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn with_no_match(mut self, policy: NoMatchPolicy) -> Self {
        self.no_match = policy;
        self
    }

    pub fn with_collision(mut self, policy: CollisionPolicy) -> Self {
        self.collision = policy;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// ファイル名が対象拡張子で終わるか
    pub fn matches_extension(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.extension.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    }
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            vocabulary: MonthVocabulary::english(),
            sorted: false,
            no_match: NoMatchPolicy::default(),
            collision: CollisionPolicy::default(),
            on_error: ErrorPolicy::default(),
        }
    }
}

/// ".png" → "png"
fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_folders() {
        let config = RenameConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("split_images"));
        assert_eq!(config.output_dir, PathBuf::from("renamed_images"));
        assert_eq!(config.extension, "png");
        assert!(!config.sorted);
        assert_eq!(config.collision, CollisionPolicy::Overwrite);
        assert_eq!(config.no_match, NoMatchPolicy::Skip);
        assert_eq!(config.on_error, ErrorPolicy::Abort);
    }

    #[test]
    fn extension_filter_is_a_case_sensitive_suffix() {
        let config = RenameConfig::default();
        assert!(config.matches_extension("page1.png"));
        assert!(config.matches_extension(".png"));
        assert!(!config.matches_extension("page1.PNG"));
        assert!(!config.matches_extension("page1.jpg"));
        assert!(!config.matches_extension("page1png"));
        assert!(!config.matches_extension("notes.png.txt"));
    }

    #[test]
    fn leading_dot_is_dropped() {
        let config = RenameConfig::default().with_extension(".jpg");
        assert_eq!(config.extension, "jpg");
        assert!(config.matches_extension("scan.jpg"));
    }
}

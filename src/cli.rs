//! コマンドライン引数

use crate::config::{RenameConfig, DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR};
use crate::ocr::{OcrEngine, TesseractEngine};
use crate::parser::{MonthVocabulary, VocabularyError};
use crate::renamer::{CollisionPolicy, ErrorPolicy, NoMatchPolicy};
use crate::vision::VisionEngine;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// OCRエンジンの種類
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// ローカルの tesseract コマンド
    #[default]
    Tesseract,
    /// Google Cloud Vision API
    Vision,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ocr-date-renamer",
    version,
    about = "Copies images to MM-DD.png using the first \"Month Day\" date found by OCR"
)]
pub struct Cli {
    /// Folder containing the original images
    #[arg(long, value_name = "DIR", env = "RENAMER_SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub source: PathBuf,

    /// Folder receiving the renamed copies (created if missing)
    #[arg(long, value_name = "DIR", env = "RENAMER_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Image extension to process (case-sensitive)
    #[arg(long, value_name = "EXT", env = "RENAMER_EXTENSION", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Month name vocabulary entry, e.g. `Janvier=1`; replaces the English names
    #[arg(long = "month", value_name = "NAME=NUMBER")]
    pub months: Vec<String>,

    /// Process files in name order instead of directory order
    #[arg(long)]
    pub sorted: bool,

    /// What to do when two images produce the same name
    #[arg(long, value_enum, default_value_t = CollisionPolicy::Overwrite)]
    pub on_collision: CollisionPolicy,

    /// What to do when no date is found
    #[arg(long, value_enum, default_value_t = NoMatchPolicy::Skip)]
    pub on_no_match: NoMatchPolicy,

    /// Log per-file failures and continue instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// OCR backend
    #[arg(long, value_enum, env = "RENAMER_ENGINE", default_value_t = EngineKind::Tesseract)]
    pub engine: EngineKind,

    /// Path to the tesseract executable
    #[arg(long, value_name = "PATH", env = "TESSERACT_BIN", default_value = "tesseract")]
    pub tesseract_bin: PathBuf,

    /// Tesseract language
    #[arg(long, value_name = "LANG", default_value = "eng")]
    pub language: String,

    /// Service account JSON for the Vision API
    #[arg(long, value_name = "FILE", env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Vision API language hint
    #[arg(long = "language-hint", value_name = "CODE", default_values_t = vec!["en".to_string()])]
    pub language_hints: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 月名辞書を作成 (指定がなければ英語)
    pub fn vocabulary(&self) -> Result<MonthVocabulary, VocabularyError> {
        if self.months.is_empty() {
            return Ok(MonthVocabulary::english());
        }
        let pairs = self
            .months
            .iter()
            .map(|entry| MonthVocabulary::parse_entry(entry))
            .collect::<Result<Vec<_>, _>>()?;
        MonthVocabulary::from_pairs(pairs)
    }

    pub fn config(&self) -> Result<RenameConfig> {
        let vocabulary = self.vocabulary().context("月名の指定が不正です")?;
        let on_error = if self.keep_going {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::Abort
        };

        Ok(RenameConfig::new(&self.source, &self.output)
            .with_extension(&self.extension)
            .with_vocabulary(vocabulary)
            .sorted(self.sorted)
            .with_collision(self.on_collision)
            .with_no_match(self.on_no_match)
            .with_error_policy(on_error))
    }

    /// OCRエンジンを作成
    pub fn engine(&self) -> Result<Box<dyn OcrEngine>> {
        match self.engine {
            EngineKind::Tesseract => Ok(Box::new(TesseractEngine::new(
                &self.tesseract_bin,
                &self.language,
            ))),
            EngineKind::Vision => {
                let credentials = self.credentials.as_ref().context(
                    "Vision API には --credentials か GOOGLE_APPLICATION_CREDENTIALS が必要です",
                )?;
                let engine =
                    VisionEngine::from_credentials_file(credentials, self.language_hints.clone())
                        .context("Vision APIクライアントの初期化に失敗")?;
                Ok(Box::new(engine))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ocr-date-renamer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn custom_flags_flow_into_config() {
        let cli = parse(&[
            "--source",
            "in",
            "--output",
            "out",
            "--extension",
            ".jpg",
            "--sorted",
            "--on-collision",
            "suffix",
            "--on-no-match",
            "log",
            "--keep-going",
        ]);
        let config = cli.config().unwrap();
        assert_eq!(config.source_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.extension, "jpg");
        assert!(config.sorted);
        assert_eq!(config.collision, CollisionPolicy::Suffix);
        assert_eq!(config.no_match, NoMatchPolicy::Log);
        assert_eq!(config.on_error, ErrorPolicy::Continue);
    }

    #[test]
    fn month_flags_replace_english_vocabulary() {
        let cli = parse(&["--month", "Janvier=1", "--month", "Février=2"]);
        let vocabulary = cli.vocabulary().unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.month_of("Février"), Some(2));
        assert_eq!(vocabulary.month_of("January"), None);
    }

    #[test]
    fn malformed_month_flag_is_an_error() {
        let cli = parse(&["--month", "Janvier"]);
        assert!(cli.config().is_err());
    }

    #[test]
    fn vision_without_credentials_is_an_error() {
        let mut cli = parse(&[]);
        cli.engine = EngineKind::Vision;
        cli.credentials = None;
        let err = cli.engine().err().unwrap();
        assert!(err.to_string().contains("--credentials"));
    }

    #[test]
    fn tesseract_engine_is_built_without_probing() {
        let mut cli = parse(&["--tesseract-bin", "/opt/ocr/tesseract"]);
        cli.engine = EngineKind::Tesseract;
        let engine = cli.engine().unwrap();
        assert_eq!(engine.name(), "tesseract");
    }
}

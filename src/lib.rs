//! OCR日付リネーマー - 画像内の日付でファイルをコピー・リネームするツール
//!
//! # 機能
//! - フォルダ内の画像からOCRでテキスト抽出 (Tesseract / Google Vision API)
//! - "March 7" のような英語の月名 + 日を認識
//! - `MM-DD.png` の名前で出力フォルダにコピー (元のファイルはそのまま)

pub mod cli;
pub mod config;
pub mod error;
pub mod ocr;
pub mod parser;
pub mod renamer;
pub mod vision;

pub use config::RenameConfig;
pub use error::RenameError;
pub use ocr::{OcrEngine, OcrError, TesseractEngine};
pub use parser::{DateExtractor, DateToken, MonthVocabulary};
pub use renamer::{CollisionPolicy, ErrorPolicy, NoMatchPolicy, RenameReport, Renamer};

//! OCRモジュール - 画像からのテキスト抽出

mod tesseract;

pub use tesseract::TesseractEngine;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// OCR処理のエラー
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("{engine} を起動できません: {source}")]
    Unavailable {
        engine: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("画像ファイルの読み込みに失敗: {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{engine} がテキスト抽出に失敗: {message}")]
    Backend {
        engine: &'static str,
        message: String,
    },
}

/// 画像 → テキスト の抽出エンジン
///
/// 結果の精度は検証しない。前処理もしない。
pub trait OcrEngine {
    /// エンジン名 (ログ用)
    fn name(&self) -> &'static str;

    /// 画像からテキストを抽出
    fn extract_text(&self, image_path: &Path) -> Result<String, OcrError>;
}

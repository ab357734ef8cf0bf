//! パイプラインのエラー型

use crate::ocr::OcrError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = RenameError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("出力フォルダの作成に失敗: {path:?}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("入力フォルダの読み込みに失敗: {path:?}")]
    ReadSourceDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("テキスト抽出エラー ({file})")]
    Ocr {
        file: String,
        #[source]
        source: OcrError,
    },

    #[error("コピーに失敗: {from:?} → {to:?}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("コンソール出力に失敗")]
    Console(#[source] std::io::Error),
}

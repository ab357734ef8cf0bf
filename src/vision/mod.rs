//! Google Cloud Vision API によるテキスト抽出

mod auth;
mod client;

pub use auth::{load_credentials, ServiceAccountCredentials};
pub use client::VisionClient;

use crate::ocr::{OcrEngine, OcrError};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::runtime::Runtime;

const ENGINE_NAME: &str = "vision";

/// 非同期の VisionClient を同期の `OcrEngine` として使うラッパー
pub struct VisionEngine {
    client: VisionClient,
    runtime: Runtime,
}

impl VisionEngine {
    /// 認証ファイルからエンジンを作成
    pub fn from_credentials_file(
        credentials_path: impl AsRef<Path>,
        language_hints: Vec<String>,
    ) -> Result<Self> {
        let credentials = load_credentials(credentials_path)?;
        Self::new(VisionClient::new(credentials, language_hints))
    }

    pub fn new(client: VisionClient) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Tokioランタイムの作成に失敗")?;
        Ok(Self { client, runtime })
    }
}

impl OcrEngine for VisionEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn extract_text(&self, image_path: &Path) -> Result<String, OcrError> {
        let image_data = std::fs::read(image_path).map_err(|source| OcrError::Io {
            path: image_path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Vision API 送信: {:?} ({} bytes)", image_path, image_data.len());

        self.runtime
            .block_on(self.client.extract_text(&image_data))
            .map_err(|e| OcrError::Backend {
                engine: ENGINE_NAME,
                message: format!("{:#}", e),
            })
    }
}

//! Vision API クライアント

use super::auth::{get_access_token, ServiceAccountCredentials};
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

const VISION_API_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Vision APIクライアント
pub struct VisionClient {
    credentials: ServiceAccountCredentials,
    language_hints: Vec<String>,
    access_token: Arc<RwLock<Option<String>>>,
    http_client: reqwest::Client,
}

impl VisionClient {
    /// 新しいクライアントを作成
    pub fn new(credentials: ServiceAccountCredentials, language_hints: Vec<String>) -> Self {
        Self {
            credentials,
            language_hints,
            access_token: Arc::new(RwLock::new(None)),
            http_client: reqwest::Client::new(),
        }
    }

    /// アクセストークンを取得（キャッシュあり）
    async fn get_token(&self) -> Result<String> {
        // キャッシュされたトークンがあれば使用
        {
            let token = self.access_token.read().await;
            if let Some(ref t) = *token {
                return Ok(t.clone());
            }
        }

        // 新しいトークンを取得
        let new_token = get_access_token(&self.http_client, &self.credentials).await?;

        // キャッシュに保存
        {
            let mut token = self.access_token.write().await;
            *token = Some(new_token.clone());
        }

        Ok(new_token)
    }

    /// 画像バイト列からテキストを抽出
    pub async fn extract_text(&self, image_data: &[u8]) -> Result<String> {
        let request = build_request(image_data, &self.language_hints);

        let token = self.get_token().await?;

        let response = self
            .http_client
            .post(VISION_API_URL)
            .bearer_auth(&token)
            .json(&request)
            .send()
            .await
            .context("Vision APIリクエストに失敗")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Vision API エラー: {}", error_text);
        }

        let vision_response: VisionResponse = response
            .json()
            .await
            .context("Vision APIレスポンスのパースに失敗")?;

        Ok(full_text(vision_response))
    }
}

fn build_request(image_data: &[u8], language_hints: &[String]) -> VisionRequest {
    VisionRequest {
        requests: vec![AnnotateImageRequest {
            image: Image {
                content: STANDARD.encode(image_data),
            },
            features: vec![Feature {
                feature_type: "DOCUMENT_TEXT_DETECTION".to_string(),
                max_results: 1,
            }],
            image_context: (!language_hints.is_empty()).then(|| ImageContext {
                language_hints: language_hints.to_vec(),
            }),
        }],
    }
}

/// レスポンスからテキストを抽出（テキストなしは空文字列）
fn full_text(response: VisionResponse) -> String {
    response
        .responses
        .into_iter()
        .next()
        .and_then(|r| r.full_text_annotation)
        .map(|a| a.text)
        .unwrap_or_default()
}

// Vision API リクエスト/レスポンス構造体

#[derive(Serialize)]
struct VisionRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize)]
struct AnnotateImageRequest {
    image: Image,
    features: Vec<Feature>,
    #[serde(rename = "imageContext", skip_serializing_if = "Option::is_none")]
    image_context: Option<ImageContext>,
}

#[derive(Serialize)]
struct Image {
    content: String,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: String,
    #[serde(rename = "maxResults")]
    max_results: i32,
}

#[derive(Serialize)]
struct ImageContext {
    #[serde(rename = "languageHints")]
    language_hints: Vec<String>,
}

#[derive(Deserialize)]
struct VisionResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize)]
struct AnnotateImageResponse {
    #[serde(rename = "fullTextAnnotation")]
    full_text_annotation: Option<TextAnnotation>,
}

#[derive(Deserialize)]
struct TextAnnotation {
    text: String,
}

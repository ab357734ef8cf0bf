//! Tesseract CLI によるテキスト抽出

use super::{OcrEngine, OcrError};
use std::path::{Path, PathBuf};
use std::process::Command;

const ENGINE_NAME: &str = "tesseract";

/// `tesseract <画像> stdout -l <言語>` を実行するエンジン
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
    language: String,
}

impl TesseractEngine {
    pub fn new(binary: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new(ENGINE_NAME, "eng")
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn extract_text(&self, image_path: &Path) -> Result<String, OcrError> {
        tracing::debug!("tesseract 実行: {:?} ({})", image_path, self.language);

        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|source| OcrError::Unavailable {
                engine: ENGINE_NAME,
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Backend {
                engine: ENGINE_NAME,
                message: format!("{} ({})", stderr.trim(), output.status),
            });
        }

        Ok(clean_stdout(&output.stdout))
    }
}

/// tesseract の出力末尾に付く改ページ (\x0c) を除去
fn clean_stdout(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .trim_end_matches(['\x0c', '\n', '\r'])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_form_feed() {
        let raw = b"Meeting notes\nMarch 7\n\n\x0c";
        assert_eq!(clean_stdout(raw), "Meeting notes\nMarch 7");
    }

    #[test]
    fn keeps_inner_text_untouched() {
        let raw = b"  indented\n\nMarch 7 ";
        assert_eq!(clean_stdout(raw), "  indented\n\nMarch 7 ");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let raw = b"March 7 \xff";
        assert_eq!(clean_stdout(raw), "March 7 \u{fffd}");
    }

    #[test]
    fn missing_binary_is_unavailable() {
        let engine = TesseractEngine::new("/nonexistent/bin/tesseract-not-here", "eng");
        let err = engine.extract_text(Path::new("page1.png")).unwrap_err();
        assert!(matches!(err, OcrError::Unavailable { engine: "tesseract", .. }));
    }

    #[test]
    fn defaults_to_english_on_path() {
        let engine = TesseractEngine::default();
        assert_eq!(engine.binary(), Path::new("tesseract"));
        assert_eq!(engine.language(), "eng");
        assert_eq!(engine.name(), "tesseract");
    }
}

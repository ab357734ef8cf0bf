//! バッチリネーム処理
//!
//! 入力フォルダの画像を列挙し、OCRテキストから月日を読み取って
//! `出力フォルダ/MM-DD.png` にコピーする。元のファイルには触れない。

mod policy;

pub use policy::{CollisionPolicy, ErrorPolicy, NoMatchPolicy};

use crate::config::RenameConfig;
use crate::error::{RenameError, Result};
use crate::ocr::OcrEngine;
use crate::parser::{DateExtractor, DateToken, VocabularyError};
use policy::Placement;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// コピー結果 (元のファイル名 → 新しいファイル名)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRecord {
    pub original: String,
    pub renamed: String,
    pub date: DateToken,
}

/// 出力ファイル名の衝突
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub original: String,
    pub file_name: String,
    /// このファイルをコピーしたか (Skip ポリシーでは false)
    pub written: bool,
}

/// `ErrorPolicy::Continue` で読み飛ばしたファイル
#[derive(Debug)]
pub struct FailedFile {
    pub file: String,
    pub error: RenameError,
}

/// 1回の実行結果
#[derive(Debug, Default)]
pub struct RenameReport {
    pub copied: Vec<CopyRecord>,
    /// 日付が見つからなかったファイル
    pub skipped: Vec<String>,
    pub collisions: Vec<Collision>,
    pub failed: Vec<FailedFile>,
}

impl RenameReport {
    /// 処理したファイル数
    pub fn processed(&self) -> usize {
        let kept = self.collisions.iter().filter(|c| !c.written).count();
        self.copied.len() + self.skipped.len() + self.failed.len() + kept
    }
}

enum Outcome {
    Copied {
        record: CopyRecord,
        collision: Option<Collision>,
    },
    NoDate,
    Kept(Collision),
}

/// バッチリネーマー
pub struct Renamer {
    config: RenameConfig,
    extractor: DateExtractor,
}

impl Renamer {
    pub fn new(config: RenameConfig) -> std::result::Result<Self, VocabularyError> {
        let extractor = DateExtractor::new(&config.vocabulary)?;
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &RenameConfig {
        &self.config
    }

    /// 対象ファイル名を列挙
    ///
    /// 順序はファイルシステムが返す順。`sorted` の場合のみ名前順に並べる。
    pub fn scan(&self) -> Result<Vec<String>> {
        let source_dir = &self.config.source_dir;
        let read_err = |source| RenameError::ReadSourceDir {
            path: source_dir.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(source_dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let Ok(name) = entry.file_name().into_string() else {
                debug!("UTF-8 でないファイル名を無視: {:?}", entry.path());
                continue;
            };
            if !self.config.matches_extension(&name) || !entry.path().is_file() {
                continue;
            }
            files.push(name);
        }

        if self.config.sorted {
            files.sort();
        }

        Ok(files)
    }

    /// 全ファイルを処理し、コピーごとに `out` へ1行出力
    pub fn run<E, W>(&self, engine: &E, out: &mut W) -> Result<RenameReport>
    where
        E: OcrEngine + ?Sized,
        W: Write,
    {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|source| RenameError::CreateOutputDir {
            path: output_dir.clone(),
            source,
        })?;

        let files = self.scan()?;
        info!(
            "{} 個のファイルを処理中... ({:?} → {:?}, engine: {})",
            files.len(),
            self.config.source_dir,
            output_dir,
            engine.name()
        );

        let mut report = RenameReport::default();
        let mut produced: HashSet<String> = HashSet::new();

        for name in files {
            match self.process_file(engine, &name, &mut produced) {
                Ok(Outcome::Copied { record, collision }) => {
                    writeln!(out, "Copied: {} → {}", record.original, record.renamed)
                        .map_err(RenameError::Console)?;
                    report.copied.push(record);
                    report.collisions.extend(collision);
                }
                Ok(Outcome::NoDate) => {
                    if self.config.no_match == NoMatchPolicy::Log {
                        info!("日付が見つかりません: {}", name);
                    }
                    report.skipped.push(name);
                }
                Ok(Outcome::Kept(collision)) => {
                    info!(
                        "{} は出力済みのため {} をスキップ",
                        collision.file_name, collision.original
                    );
                    report.collisions.push(collision);
                }
                Err(e) if self.config.on_error == ErrorPolicy::Continue => {
                    error!("{}: {}", name, error_chain(&e));
                    report.failed.push(FailedFile {
                        file: name,
                        error: e,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(
            out,
            "Renaming complete! Check the '{}' folder.",
            output_dir.display()
        )
        .map_err(RenameError::Console)?;

        info!(
            "完了: {} 件コピー, {} 件日付なし, {} 件失敗",
            report.copied.len(),
            report.skipped.len(),
            report.failed.len()
        );

        Ok(report)
    }

    /// 単一の画像ファイルを処理
    fn process_file<E>(
        &self,
        engine: &E,
        name: &str,
        produced: &mut HashSet<String>,
    ) -> Result<Outcome>
    where
        E: OcrEngine + ?Sized,
    {
        let image_path = self.config.source_dir.join(name);

        // テキスト抽出
        let text = engine
            .extract_text(&image_path)
            .map_err(|source| RenameError::Ocr {
                file: name.to_string(),
                source,
            })?;
        debug!("{}: {} 文字を抽出", name, text.chars().count());

        // 日付解析
        let Some(date) = self.extractor.extract(&text) else {
            return Ok(Outcome::NoDate);
        };
        let target = date.file_name(&self.config.extension);

        let (file_name, collided) = match self.config.collision.place(&target, produced) {
            Placement::Write {
                file_name,
                collided,
            } => (file_name, collided),
            Placement::Keep => {
                return Ok(Outcome::Kept(Collision {
                    original: name.to_string(),
                    file_name: target,
                    written: false,
                }));
            }
        };

        if collided && self.config.collision == CollisionPolicy::Warn {
            warn!("{} を上書きします ({})", file_name, name);
        }

        // ファイルをコピー
        let new_path: PathBuf = self.config.output_dir.join(&file_name);
        std::fs::copy(&image_path, &new_path).map_err(|source| RenameError::Copy {
            from: image_path,
            to: new_path,
            source,
        })?;
        produced.insert(file_name.clone());

        let collision = collided.then(|| Collision {
            original: name.to_string(),
            file_name: target,
            written: true,
        });

        Ok(Outcome::Copied {
            record: CopyRecord {
                original: name.to_string(),
                renamed: file_name,
                date,
            },
            collision,
        })
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

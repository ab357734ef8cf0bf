//! OCR日付リネーマー - メインエントリポイント

use anyhow::{Context, Result};
use clap::Parser;
use ocr_date_renamer::cli::Cli;
use ocr_date_renamer::Renamer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 環境変数の読み込み
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // ロギング初期化 (RUST_LOG 優先)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let renamer = Renamer::new(cli.config()?).context("月名パターンの作成に失敗")?;
    let engine = cli.engine()?;

    let stdout = std::io::stdout();
    let report = renamer.run(&*engine, &mut stdout.lock())?;

    tracing::info!(
        "{} 件処理しました (出力先: {:?})",
        report.processed(),
        renamer.config().output_dir
    );

    if !report.failed.is_empty() {
        tracing::warn!("{} 件のファイルが処理できませんでした", report.failed.len());
    }

    Ok(())
}

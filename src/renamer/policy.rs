//! 判断ポイントごとのポリシー

use std::collections::HashSet;
use std::path::Path;

/// 日付が見つからなかったファイルの扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum NoMatchPolicy {
    /// 何もせず次へ
    #[default]
    Skip,
    /// info ログを出して次へ
    Log,
}

/// 同じ実行内で出力ファイル名が重複した場合の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CollisionPolicy {
    /// 黙って上書き (最後のファイルが残る)
    #[default]
    Overwrite,
    /// 警告を出して上書き
    Warn,
    /// 先に出力したファイルを残す
    Skip,
    /// 連番を付与 (MM-DD_1.png)
    Suffix,
}

/// 1ファイルの処理でエラーが起きた場合の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorPolicy {
    /// バッチ全体を中断
    #[default]
    Abort,
    /// エラーログを出して次のファイルへ
    Continue,
}

/// 衝突ポリシーの判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Placement {
    /// このファイル名で書き込む
    Write { file_name: String, collided: bool },
    /// 書き込まない
    Keep,
}

impl CollisionPolicy {
    /// 今回の実行で出力済みのファイル名を踏まえて出力先を決める
    pub(crate) fn place(self, file_name: &str, produced: &HashSet<String>) -> Placement {
        if !produced.contains(file_name) {
            return Placement::Write {
                file_name: file_name.to_string(),
                collided: false,
            };
        }

        match self {
            CollisionPolicy::Overwrite | CollisionPolicy::Warn => Placement::Write {
                file_name: file_name.to_string(),
                collided: true,
            },
            CollisionPolicy::Skip => Placement::Keep,
            CollisionPolicy::Suffix => Placement::Write {
                file_name: get_unique_filename(produced, file_name),
                collided: true,
            },
        }
    }
}

/// ユニークなファイル名を取得（同名ファイルがある場合は連番を付与）
fn get_unique_filename(produced: &HashSet<String>, filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(filename);
    let ext = path.extension().and_then(|s| s.to_str());

    let mut final_name = filename.to_string();
    let mut counter = 1;

    while produced.contains(&final_name) {
        final_name = match ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        counter += 1;
    }

    final_name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produced(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn fresh_name_is_written_by_every_policy() {
        for policy in [
            CollisionPolicy::Overwrite,
            CollisionPolicy::Warn,
            CollisionPolicy::Skip,
            CollisionPolicy::Suffix,
        ] {
            assert_eq!(
                policy.place("03-07.png", &produced(&["12-25.png"])),
                Placement::Write {
                    file_name: "03-07.png".to_string(),
                    collided: false
                }
            );
        }
    }

    #[test]
    fn overwrite_reuses_the_name() {
        assert_eq!(
            CollisionPolicy::Overwrite.place("12-25.png", &produced(&["12-25.png"])),
            Placement::Write {
                file_name: "12-25.png".to_string(),
                collided: true
            }
        );
    }

    #[test]
    fn skip_keeps_the_first_copy() {
        assert_eq!(
            CollisionPolicy::Skip.place("12-25.png", &produced(&["12-25.png"])),
            Placement::Keep
        );
    }

    #[test]
    fn suffix_counts_up_past_taken_names() {
        let taken = produced(&["12-25.png", "12-25_1.png"]);
        assert_eq!(
            CollisionPolicy::Suffix.place("12-25.png", &taken),
            Placement::Write {
                file_name: "12-25_2.png".to_string(),
                collided: true
            }
        );
    }
}

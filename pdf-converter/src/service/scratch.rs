// pdf-converter/src/service/scratch.rs

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// リクエスト単位の一時ファイルパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// 変換用の一時ファイルを置くディレクトリ
///
/// ファイル名はリクエストIDで名前空間を分けるため、同時リクエスト間で衝突しない。
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// ディレクトリが存在しなければ作成する
    pub async fn ensure(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    pub fn paths_for(&self, request_id: &Uuid) -> ScratchPaths {
        ScratchPaths {
            input: self.root.join(format!("{}_input.pdf", request_id)),
            output: self.root.join(format!("{}_output.docx", request_id)),
        }
    }

    /// ベストエフォートで削除する。失敗はログに残すだけで呼び出し元には返さない。
    pub async fn remove_files(&self, paths: &[&Path]) {
        for path in paths {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!(path = %path.display(), "Cleaned up scratch file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to clean up scratch file"
                ),
            }
        }
    }

    /// ディレクトリ内の全ファイルを削除する（シャットダウン時）
    ///
    /// 削除できたファイル数を返す。
    pub async fn purge(&self) -> usize {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return 0,
            Err(e) => {
                warn!(
                    dir = %self.root.display(),
                    error = %e,
                    "Error during scratch cleanup"
                );
                return 0;
            }
        };

        let mut removed = 0;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Error while listing scratch directory");
                    break;
                }
            };

            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to remove scratch file"
                ),
            }
        }

        info!(
            dir = %self.root.display(),
            removed = removed,
            "Cleaned up all temporary files"
        );
        removed
    }
}

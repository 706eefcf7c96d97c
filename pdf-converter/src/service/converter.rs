// pdf-converter/src/service/converter.rs

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// 変換対象のページ範囲（0始まり、endは排他的）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRange {
    pub start: u32,
    pub end: Option<u32>,
}

impl PageRange {
    pub fn new(start: u32, end: Option<u32>) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        match self.end {
            Some(end) => end > self.start,
            None => true,
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}..{}", self.start, end),
            None => write!(f, "{}..", self.start),
        }
    }
}

/// 外部コンバーターのエラー
///
/// 表示文字列はエラー分類（パスワード保護・破損判定）にそのまま使われる。
#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("failed to start converter: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("converter exited with {status}: {message}")]
    Failed { status: String, message: String },
}

/// PDF→DOCX変換器のトレイト定義
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// `input` のPDFを変換し `output` にDOCXを書き出す
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        pages: PageRange,
    ) -> Result<(), ConverterError>;
}

/// 外部コマンド（pdf2docx CLI）を実行する変換器
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    leading_args: Vec<String>,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// `"python3 -m pdf2docx"` のような空白区切りのコマンドラインから作成
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            leading_args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `<leading args> convert <input> <output> --start=N [--end=M]`
    fn build_args(&self, input: &Path, output: &Path, pages: PageRange) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.extend([
            "convert".to_string(),
            input.display().to_string(),
            output.display().to_string(),
            format!("--start={}", pages.start),
        ]);
        if let Some(end) = pages.end {
            args.push(format!("--end={}", end));
        }
        args
    }
}

#[async_trait]
impl DocumentConverter for CommandConverter {
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        pages: PageRange,
    ) -> Result<(), ConverterError> {
        let args = self.build_args(input, output, pages);
        debug!(program = %self.program, args = ?args, "Running converter");

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        if !result.status.success() {
            return Err(ConverterError::Failed {
                status: describe_status(result.status),
                message: failure_text(&result.stderr, &result.stdout),
            });
        }

        // pdf2docxは変換中の例外をログに出すだけで終了コード0を返す
        if !tokio::fs::try_exists(output).await.unwrap_or(false) {
            if let Some(message) = captured_text(&result.stderr, &result.stdout) {
                return Err(ConverterError::Failed {
                    status: describe_status(result.status),
                    message,
                });
            }
        }

        info!(
            input = %input.display(),
            output = %output.display(),
            pages = %pages,
            "Converter finished"
        );
        Ok(())
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "signal".to_string(),
    }
}

// stderrが空の場合はstdoutを使う（pdf2docxはエラーをstdoutに出すことがある）
fn captured_text(stderr: &[u8], stdout: &[u8]) -> Option<String> {
    [stderr, stdout].into_iter().find_map(|bytes| {
        let text = String::from_utf8_lossy(bytes);
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    })
}

fn failure_text(stderr: &[u8], stdout: &[u8]) -> String {
    captured_text(stderr, stdout).unwrap_or_else(|| "no output from converter".to_string())
}

// tests/common/mock_converter.rs

use async_trait::async_trait;
use pdf_converter::service::converter::{ConverterError, DocumentConverter, PageRange};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// モックが生成するDOCXの中身
pub const MOCK_DOCX_BYTES: &[u8] = b"PK\x03\x04mock-docx";

#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// 出力ファイルを書き出して成功
    Succeed,
    /// 成功を返すが出力ファイルを作らない
    NoOutput,
    /// 指定メッセージで失敗
    Fail(String),
}

/// 変換呼び出しの記録
#[derive(Debug, Clone)]
pub struct ConvertCall {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_bytes: Vec<u8>,
    pub pages: PageRange,
}

/// テスト用のモックコンバーター
pub struct MockConverter {
    behavior: MockBehavior,
    delay: Option<Duration>,
    calls: Mutex<Vec<ConvertCall>>,
}

impl MockConverter {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<ConvertCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentConverter for MockConverter {
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        pages: PageRange,
    ) -> Result<(), ConverterError> {
        let input_bytes = tokio::fs::read(input).await?;
        self.calls.lock().unwrap().push(ConvertCall {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            input_bytes,
            pages,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            MockBehavior::Succeed => {
                tokio::fs::write(output, MOCK_DOCX_BYTES).await?;
                Ok(())
            }
            MockBehavior::NoOutput => Ok(()),
            MockBehavior::Fail(message) => Err(ConverterError::Failed {
                status: "exit code 1".to_string(),
                message: message.clone(),
            }),
        }
    }
}

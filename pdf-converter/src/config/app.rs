// pdf-converter/src/config/app.rs

use std::env;
use std::path::PathBuf;

/// アップロードサイズのデフォルト上限 (50MB)
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// 変換に使用する外部コマンドのデフォルト（空白区切りで引数も指定可能）
pub const DEFAULT_CONVERTER_COMMAND: &str = "pdf2docx";

/// スクラッチディレクトリ名（プロセスの一時ディレクトリ配下）
pub const SCRATCH_DIR_NAME: &str = "pdf_converter";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub max_upload_size: usize,
}

#[derive(Clone, Debug)]
pub struct ConverterConfig {
    pub command: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub scratch_dir: PathBuf,
    pub server: ServerConfig,
    pub converter: ConverterConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| "Invalid PORT value")?,
            cors_allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
            scratch_dir: env::var("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_scratch_dir()),
            server: ServerConfig {
                max_upload_size: match env::var("MAX_UPLOAD_SIZE_BYTES") {
                    Ok(value) => value
                        .parse()
                        .map_err(|_| "Invalid MAX_UPLOAD_SIZE_BYTES value")?,
                    Err(_) => DEFAULT_MAX_UPLOAD_SIZE,
                },
            },
            converter: ConverterConfig {
                command: env::var("CONVERTER_COMMAND")
                    .unwrap_or_else(|_| DEFAULT_CONVERTER_COMMAND.to_string()),
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_test(&self) -> bool {
        self.environment == "test"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// テスト用の設定を作成
    pub fn for_testing() -> Self {
        Self {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
            scratch_dir: default_scratch_dir(),
            server: ServerConfig {
                max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            },
            converter: ConverterConfig {
                command: DEFAULT_CONVERTER_COMMAND.to_string(),
            },
        }
    }
}

pub fn default_scratch_dir() -> PathBuf {
    env::temp_dir().join(SCRATCH_DIR_NAME)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// 設定ファイル管理
//
// 生成設定（YAML形式）の構造体定義と検証を行います。
// ファイルI/Oは services::config_loader に集約し、ここは純粋な構造体に保ちます。

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

/// プロジェクト設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 設定ファイルのバージョン
    pub version: String,

    /// データベース接続設定
    pub database: DatabaseConfig,

    /// 出力設定
    pub output: OutputConfig,

    /// 生成後に実行するフォーマッタ（空ならスキップ）
    #[serde(default = "default_formatter")]
    pub formatter: Vec<String>,

    /// 型の上書きテーブル（PostgreSQL型名 -> Go型）
    #[serde(default)]
    pub type_map: BTreeMap<String, String>,

    /// インポート要求テーブル（Go型 -> インポートパス）
    #[serde(default)]
    pub type_imports: BTreeMap<String, String>,

    /// 生成対象のルーチン名（`schema.name` または `name`）
    #[serde(default)]
    pub functions: Vec<String>,
}

fn default_formatter() -> Vec<String> {
    vec!["gofmt".to_string(), "-w".to_string()]
}

impl Config {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = crate::core::naming::CONFIG_FILE;

    /// 設定の妥当性を検証
    pub fn validate(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(anyhow!("Config file version is not specified"));
        }

        self.database
            .validate()
            .with_context(|| "Invalid database config")?;
        self.output
            .validate()
            .with_context(|| "Invalid output config")?;

        for (pg_type, go_type) in &self.type_map {
            if go_type.trim().is_empty() {
                return Err(anyhow!("type_map entry '{}' has an empty Go type", pg_type));
            }
        }

        Ok(())
    }
}

/// std::str::FromStrトレイトの実装
impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        serde_saphyr::from_str(yaml).with_context(|| "Failed to parse config file")
    }
}

/// SSL接続モード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    Disable,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl std::fmt::Display for SslMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SslMode::Disable => write!(f, "disable"),
            SslMode::Prefer => write!(f, "prefer"),
            SslMode::Require => write!(f, "require"),
            SslMode::VerifyCa => write!(f, "verify-ca"),
            SslMode::VerifyFull => write!(f, "verify-full"),
        }
    }
}

/// データベース接続設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// ホスト名
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号
    #[serde(default = "default_port")]
    pub port: u16,

    /// データベース名
    pub database: String,

    /// ユーザー名
    pub user: Option<String>,

    /// パスワード
    pub password: Option<String>,

    /// 接続タイムアウト（秒）
    pub timeout: Option<u64>,

    /// SSL接続モード
    pub ssl_mode: Option<SslMode>,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

impl DatabaseConfig {
    /// Validate database configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.is_empty() {
            return Err(anyhow!("Database name is not specified"));
        }
        Ok(())
    }
}

/// 生成コードがDB接続を取得する方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStyle {
    /// パッケージ内のアクセサ関数（既定: `getDB()`）を呼ぶ
    #[default]
    Accessor,
    /// 第1引数に `db *sqlx.DB` を受け取る
    Parameter,
}

/// 識別子配列を配列リテラルへ変換する外部ヘルパー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayHelperConfig {
    /// ヘルパーのインポートパス
    pub import: String,
    /// パッケージ修飾付きの関数名（例: `pgfuncs.UUIDSliceToPgString`）
    pub function: String,
}

/// 出力設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 出力先のGoファイル
    pub file: PathBuf,

    /// Goパッケージ名
    pub package: String,

    /// 引数定義構造体（command.ArgsDef）を出力するか
    #[serde(default)]
    pub args_def: bool,

    /// DB接続の取得方法
    #[serde(default)]
    pub connection: ConnectionStyle,

    /// アクセサ関数名
    #[serde(default = "default_db_accessor")]
    pub db_accessor: String,

    /// 外部の配列ヘルパー（未指定なら生成ファイル内にヘルパーを出力）
    #[serde(default)]
    pub array_helper: Option<ArrayHelperConfig>,
}

fn default_db_accessor() -> String {
    "getDB".to_string()
}

impl OutputConfig {
    /// Validate output configuration
    pub fn validate(&self) -> Result<()> {
        if self.file.as_os_str().is_empty() {
            return Err(anyhow!("Output file is not specified"));
        }
        if self.package.is_empty() {
            return Err(anyhow!("Output package is not specified"));
        }
        if self.connection == ConnectionStyle::Accessor && self.db_accessor.is_empty() {
            return Err(anyhow!("db_accessor must not be empty"));
        }
        Ok(())
    }
}

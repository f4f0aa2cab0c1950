// initコマンドハンドラー
//
// 雛形の設定ファイル（.pgfuncgen.yaml）を生成します。

use crate::core::config::Config;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 雛形の設定ファイル
pub const CONFIG_TEMPLATE: &str = r#"version: "1.0"

database:
  host: localhost
  port: 5432
  database: app
  user: postgres
  # password は DB_PASSWORD 環境変数でも指定できます
  timeout: 30

output:
  file: db/functions.go
  package: db
  args_def: false
  # accessor: getDB() を呼ぶ / parameter: 第1引数に db *sqlx.DB を受け取る
  connection: accessor
  db_accessor: getDB

formatter: ["gofmt", "-w"]

# PostgreSQL型名 -> Go型
type_map: {}

# Go型 -> インポートパス
type_imports: {}

# 生成するルーチン（schema.name または name）
functions: []
"#;

/// initコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct InitCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 書き込み先（未指定なら既定の設定ファイル）
    pub config_path: Option<PathBuf>,
    /// 既存の設定を上書き
    pub force: bool,
}

/// initコマンドハンドラー
#[derive(Debug, Default)]
pub struct InitCommandHandler {}

impl InitCommandHandler {
    /// 新しいInitCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// initコマンドを実行
    pub fn execute(&self, command: &InitCommand) -> Result<String> {
        let config_path = self.config_path(command);

        if config_path.exists() && !command.force {
            return Err(anyhow!(
                "Config file already exists: {:?}. Use --force option to overwrite it.",
                config_path
            ));
        }

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        fs::write(&config_path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        debug!(path = %config_path.display(), "Wrote config template");

        Ok(format!("Created {}", config_path.display()))
    }

    fn config_path(&self, command: &InitCommand) -> PathBuf {
        match &command.config_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => command.project_path.join(path),
            None => command.project_path.join(Config::DEFAULT_CONFIG_PATH),
        }
    }

    /// 設定ファイルが既に存在するか
    pub fn is_already_initialized(&self, project_path: &Path) -> bool {
        project_path.join(Config::DEFAULT_CONFIG_PATH).exists()
    }
}

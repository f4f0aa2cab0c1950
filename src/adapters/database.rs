// データベース接続アダプター
//
// SQLxを使用したPostgreSQL接続プールの管理を行います。

use crate::adapters::connection_string::build_connection_string;
use crate::core::config::DatabaseConfig;
use crate::core::error::DatabaseError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::debug;

/// 既定の接続取得タイムアウト（秒）
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// データベース接続サービス
///
/// カタログ問い合わせ用の接続プールを初期化します。
#[derive(Debug, Clone, Default)]
pub struct DatabaseConnectionService;

impl DatabaseConnectionService {
    /// 新しいDatabaseConnectionServiceを作成
    pub fn new() -> Self {
        Self
    }

    /// 接続プールを作成
    ///
    /// `url` が指定されていれば設定より優先する。
    pub async fn create_pool(
        &self,
        config: &DatabaseConfig,
        url: Option<&str>,
    ) -> Result<PgPool, DatabaseError> {
        let connection_string = match url {
            Some(url) => url.to_string(),
            None => build_connection_string(config),
        };

        debug!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connecting to database"
        );

        self.create_pool_options(config.timeout)
            .connect(&connection_string)
            .await
            .map_err(|e| DatabaseError::Connection {
                message: format!("Failed to connect to database '{}'", config.database),
                cause: e.to_string(),
            })
    }

    /// プールオプションを作成
    ///
    /// 生成処理は逐次問い合わせのみなので接続数は少数に抑える。
    pub fn create_pool_options(&self, timeout_secs: Option<u64>) -> PgPoolOptions {
        let timeout = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(timeout))
    }

    /// 接続プールを閉じる
    pub async fn close_pool(&self, pool: PgPool) {
        pool.close().await;
    }
}

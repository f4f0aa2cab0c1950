// 接続文字列ビルダー
//
// DatabaseConfig からPostgreSQLの接続文字列を生成する。

use crate::core::config::DatabaseConfig;

/// 接続文字列を生成
pub fn build_connection_string(config: &DatabaseConfig) -> String {
    let user = config.user.as_deref().unwrap_or("postgres");
    let auth = match config.password.as_deref() {
        Some(password) if !password.is_empty() => format!("{}:{}", user, password),
        _ => user.to_string(),
    };
    let mut url = format!(
        "postgresql://{}@{}:{}/{}",
        auth, config.host, config.port, config.database
    );
    if let Some(ssl_mode) = &config.ssl_mode {
        url.push_str(&format!("?sslmode={}", ssl_mode));
    }
    url
}

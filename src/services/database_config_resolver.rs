// データベース設定の解決サービス
//
// 環境変数による上書きをサービス層で扱い、coreは純粋な構造体に保つ。

use crate::core::config::DatabaseConfig;

/// 接続URLを丸ごと指定する環境変数
pub const DATABASE_URL_ENV: &str = "PGFUNCGEN_DATABASE_URL";

/// 解決済みの接続先
#[derive(Debug, Clone)]
pub struct ResolvedDatabase {
    pub config: DatabaseConfig,
    /// 設定より優先する接続URL
    pub url: Option<String>,
}

/// データベース設定の解決ユーティリティ
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfigResolver;

impl DatabaseConfigResolver {
    /// 環境変数による上書きを適用
    pub fn apply_env_overrides(base: &DatabaseConfig) -> DatabaseConfig {
        Self::apply_overrides(base, |key| std::env::var(key).ok())
    }

    /// 接続URLを含めて解決
    pub fn resolve(base: &DatabaseConfig) -> ResolvedDatabase {
        Self::resolve_with(base, |key| std::env::var(key).ok())
    }

    /// 任意の変数ソースで解決
    pub fn resolve_with<F>(base: &DatabaseConfig, lookup: F) -> ResolvedDatabase
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(DATABASE_URL_ENV).filter(|url| !url.is_empty());
        ResolvedDatabase {
            config: Self::apply_overrides(base, lookup),
            url,
        }
    }

    fn apply_overrides<F>(base: &DatabaseConfig, lookup: F) -> DatabaseConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = base.clone();

        if let Some(host) = lookup("DB_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            if let Ok(port_num) = port.parse::<u16>() {
                config.port = port_num;
            }
        }
        if let Some(database) = lookup("DB_DATABASE") {
            config.database = database;
        }
        if let Some(user) = lookup("DB_USER") {
            config.user = Some(user);
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            config.password = Some(password);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            database: "app".to_string(),
            user: Some("app".to_string()),
            password: None,
            timeout: None,
            ssl_mode: None,
        }
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_overrides() {
        let env = vars(&[]);
        let resolved = DatabaseConfigResolver::resolve_with(&base(), |k| env.get(k).cloned());
        assert_eq!(resolved.config.host, "localhost");
        assert!(resolved.url.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let env = vars(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_DATABASE", "other"),
            ("DB_PASSWORD", "secret"),
        ]);
        let resolved = DatabaseConfigResolver::resolve_with(&base(), |k| env.get(k).cloned());
        assert_eq!(resolved.config.host, "db.internal");
        assert_eq!(resolved.config.port, 6543);
        assert_eq!(resolved.config.database, "other");
        assert_eq!(resolved.config.user.as_deref(), Some("app"));
        assert_eq!(resolved.config.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let env = vars(&[("DB_PORT", "not-a-port")]);
        let resolved = DatabaseConfigResolver::resolve_with(&base(), |k| env.get(k).cloned());
        assert_eq!(resolved.config.port, 5432);
    }

    #[test]
    fn test_database_url() {
        let env = vars(&[(DATABASE_URL_ENV, "postgresql://u@h:1/d")]);
        let resolved = DatabaseConfigResolver::resolve_with(&base(), |k| env.get(k).cloned());
        assert_eq!(resolved.url.as_deref(), Some("postgresql://u@h:1/d"));
    }
}

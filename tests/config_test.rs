/// 設定ファイル読み込みのテスト
///
/// YAMLの読み込み、既定値、検証エラー、環境変数による上書きを確認します。

#[cfg(test)]
mod config_tests {
    use pgfuncgen::cli::commands::init::CONFIG_TEMPLATE;
    use pgfuncgen::core::config::{Config, ConnectionStyle, SslMode};
    use pgfuncgen::services::config_loader::ConfigLoader;
    use pgfuncgen::services::database_config_resolver::{DatabaseConfigResolver, DATABASE_URL_ENV};
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const FULL_CONFIG: &str = r#"
version: "1.0"
database:
  host: db.internal
  port: 6432
  database: app
  user: generator
  password: secret
  timeout: 5
  ssl_mode: verify-full
output:
  file: internal/db/functions.go
  package: db
  args_def: true
  connection: parameter
  array_helper:
    import: example.com/pgfuncs
    function: pgfuncs.UUIDSliceToPgString
formatter: []
type_map:
  uuid: "pgtype.UUID"
type_imports:
  "pgtype.UUID": github.com/jackc/pgx/v5/pgtype
functions:
  - ops.refresh_cache
  - get_user
"#;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(Config::DEFAULT_CONFIG_PATH);
        fs::write(&path, content).unwrap();
        (temp_dir, path)
    }

    /// 全項目を指定した設定を読み込めることを確認
    #[test]
    fn test_load_full_config() {
        let (_temp_dir, path) = write_config(FULL_CONFIG);
        let config = ConfigLoader::from_file(&path).unwrap();

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6432);
        assert_eq!(config.database.ssl_mode, Some(SslMode::VerifyFull));
        assert_eq!(config.output.file, PathBuf::from("internal/db/functions.go"));
        assert!(config.output.args_def);
        assert_eq!(config.output.connection, ConnectionStyle::Parameter);
        assert_eq!(
            config.output.array_helper.as_ref().map(|h| h.function.as_str()),
            Some("pgfuncs.UUIDSliceToPgString")
        );
        assert!(config.formatter.is_empty());
        assert_eq!(config.type_map.get("uuid").map(String::as_str), Some("pgtype.UUID"));
        assert_eq!(config.functions, vec!["ops.refresh_cache", "get_user"]);
    }

    /// 省略した項目に既定値が入ることを確認
    #[test]
    fn test_defaults() {
        let (_temp_dir, path) = write_config(
            "version: \"1.0\"\ndatabase:\n  database: app\noutput:\n  file: functions.go\n  package: db\n",
        );
        let config = ConfigLoader::from_file(&path).unwrap();

        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.output.connection, ConnectionStyle::Accessor);
        assert_eq!(config.output.db_accessor, "getDB");
        assert_eq!(config.formatter, vec!["gofmt", "-w"]);
        assert!(config.type_map.is_empty());
        assert!(config.functions.is_empty());
    }

    /// パッケージ名が空の設定は検証エラーになることを確認
    #[test]
    fn test_empty_package_is_rejected() {
        let (_temp_dir, path) = write_config(
            "version: \"1.0\"\ndatabase:\n  database: app\noutput:\n  file: functions.go\n  package: \"\"\n",
        );
        let err = ConfigLoader::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Output package is not specified"));
    }

    /// 壊れたYAMLはパースエラーになることを確認
    #[test]
    fn test_invalid_yaml() {
        let (_temp_dir, path) = write_config("version: [unclosed\n");
        let err = ConfigLoader::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    /// 存在しないファイルはエラーになることを確認
    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::from_file(&temp_dir.path().join("missing.yaml"));
        assert!(result.is_err());
    }

    /// init の雛形がそのまま有効な設定であることを確認
    #[test]
    fn test_init_template_loads() {
        let (_temp_dir, path) = write_config(CONFIG_TEMPLATE);
        let config = ConfigLoader::from_file(&path).unwrap();
        assert_eq!(config.output.package, "db");
        assert_eq!(config.database.timeout, Some(30));
    }

    /// 環境変数が設定ファイルの接続情報を上書きすることを確認
    #[test]
    fn test_env_overrides() {
        let (_temp_dir, path) = write_config(FULL_CONFIG);
        let config = ConfigLoader::from_file(&path).unwrap();

        let vars: HashMap<&str, &str> = [
            ("DB_HOST", "127.0.0.1"),
            ("DB_PORT", "5433"),
            ("DB_PASSWORD", "from-env"),
            (DATABASE_URL_ENV, "postgresql://u@h:1/d"),
        ]
        .into_iter()
        .collect();
        let resolved = DatabaseConfigResolver::resolve_with(&config.database, |key| {
            vars.get(key).map(|v| v.to_string())
        });

        assert_eq!(resolved.config.host, "127.0.0.1");
        assert_eq!(resolved.config.port, 5433);
        assert_eq!(resolved.config.password.as_deref(), Some("from-env"));
        assert_eq!(resolved.config.database, "app");
        assert_eq!(resolved.url.as_deref(), Some("postgresql://u@h:1/d"));
    }
}

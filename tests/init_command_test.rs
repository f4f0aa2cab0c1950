/// initコマンドのテスト
///
/// 雛形の設定ファイルの書き出しと上書き制御を確認します。

#[cfg(test)]
mod init_command_tests {
    use pgfuncgen::cli::command_context::CommandContext;
    use pgfuncgen::cli::commands::init::{InitCommand, InitCommandHandler};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// 作成した設定がそのままコマンドコンテキストとして読み込めることを確認
    #[test]
    fn test_init_then_load_context() {
        let temp_dir = TempDir::new().unwrap();
        let handler = InitCommandHandler::new();
        let command = InitCommand {
            project_path: temp_dir.path().to_path_buf(),
            config_path: None,
            force: false,
        };

        handler.execute(&command).unwrap();

        let context = CommandContext::load(temp_dir.path().to_path_buf(), None).unwrap();
        assert_eq!(context.output_file(), temp_dir.path().join("db/functions.go"));
        assert_eq!(context.config.database.database, "app");
    }

    /// --force で既存の設定を上書きできることを確認
    #[test]
    fn test_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let handler = InitCommandHandler::new();
        let mut command = InitCommand {
            project_path: temp_dir.path().to_path_buf(),
            config_path: None,
            force: false,
        };
        handler.execute(&command).unwrap();

        let path = temp_dir.path().join(".pgfuncgen.yaml");
        fs::write(&path, "edited").unwrap();

        assert!(handler.execute(&command).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited");

        command.force = true;
        handler.execute(&command).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("package: db"));
    }

    /// 相対パスの書き込み先はプロジェクトルート基準で解決されることを確認
    #[test]
    fn test_custom_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let handler = InitCommandHandler::new();
        let command = InitCommand {
            project_path: temp_dir.path().to_path_buf(),
            config_path: Some(PathBuf::from("config/pgfuncgen.yaml")),
            force: false,
        };

        handler.execute(&command).unwrap();
        assert!(temp_dir.path().join("config/pgfuncgen.yaml").exists());
    }
}

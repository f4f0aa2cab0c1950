// 生成ソースの書き出し
//
// 生成済みのGoソースをファイルへ書き込み、外部フォーマッタを起動します。

use crate::core::error::{FormatError, GenerateError, IoError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// ソースファイルライター
#[derive(Debug, Clone, Default)]
pub struct SourceWriter {
    /// フォーマッタのコマンドと引数（空ならフォーマットしない）
    formatter: Vec<String>,
}

impl SourceWriter {
    /// 新しいSourceWriterを作成
    pub fn new(formatter: Vec<String>) -> Self {
        Self { formatter }
    }

    /// 親ディレクトリを作成してファイルを書き込む
    pub fn write(&self, path: &Path, source: &str) -> Result<(), IoError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| IoError::DirectoryCreate {
                path: parent.display().to_string(),
                cause: e.to_string(),
            })?;
        }

        fs::write(path, source).map_err(|e| IoError::FileWrite {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;

        debug!(path = %path.display(), bytes = source.len(), "Wrote generated source");
        Ok(())
    }

    /// フォーマッタを起動（ファイルパスを最後の引数として渡す）
    ///
    /// 失敗時は標準出力と標準エラーをまとめてエラーに含める。
    pub async fn format(&self, path: &Path) -> Result<(), FormatError> {
        let Some((program, args)) = self.formatter.split_first() else {
            debug!("No formatter configured, skipping");
            return Ok(());
        };

        debug!(program = %program, path = %path.display(), "Running formatter");

        let output = tokio::process::Command::new(program)
            .args(args)
            .arg(path)
            .output()
            .await
            .map_err(|e| FormatError::Spawn {
                program: program.clone(),
                cause: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let mut diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stderr));

        Err(FormatError::Failed {
            program: program.clone(),
            status: output.status.to_string(),
            output: diagnostics.trim_end().to_string(),
        })
    }

    /// 書き込みとフォーマットを続けて実行
    pub async fn write_and_format(&self, path: &Path, source: &str) -> Result<(), GenerateError> {
        self.write(path, source)?;
        self.format(path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db").join("functions.go");

        let writer = SourceWriter::new(vec![]);
        writer.write(&path, "package db\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "package db\n");
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let writer = SourceWriter::new(vec![]);
        let err = writer
            .write(&blocker.join("functions.go"), "package db\n")
            .unwrap_err();
        assert!(err.is_directory_create() || err.is_file_write());
    }

    #[tokio::test]
    async fn test_format_without_formatter_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("functions.go");
        let writer = SourceWriter::new(vec![]);
        assert!(writer.format(&path).await.is_ok());
    }

    #[tokio::test]
    async fn test_format_missing_program() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("functions.go");
        let writer = SourceWriter::new(vec!["pgfuncgen-no-such-formatter".to_string()]);
        let err = writer.format(&path).await.unwrap_err();
        assert!(err.is_spawn());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_format_failure_carries_diagnostics() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("functions.go");
        let writer = SourceWriter::new(vec![
            "sh".to_string(),
            "-c".to_string(),
            "echo 'expected declaration' >&2; exit 2".to_string(),
        ]);

        let err = writer.format(&path).await.unwrap_err();
        assert!(err.is_failed());
        assert_eq!(err.output(), Some("expected declaration"));
    }
}

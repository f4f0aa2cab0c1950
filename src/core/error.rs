// エラー型定義
//
// アプリケーション全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、IntrospectionError, DatabaseError, IoError, FormatError と
// それらを束ねる GenerateError を定義します。

use thiserror::Error;

/// データベースエラー
///
/// カタログへの接続・問い合わせ時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Connection error
    #[error("Database connection error: {message} (cause: {cause})")]
    Connection {
        /// エラーメッセージ
        message: String,
        /// エラー原因
        cause: String,
    },

    /// Query execution error
    #[error("Query execution error: {message}")]
    Query {
        /// エラーメッセージ
        message: String,
        /// 失敗したSQL
        sql: Option<String>,
    },
}

impl DatabaseError {
    /// 接続エラーかどうか
    pub fn is_connection(&self) -> bool {
        matches!(self, DatabaseError::Connection { .. })
    }

    /// クエリエラーかどうか
    pub fn is_query(&self) -> bool {
        matches!(self, DatabaseError::Query { .. })
    }
}

/// イントロスペクションエラー
///
/// ルーチンのシグネチャ取得時に発生するエラーを表現します。
/// いずれも生成処理全体を中断させます。
#[derive(Debug, Error)]
pub enum IntrospectionError {
    /// Routine not found
    #[error("Function not found: {namespace}.{name}")]
    NotFound {
        /// スキーマ名
        namespace: String,
        /// ルーチン名
        name: String,
    },

    /// Invalid routine name
    #[error("Invalid function name '{name}': {reason}")]
    InvalidName {
        /// 指定された名前
        name: String,
        /// 不正な理由
        reason: String,
    },

    /// Malformed argument segment
    #[error("Invalid type in argument: {segment}")]
    MalformedArgument {
        /// 問題のある引数セグメント
        segment: String,
    },

    /// Catalog access failure
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl IntrospectionError {
    /// ルーチンが見つからないエラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(self, IntrospectionError::NotFound { .. })
    }

    /// 名前不正エラーかどうか
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, IntrospectionError::InvalidName { .. })
    }

    /// 引数の書式エラーかどうか
    pub fn is_malformed_argument(&self) -> bool {
        matches!(self, IntrospectionError::MalformedArgument { .. })
    }

    /// データベースエラーかどうか
    pub fn is_database(&self) -> bool {
        matches!(self, IntrospectionError::Database(_))
    }
}

/// I/Oエラー
///
/// 生成ファイルの書き出し時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum IoError {
    /// File write error
    #[error("Failed to write file: {path} (cause: {cause})")]
    FileWrite {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },

    /// Directory creation error
    #[error("Failed to create directory: {path} (cause: {cause})")]
    DirectoryCreate {
        /// ディレクトリパス
        path: String,
        /// エラー原因
        cause: String,
    },
}

impl IoError {
    /// ファイル書き込みエラーかどうか
    pub fn is_file_write(&self) -> bool {
        matches!(self, IoError::FileWrite { .. })
    }

    /// ディレクトリ作成エラーかどうか
    pub fn is_directory_create(&self) -> bool {
        matches!(self, IoError::DirectoryCreate { .. })
    }
}

/// フォーマッタエラー
///
/// 生成後に起動する外部フォーマッタの失敗を表現します。
#[derive(Debug, Error)]
pub enum FormatError {
    /// Formatter could not be started
    #[error("Failed to run formatter '{program}': {cause}")]
    Spawn {
        /// 実行ファイル名
        program: String,
        /// エラー原因
        cause: String,
    },

    /// Formatter exited with failure
    #[error("Formatter '{program}' failed ({status}):\n{output}")]
    Failed {
        /// 実行ファイル名
        program: String,
        /// 終了ステータス
        status: String,
        /// フォーマッタの診断出力（stdout + stderr）
        output: String,
    },
}

impl FormatError {
    /// 起動失敗かどうか
    pub fn is_spawn(&self) -> bool {
        matches!(self, FormatError::Spawn { .. })
    }

    /// フォーマッタが異常終了したかどうか
    pub fn is_failed(&self) -> bool {
        matches!(self, FormatError::Failed { .. })
    }

    /// 診断出力を取得
    pub fn output(&self) -> Option<&str> {
        match self {
            FormatError::Failed { output, .. } => Some(output),
            FormatError::Spawn { .. } => None,
        }
    }
}

/// 生成エラー
///
/// 生成パイプライン全体から呼び出し元へ伝播するエラー。
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Introspection(#[from] IntrospectionError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Format(#[from] FormatError),

    /// No routine requested
    #[error("No functions to generate")]
    NoFunctions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_variants() {
        let conn_error = DatabaseError::Connection {
            message: "Connection failed".to_string(),
            cause: "Timeout".to_string(),
        };
        assert!(conn_error.is_connection());
        assert!(!conn_error.is_query());

        let query_error = DatabaseError::Query {
            message: "Query failed".to_string(),
            sql: None,
        };
        assert!(query_error.is_query());
    }

    #[test]
    fn test_introspection_error_messages() {
        let error = IntrospectionError::MalformedArgument {
            segment: "broken".to_string(),
        };
        assert!(error.is_malformed_argument());
        assert_eq!(error.to_string(), "Invalid type in argument: broken");

        let error = IntrospectionError::NotFound {
            namespace: "ops".to_string(),
            name: "missing".to_string(),
        };
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Function not found: ops.missing");
    }

    #[test]
    fn test_introspection_error_from_database_error() {
        let error: IntrospectionError = DatabaseError::Query {
            message: "boom".to_string(),
            sql: Some("SELECT 1".to_string()),
        }
        .into();
        assert!(error.is_database());
        assert!(error.to_string().contains("boom"));
    }

    #[test]
    fn test_io_error_variants() {
        let write_error = IoError::FileWrite {
            path: "/path/to/file".to_string(),
            cause: "Disk full".to_string(),
        };
        assert!(write_error.is_file_write());

        let dir_error = IoError::DirectoryCreate {
            path: "/path/to/dir".to_string(),
            cause: "Permission denied".to_string(),
        };
        assert!(dir_error.is_directory_create());
    }

    #[test]
    fn test_format_error_keeps_diagnostics() {
        let error = FormatError::Failed {
            program: "gofmt".to_string(),
            status: "exit status: 2".to_string(),
            output: "functions.go:3:1: expected declaration".to_string(),
        };
        assert!(error.is_failed());
        assert_eq!(error.output(), Some("functions.go:3:1: expected declaration"));
        assert!(error.to_string().contains("expected declaration"));

        let spawn = FormatError::Spawn {
            program: "gofmt".to_string(),
            cause: "not found".to_string(),
        };
        assert!(spawn.is_spawn());
        assert!(spawn.output().is_none());
    }
}

// カタログアダプター
//
// PostgreSQLのシステムカタログからルーチンのシグネチャとENUMラベルを取得します。
// 問い合わせはトレイトで抽象化し、テストではインメモリ実装に差し替えます。

use crate::core::error::DatabaseError;
use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;

/// 戻り値なしを表すカタログ上の型名
const VOID_RESULT: &str = "void";

/// カタログから取得した生のルーチン情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRoutineRow {
    /// `pg_get_function_arguments` の出力
    pub arguments: String,
    /// 戻り値の型記述子（戻り値なしは空文字列）
    pub result: String,
    /// 種別文字列（`normal`, `agg`, `window`, `trigger`, `procedure`）
    pub kind: String,
    /// コメント
    pub description: Option<String>,
}

/// ルーチン取得インターフェース
#[async_trait]
pub trait RoutineCatalog: Send + Sync {
    /// スキーマと名前に一致するルーチンを取得（オーバーロードがあれば複数行）
    async fn fetch_routine(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Vec<RawRoutineRow>, DatabaseError>;
}

/// ENUMラベル取得インターフェース
#[async_trait]
pub trait EnumCatalog: Send + Sync {
    /// ENUM型のラベルを並び順で取得
    ///
    /// ENUMでない型や存在しない型は空のリストを返す。
    async fn enum_labels(
        &self,
        schema: Option<&str>,
        type_name: &str,
    ) -> Result<Vec<String>, DatabaseError>;
}

/// `pg_get_function_result` の出力を型記述子へ正規化
///
/// プロシージャ（NULL）と `void` は戻り値なしとして扱う。
pub fn normalize_result(result: Option<String>) -> String {
    match result {
        Some(result) if result.trim() != VOID_RESULT => result.trim().to_string(),
        _ => String::new(),
    }
}

/// PostgreSQLカタログ
#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ROUTINE_SQL: &str = r#"
    SELECT
        pg_catalog.pg_get_function_arguments(p.oid) AS arguments,
        pg_catalog.pg_get_function_result(p.oid) AS result,
        CASE
            WHEN p.prokind = 'a' THEN 'agg'
            WHEN p.prokind = 'w' THEN 'window'
            WHEN p.prokind = 'p' THEN 'procedure'
            WHEN p.prorettype = 'pg_catalog.trigger'::pg_catalog.regtype THEN 'trigger'
            ELSE 'normal'
        END AS kind,
        d.description
    FROM pg_catalog.pg_proc AS p
        JOIN pg_catalog.pg_namespace AS n ON n.oid = p.pronamespace
        LEFT JOIN pg_catalog.pg_description AS d
            ON d.objoid = p.oid AND d.classoid = 'pg_catalog.pg_proc'::pg_catalog.regclass
    WHERE n.nspname = $1
        AND p.proname = $2
    ORDER BY p.oid
"#;

const ENUM_SQL: &str = r#"
    SELECT e.enumlabel
    FROM pg_catalog.pg_enum AS e
        JOIN pg_catalog.pg_type AS t ON e.enumtypid = t.oid
    WHERE t.typname = $1
    ORDER BY e.enumsortorder
"#;

const QUALIFIED_ENUM_SQL: &str = r#"
    SELECT e.enumlabel
    FROM pg_catalog.pg_enum AS e
        JOIN pg_catalog.pg_type AS t ON e.enumtypid = t.oid
        JOIN pg_catalog.pg_namespace AS n ON n.oid = t.typnamespace
    WHERE n.nspname = $1
        AND t.typname = $2
    ORDER BY e.enumsortorder
"#;

#[async_trait]
impl RoutineCatalog for PostgresCatalog {
    async fn fetch_routine(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Vec<RawRoutineRow>, DatabaseError> {
        let rows = sqlx::query(ROUTINE_SQL)
            .bind(namespace)
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query {
                message: format!("Failed to introspect {}.{}: {}", namespace, name, e),
                sql: Some(ROUTINE_SQL.to_string()),
            })?;

        rows.iter()
            .map(|row| {
                let decode = |e: sqlx::Error| DatabaseError::Query {
                    message: format!("Failed to decode catalog row: {}", e),
                    sql: None,
                };
                Ok::<_, DatabaseError>(RawRoutineRow {
                    arguments: row
                        .try_get::<Option<String>, _>("arguments")
                        .map_err(decode)?
                        .unwrap_or_default(),
                    result: normalize_result(row.try_get("result").map_err(decode)?),
                    kind: row.try_get("kind").map_err(decode)?,
                    description: row.try_get("description").map_err(decode)?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl EnumCatalog for PostgresCatalog {
    async fn enum_labels(
        &self,
        schema: Option<&str>,
        type_name: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        let (sql, query) = match schema {
            Some(schema) => (
                QUALIFIED_ENUM_SQL,
                sqlx::query_scalar::<_, String>(QUALIFIED_ENUM_SQL)
                    .bind(schema)
                    .bind(type_name),
            ),
            None => (
                ENUM_SQL,
                sqlx::query_scalar::<_, String>(ENUM_SQL).bind(type_name),
            ),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query {
                message: format!("Failed to look up enum labels of '{}': {}", type_name, e),
                sql: Some(sql.to_string()),
            })
    }
}

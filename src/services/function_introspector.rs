// ルーチンイントロスペクションサービス
//
// ルーチン名からカタログを引き、Functionモデルを組み立てます。

use crate::adapters::catalog::RoutineCatalog;
use crate::core::error::IntrospectionError;
use crate::core::function::{parse_arguments, split_qualified_name, Function, FunctionKind};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// ルーチン名として受け付ける形式（`name` または `schema.name`）
fn routine_name_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*(\.[A-Za-z_][A-Za-z0-9_$]*)?$").ok())
        .as_ref()
}

/// ルーチンイントロスペクター
pub struct FunctionIntrospector<'a> {
    catalog: &'a dyn RoutineCatalog,
}

impl<'a> FunctionIntrospector<'a> {
    pub fn new(catalog: &'a dyn RoutineCatalog) -> Self {
        Self { catalog }
    }

    /// ルーチン名を検証
    pub fn validate_name(qualified: &str) -> Result<(), IntrospectionError> {
        if qualified.is_empty() {
            return Err(IntrospectionError::InvalidName {
                name: qualified.to_string(),
                reason: "name is empty".to_string(),
            });
        }
        if !routine_name_pattern().is_some_and(|re| re.is_match(qualified)) {
            return Err(IntrospectionError::InvalidName {
                name: qualified.to_string(),
                reason: "expected 'name' or 'schema.name'".to_string(),
            });
        }
        Ok(())
    }

    /// ルーチンをイントロスペクト
    ///
    /// 未修飾名は `public` スキーマで探す。
    /// オーバーロードがある場合は最初の行を使う。
    pub async fn introspect(&self, qualified: &str) -> Result<Function, IntrospectionError> {
        Self::validate_name(qualified)?;
        let (namespace, name) = split_qualified_name(qualified);

        let rows = self.catalog.fetch_routine(&namespace, &name).await?;
        let row_count = rows.len();
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| IntrospectionError::NotFound {
                namespace: namespace.clone(),
                name: name.clone(),
            })?;

        if row_count > 1 {
            warn!(
                function = %qualified,
                overloads = row_count,
                "Function is overloaded, using the first signature"
            );
        }

        let arguments = parse_arguments(&row.arguments)?;
        let kind = FunctionKind::from_catalog(&row.kind);
        if kind != FunctionKind::Normal {
            warn!(function = %qualified, kind = %kind, "Generating wrapper for non-normal routine");
        }

        debug!(
            function = %qualified,
            arguments = arguments.len(),
            result = %row.result,
            "Introspected function"
        );

        Ok(Function {
            namespace,
            name,
            kind,
            arguments,
            result: row.result,
            description: row.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

// ルーチンモデル
//
// カタログから取得した1つのストアドルーチンのシグネチャを表現します。
// 引数の順序は呼び出しシグネチャの順序であり、位置パラメータの割り当てに直結します。

use crate::core::error::IntrospectionError;
use crate::core::naming::{exported_name, unexported_name};
use std::fmt;

/// 未修飾名のルーチンが属する既定スキーマ
pub const DEFAULT_NAMESPACE: &str = "public";

/// スキーマ修飾の区切り文字
pub const NAMESPACE_SEPARATOR: char = '.';

/// ルーチンの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Normal,
    Aggregate,
    Window,
    Trigger,
    Procedure,
}

impl FunctionKind {
    /// カタログクエリが返す種別文字列から変換
    ///
    /// 未知の文字列は `Normal` として扱う。
    pub fn from_catalog(kind: &str) -> Self {
        match kind {
            "agg" | "aggregate" => FunctionKind::Aggregate,
            "window" => FunctionKind::Window,
            "trigger" => FunctionKind::Trigger,
            "procedure" => FunctionKind::Procedure,
            _ => FunctionKind::Normal,
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKind::Normal => write!(f, "normal"),
            FunctionKind::Aggregate => write!(f, "aggregate"),
            FunctionKind::Window => write!(f, "window"),
            FunctionKind::Trigger => write!(f, "trigger"),
            FunctionKind::Procedure => write!(f, "procedure"),
        }
    }
}

/// ルーチンの引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArgument {
    /// データベース上の引数名
    pub name: String,
    /// 型記述子（例: `uuid`, `text[]`）
    pub type_name: String,
}

impl FunctionArgument {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// Goのローカル変数名
    pub fn go_name(&self) -> String {
        unexported_name(&self.name)
    }

    /// Goの構造体フィールド名
    pub fn exported_go_name(&self) -> String {
        exported_name(&self.name)
    }
}

/// イントロスペクト済みのルーチン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub namespace: String,
    pub name: String,
    pub kind: FunctionKind,
    pub arguments: Vec<FunctionArgument>,
    /// 戻り値の型記述子（空文字列は戻り値なし）
    pub result: String,
    pub description: Option<String>,
}

impl Function {
    /// 戻り値を持つかどうか
    pub fn has_result(&self) -> bool {
        !self.result.is_empty()
    }

    /// SQL上の修飾名（`namespace.name`）
    pub fn qualified_name(&self) -> String {
        format!("{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.name)
    }

    /// Goの関数名
    pub fn go_name(&self) -> String {
        exported_name(&self.name)
    }
}

/// `namespace.name` を分割（未修飾なら既定スキーマ）
pub fn split_qualified_name(qualified: &str) -> (String, String) {
    match qualified.split_once(NAMESPACE_SEPARATOR) {
        Some((namespace, name)) => (namespace.to_string(), name.to_string()),
        None => (DEFAULT_NAMESPACE.to_string(), qualified.to_string()),
    }
}

/// 括弧の外側にあるカンマで分割
fn split_top_level(list: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&list[start..]);
    segments
}

/// `pg_get_function_arguments` 形式の引数リストを解析
///
/// 形式は `"name type, name type, ..."`。空文字列は引数なし。
/// 名前と型の間に空白がないセグメントはエラーとなる。
/// 末尾の `DEFAULT ...` 句は型から取り除く。
pub fn parse_arguments(list: &str) -> Result<Vec<FunctionArgument>, IntrospectionError> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut arguments = Vec::new();
    for segment in split_top_level(list) {
        let segment = segment.trim();
        let (name, type_name) =
            segment
                .split_once(' ')
                .ok_or_else(|| IntrospectionError::MalformedArgument {
                    segment: segment.to_string(),
                })?;
        let type_name = match type_name.find(" DEFAULT ") {
            Some(p) => &type_name[..p],
            None => type_name,
        };
        arguments.push(FunctionArgument::new(name, type_name.trim()));
    }
    Ok(arguments)
}

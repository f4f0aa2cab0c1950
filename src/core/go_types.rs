// Go型テーブル
//
// PostgreSQLの組み込みスカラー型からGo型への固定マッピングと、
// Go型が要求するインポートパスの既知テーブルを保持します。

/// ポインタ型のマーカー
pub const POINTER_MARKER: &str = "*";

/// スライス型のマーカー
pub const SLICE_MARKER: &str = "[]";

/// 組み込みスカラー型テーブル（PostgreSQL型名 -> Go型）
///
/// `pg_get_function_arguments` が返す正式名（`character varying` 等）も含む。
const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("boolean", "bool"),
    ("bool", "bool"),
    ("text", "string"),
    ("varchar", "string"),
    ("character varying", "string"),
    ("character", "string"),
    ("char", "string"),
    ("bpchar", "string"),
    ("name", "string"),
    ("citext", "string"),
    ("float4", "float32"),
    ("real", "float32"),
    ("float8", "float64"),
    ("double precision", "float64"),
    ("smallint", "int16"),
    ("int2", "int16"),
    ("int", "int32"),
    ("integer", "int32"),
    ("int4", "int32"),
    ("bigint", "int64"),
    ("int8", "int64"),
    ("smallserial", "int16"),
    ("serial", "int32"),
    ("bigserial", "int64"),
    ("date", "time.Time"),
    ("timestamp", "time.Time"),
    ("timestamp without time zone", "time.Time"),
    ("timestamptz", "time.Time"),
    ("timestamp with time zone", "time.Time"),
    ("bytea", "[]byte"),
    ("json", "json.RawMessage"),
    ("jsonb", "json.RawMessage"),
    ("uuid", "uuid.UUID"),
];

/// 既知のGo型 -> インポートパス
const KNOWN_TYPE_IMPORTS: &[(&str, &str)] = &[
    ("time.Time", "time"),
    ("json.RawMessage", "encoding/json"),
    ("uuid.UUID", "github.com/ungerik/go-uuid"),
];

/// 組み込みテーブルを引く
pub fn builtin_go_type(pg_type: &str) -> Option<&'static str> {
    BUILTIN_TYPES
        .iter()
        .find(|(name, _)| *name == pg_type)
        .map(|(_, go_type)| *go_type)
}

/// 既知インポートテーブルを引く
pub fn known_import(go_type: &str) -> Option<&'static str> {
    KNOWN_TYPE_IMPORTS
        .iter()
        .find(|(name, _)| *name == go_type)
        .map(|(_, path)| *path)
}

/// ポインタ型かどうか
pub fn is_pointer(go_type: &str) -> bool {
    go_type.starts_with(POINTER_MARKER)
}

/// スライス型かどうか
pub fn is_slice(go_type: &str) -> bool {
    go_type.starts_with(SLICE_MARKER)
}

/// 先頭のポインタマーカーを1つ取り除く
pub fn deref(go_type: &str) -> &str {
    go_type.strip_prefix(POINTER_MARKER).unwrap_or(go_type)
}

/// スライスの要素型（スライスでなければそのまま）
pub fn slice_elem(go_type: &str) -> &str {
    go_type.strip_prefix(SLICE_MARKER).unwrap_or(go_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mapping() {
        assert_eq!(builtin_go_type("boolean"), Some("bool"));
        assert_eq!(builtin_go_type("bigint"), Some("int64"));
        assert_eq!(builtin_go_type("timestamptz"), Some("time.Time"));
        assert_eq!(builtin_go_type("timestamp with time zone"), Some("time.Time"));
        assert_eq!(builtin_go_type("bigserial"), Some("int64"));
        assert_eq!(builtin_go_type("uuid"), Some("uuid.UUID"));
        assert_eq!(builtin_go_type("mood"), None);
    }

    #[test]
    fn test_known_imports() {
        assert_eq!(known_import("time.Time"), Some("time"));
        assert_eq!(known_import("uuid.UUID"), Some("github.com/ungerik/go-uuid"));
        assert_eq!(known_import("string"), None);
    }

    #[test]
    fn test_markers() {
        assert!(is_pointer("*User"));
        assert_eq!(deref("*User"), "User");
        assert_eq!(deref("User"), "User");
        assert!(is_slice("[]User"));
        assert_eq!(slice_elem("[]*User"), "*User");
    }
}

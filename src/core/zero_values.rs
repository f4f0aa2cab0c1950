// Goのゼロ値テーブル
//
// 生成コードのエラー経路で返すリテラルを、解決済みのGo型から引きます。

use crate::core::go_types::{is_pointer, is_slice};

const ZERO_VALUES: &[(&str, &str)] = &[
    ("bool", "false"),
    ("string", "\"\""),
    ("float32", "0"),
    ("float64", "0"),
    ("int", "0"),
    ("int16", "0"),
    ("int32", "0"),
    ("int64", "0"),
    ("uint", "0"),
    ("uint16", "0"),
    ("uint32", "0"),
    ("uint64", "0"),
    ("time.Time", "time.Time{}"),
    ("uuid.UUID", "uuid.Nil"),
    ("json.RawMessage", "nil"),
];

/// Go型のゼロ値リテラル
///
/// スライス・ポインタは `nil`。未知の型は `None` を返し、呼び出し側は
/// 未代入の結果変数をそのまま返すコードにフォールバックする。
pub fn zero_value(go_type: &str) -> Option<&'static str> {
    if is_slice(go_type) || is_pointer(go_type) {
        return Some("nil");
    }
    ZERO_VALUES
        .iter()
        .find(|(name, _)| *name == go_type)
        .map(|(_, zero)| *zero)
}

// 命名ポリシー
//
// 既定の設定ファイル名と、データベース識別子から
// Go識別子への変換（キャメルケース化と頭字語サフィックス補正）を提供します。

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = ".pgfuncgen.yaml";

/// 頭字語サフィックスの補正テーブル
///
/// 宣言順に評価し、最初に一致したサフィックスだけを置換する。
const SUFFIX_CORRECTIONS: [(&str, &str); 8] = [
    ("Id", "ID"),
    ("Uuid", "UUID"),
    ("Json", "JSON"),
    ("Xml", "XML"),
    ("Jpeg", "JPEG"),
    ("Jpg", "JPG"),
    ("Png", "PNG"),
    ("Svg", "SVG"),
];

/// サフィックス補正を適用
fn correct_suffix(name: String) -> String {
    for (suffix, replacement) in SUFFIX_CORRECTIONS {
        if let Some(stem) = name.strip_suffix(suffix) {
            return format!("{}{}", stem, replacement);
        }
    }
    name
}

/// エクスポートされるGo識別子（先頭大文字）に変換
///
/// # Examples
///
/// ```
/// use pgfuncgen::core::naming::exported_name;
///
/// assert_eq!(exported_name("user_id"), "UserID");
/// assert_eq!(exported_name("refresh_cache"), "RefreshCache");
/// ```
pub fn exported_name(db_identifier: &str) -> String {
    correct_suffix(db_identifier.to_upper_camel_case())
}

/// エクスポートされないGo識別子（先頭小文字）に変換
pub fn unexported_name(db_identifier: &str) -> String {
    correct_suffix(db_identifier.to_lower_camel_case())
}

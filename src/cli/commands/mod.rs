// コマンドハンドラー層
// 各CLIコマンドの実装

pub mod generate;
pub mod init;

use crate::cli::OutputFormat;
use anyhow::Result;
use serde::Serialize;

/// 出力フォーマットに応じてコマンド結果を文字列化
///
/// `Json` ではシリアライズ可能な結果をそのまま出力し、`Text` では `text` を使う。
pub fn render_output<T: Serialize>(format: OutputFormat, value: &T, text: String) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_text() {
        let value = json!({ "ok": true });
        let output = render_output(OutputFormat::Text, &value, "done".to_string()).unwrap();
        assert_eq!(output, "done");
    }

    #[test]
    fn test_render_json() {
        let value = json!({ "ok": true });
        let output = render_output(OutputFormat::Json, &value, "done".to_string()).unwrap();
        assert_eq!(output, "{\n  \"ok\": true\n}");
    }
}

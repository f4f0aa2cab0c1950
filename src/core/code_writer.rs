// インデント付きコードライター
//
// Go出力用のプリンタが使う、インデント管理付きの書き込みヘルパー。
// `indent()` が返すガードの生存期間だけインデントが1段深くなります。

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// インデントを追跡するコードライター
pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
    at_line_start: bool,
}

impl<W: fmt::Write> CodeWriter<W> {
    /// インデント文字列を指定して作成
    pub fn new(writer: W, indent_string: impl Into<String>) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            indent_string: indent_string.into(),
            at_line_start: true,
        }
    }

    /// タブインデント（gofmt と同じ）で作成
    pub fn with_tabs(writer: W) -> Self {
        Self::new(writer, "\t")
    }

    /// 改行なしで書き込む。行頭なら先にインデントを出力する。
    pub fn write(&mut self, text: &str) -> fmt::Result {
        if text.is_empty() {
            return Ok(());
        }
        if self.at_line_start {
            for _ in 0..self.indent_level.get() {
                self.writer.write_str(&self.indent_string)?;
            }
            self.at_line_start = false;
        }
        self.writer.write_str(text)
    }

    /// 書き込んで改行
    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.newline()
    }

    /// 改行のみ
    pub fn newline(&mut self) -> fmt::Result {
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    /// 空行（行頭でなければ先に行を閉じる）
    pub fn blank_line(&mut self) -> fmt::Result {
        if !self.at_line_start {
            self.newline()?;
        }
        self.newline()
    }

    /// インデントガードを取得
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// `// ` コメント行（複数行なら行ごと）
    pub fn comment(&mut self, text: &str) -> fmt::Result {
        for line in text.lines() {
            if line.is_empty() {
                self.writeln("//")?;
            } else {
                self.writeln(&format!("// {}", line))?;
            }
        }
        Ok(())
    }
}

/// インデントを維持するRAIIガード
pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let current = self.indent_level.get();
        self.indent_level.set(current.saturating_sub(1));
    }
}

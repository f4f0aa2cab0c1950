// Goソースプリンタ
//
// go_ast の中間表現をGoソーステキストへ変換します。
// 出力はgofmt済みに近い形（タブインデント）ですが、最終整形は外部フォーマッタに任せます。

use crate::core::code_writer::CodeWriter;
use crate::core::go_ast::{ConstSpec, Decl, Expr, FuncDecl, Param, Results, SourceFile, Stmt};
use std::fmt::{self, Write};

/// Goの文字列リテラルとしてクォート
pub fn quote_go_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// 式を文字列化
pub fn print_expr(expr: &Expr) -> String {
    let mut out = String::new();
    // Stringへの書き込みは失敗しない
    let _ = write_expr(&mut out, expr);
    out
}

fn write_expr(out: &mut String, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Ident(name) => out.write_str(name),
        Expr::Str(value) => out.write_str(&quote_go_string(value)),
        Expr::Call { callee, args } => {
            out.write_str(callee)?;
            write_args(out, args)
        }
        Expr::MethodCall { recv, method, args } => {
            write_expr(out, recv)?;
            write!(out, ".{}", method)?;
            write_args(out, args)
        }
        Expr::AddrOf(inner) => {
            out.write_char('&')?;
            write_expr(out, inner)
        }
        Expr::Binary { lhs, op, rhs } => {
            write_expr(out, lhs)?;
            write!(out, " {} ", op)?;
            write_expr(out, rhs)
        }
    }
}

fn write_args(out: &mut String, args: &[Expr]) -> fmt::Result {
    out.write_char('(')?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write_expr(out, arg)?;
    }
    out.write_char(')')
}

fn join_exprs(exprs: &[Expr]) -> String {
    exprs.iter().map(print_expr).collect::<Vec<_>>().join(", ")
}

fn join_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", p.name, p.ty))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Goソースプリンタ
#[derive(Debug, Clone, Default)]
pub struct GoPrinter;

impl GoPrinter {
    pub fn new() -> Self {
        Self
    }

    /// ファイル全体を出力
    pub fn print_file(&self, file: &SourceFile) -> String {
        let mut output = String::new();
        {
            let mut w = CodeWriter::with_tabs(&mut output);
            // Stringへの書き込みは失敗しない
            let _ = self.write_file(&mut w, file);
        }
        output
    }

    /// 宣言を1つだけ出力
    pub fn print_decl(&self, decl: &Decl) -> String {
        let mut output = String::new();
        {
            let mut w = CodeWriter::with_tabs(&mut output);
            let _ = self.write_decl(&mut w, decl);
        }
        output
    }

    fn write_file<W: Write>(&self, w: &mut CodeWriter<W>, file: &SourceFile) -> fmt::Result {
        w.writeln(&format!("package {}", file.package))?;
        w.blank_line()?;
        if !file.imports.is_empty() {
            self.write_imports(w, &file.imports)?;
            w.blank_line()?;
        }
        // 宣言の間にだけ空行を入れる
        for (i, decl) in file.decls.iter().enumerate() {
            if i > 0 {
                w.blank_line()?;
            }
            self.write_decl(w, decl)?;
        }
        Ok(())
    }

    fn write_imports<W: Write>(&self, w: &mut CodeWriter<W>, imports: &[String]) -> fmt::Result {
        w.writeln("import (")?;
        {
            let _indent = w.indent();
            for path in imports {
                w.writeln(&quote_go_string(path))?;
            }
        }
        w.writeln(")")
    }

    fn write_decl<W: Write>(&self, w: &mut CodeWriter<W>, decl: &Decl) -> fmt::Result {
        match decl {
            Decl::Type {
                doc,
                name,
                underlying,
            } => {
                self.write_doc(w, doc)?;
                w.writeln(&format!("type {} {}", name, underlying))
            }
            Decl::Const(specs) => self.write_consts(w, specs),
            Decl::VarStruct {
                doc,
                name,
                embedded,
                fields,
            } => {
                self.write_doc(w, doc)?;
                w.writeln(&format!("var {} struct {{", name))?;
                {
                    let _indent = w.indent();
                    for embed in embedded {
                        w.writeln(embed)?;
                    }
                    if !embedded.is_empty() && !fields.is_empty() {
                        w.blank_line()?;
                    }
                    for field in fields {
                        match &field.tag {
                            Some(tag) => {
                                w.writeln(&format!("{} {} `{}`", field.name, field.ty, tag))?
                            }
                            None => w.writeln(&format!("{} {}", field.name, field.ty))?,
                        }
                    }
                }
                w.writeln("}")
            }
            Decl::Func(func) => self.write_func(w, func),
        }
    }

    fn write_doc<W: Write>(&self, w: &mut CodeWriter<W>, doc: &[String]) -> fmt::Result {
        for line in doc {
            w.comment(line)?;
        }
        Ok(())
    }

    fn write_consts<W: Write>(&self, w: &mut CodeWriter<W>, specs: &[ConstSpec]) -> fmt::Result {
        w.writeln("const (")?;
        {
            let _indent = w.indent();
            for spec in specs {
                w.writeln(&format!(
                    "{} {} = {}",
                    spec.name,
                    spec.ty,
                    print_expr(&spec.value)
                ))?;
            }
        }
        w.writeln(")")
    }

    fn write_func<W: Write>(&self, w: &mut CodeWriter<W>, func: &FuncDecl) -> fmt::Result {
        self.write_doc(w, &func.doc)?;
        w.write("func ")?;
        if let Some(receiver) = &func.receiver {
            w.write(&format!("({} {}) ", receiver.name, receiver.ty))?;
        }
        w.write(&format!("{}({})", func.name, join_params(&func.params)))?;
        match &func.results {
            Results::Unnamed(types) if types.is_empty() => {}
            Results::Unnamed(types) if types.len() == 1 => w.write(&format!(" {}", types[0]))?,
            Results::Unnamed(types) => w.write(&format!(" ({})", types.join(", ")))?,
            Results::Named(params) => w.write(&format!(" ({})", join_params(params)))?,
        }
        w.writeln(" {")?;
        {
            let _indent = w.indent();
            self.write_stmts(w, &func.body)?;
        }
        w.writeln("}")
    }

    fn write_stmts<W: Write>(&self, w: &mut CodeWriter<W>, stmts: &[Stmt]) -> fmt::Result {
        for stmt in stmts {
            self.write_stmt(w, stmt)?;
        }
        Ok(())
    }

    fn write_block<W: Write>(
        &self,
        w: &mut CodeWriter<W>,
        header: &str,
        body: &[Stmt],
    ) -> fmt::Result {
        w.writeln(&format!("{} {{", header))?;
        {
            let _indent = w.indent();
            self.write_stmts(w, body)?;
        }
        w.writeln("}")
    }

    fn write_stmt<W: Write>(&self, w: &mut CodeWriter<W>, stmt: &Stmt) -> fmt::Result {
        match stmt {
            Stmt::Define { names, value } => {
                w.writeln(&format!("{} := {}", names.join(", "), print_expr(value)))
            }
            Stmt::Assign { names, value } => {
                w.writeln(&format!("{} = {}", names.join(", "), print_expr(value)))
            }
            Stmt::Var { name, ty } => w.writeln(&format!("var {} {}", name, ty)),
            Stmt::If { cond, body } => {
                self.write_block(w, &format!("if {}", print_expr(cond)), body)
            }
            Stmt::For { cond, body } => {
                self.write_block(w, &format!("for {}", print_expr(cond)), body)
            }
            Stmt::Range {
                key,
                value,
                expr,
                body,
            } => {
                let header = match value {
                    Some(value) => format!("for {}, {} := range {}", key, value, print_expr(expr)),
                    None => format!("for {} := range {}", key, print_expr(expr)),
                };
                self.write_block(w, &header, body)
            }
            Stmt::Switch { tag, cases } => {
                w.writeln(&format!("switch {} {{", print_expr(tag)))?;
                for case in cases {
                    w.writeln(&format!("case {}:", join_exprs(&case.values)))?;
                    let _indent = w.indent();
                    self.write_stmts(w, &case.body)?;
                }
                w.writeln("}")
            }
            Stmt::Defer(expr) => w.writeln(&format!("defer {}", print_expr(expr))),
            Stmt::Return(values) if values.is_empty() => w.writeln("return"),
            Stmt::Return(values) => w.writeln(&format!("return {}", join_exprs(values))),
            Stmt::Expr(expr) => w.writeln(&print_expr(expr)),
        }
    }
}

// コード合成サービス
//
// 型解決済みのルーチンからGoのラッパー関数を組み立てます。
// 出力は go_ast の宣言列で、テキスト化は GoPrinter に任せます。
//
// 戻り値の扱いは3通り:
// - 戻り値なし: Exec して error だけを返す
// - 単一行: スカラーは Scan、ポインタ型は全列選択 + StructScan
// - SETOF: 行を走査してスライスに追加する

use crate::core::config::{ArrayHelperConfig, ConnectionStyle};
use crate::core::function::{Function, FunctionArgument};
use crate::core::go_ast::{Decl, Expr, FuncDecl, Param, Results, SourceFile, Stmt, StructField};
use crate::core::go_printer::GoPrinter;
use crate::core::go_types::{deref, is_pointer, slice_elem};
use crate::core::imports::ImportSet;
use crate::core::type_descriptor::TypeDescriptor;
use crate::core::zero_values::zero_value;
use crate::services::type_resolver::{GenerationContext, ResolutionStrategy, TypeResolver};

/// 引数構造体が埋め込む型のインポートパス
pub const ARGS_DEF_IMPORT: &str = "github.com/ungerik/go-command";

/// DB接続型のインポートパス
pub const SQLX_IMPORT: &str = "github.com/jmoiron/sqlx";

/// 識別子配列ヘルパーの既定名（生成ファイル内に出力する）
pub const INLINE_ARRAY_HELPER: &str = "uuidSliceToPgString";

/// ヘルパーで配列リテラルへ変換するGo型
const IDENTIFIER_SLICE_TYPE: &str = "[]uuid.UUID";

/// ラッパー本体が使うローカル変数と名前付き戻り値
const BODY_LOCALS: [&str; 5] = ["db", "err", "result", "rows", "value"];

const GO_KEYWORDS: [&str; 25] = [
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// 衝突を避けたGoの引数名
///
/// 本体のローカル変数やGoの予約語と重なる場合は `Arg` を付ける。
pub fn parameter_name(argument: &FunctionArgument) -> String {
    let name = argument.go_name();
    if BODY_LOCALS.contains(&name.as_str()) || GO_KEYWORDS.contains(&name.as_str()) {
        format!("{}Arg", name)
    } else {
        name
    }
}

/// 合成オプション
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub package: String,
    pub args_def: bool,
    pub connection: ConnectionStyle,
    pub db_accessor: String,
    pub array_helper: Option<ArrayHelperConfig>,
}

impl SynthesisOptions {
    /// パッケージ名だけを指定して作成
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            args_def: false,
            connection: ConnectionStyle::Accessor,
            db_accessor: "getDB".to_string(),
            array_helper: None,
        }
    }
}

/// 型解決済みの引数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgument {
    /// データベース上の引数名
    pub name: String,
    pub go_name: String,
    pub exported_go_name: String,
    pub go_type: String,
}

impl ResolvedArgument {
    /// 配列リテラルヘルパー経由で渡す引数かどうか
    pub fn is_identifier_slice(&self) -> bool {
        self.go_type == IDENTIFIER_SLICE_TYPE
    }
}

/// 戻り値の形
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultShape {
    /// 戻り値なし
    None,
    /// 単一行（`struct_scan` はポインタ型への全列読み込み）
    Single { go_type: String, struct_scan: bool },
    /// 集合返却（`go_type` はスライス型、`elem` はその要素型）
    Rows {
        go_type: String,
        elem: String,
        struct_scan: bool,
    },
}

impl ResultShape {
    /// 宣言上の戻り値型
    pub fn go_type(&self) -> Option<&str> {
        match self {
            ResultShape::None => None,
            ResultShape::Single { go_type, .. } | ResultShape::Rows { go_type, .. } => {
                Some(go_type)
            }
        }
    }

    fn struct_scan(&self) -> bool {
        match self {
            ResultShape::None => false,
            ResultShape::Single { struct_scan, .. } | ResultShape::Rows { struct_scan, .. } => {
                *struct_scan
            }
        }
    }
}

/// 型解決済みのルーチン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFunction {
    pub function: Function,
    pub arguments: Vec<ResolvedArgument>,
    pub result: ResultShape,
}

impl ResolvedFunction {
    /// 引数と戻り値の型を解決
    ///
    /// SETOF の判定は解決前の型記述子で行う。
    /// 集合の要素は、ポインタ型か未知の型（そのまま出力）なら行構造体として読む。
    pub async fn resolve(
        function: Function,
        resolver: &TypeResolver<'_>,
        ctx: &mut GenerationContext,
    ) -> Self {
        let mut arguments = Vec::with_capacity(function.arguments.len());
        for argument in &function.arguments {
            arguments.push(ResolvedArgument {
                name: argument.name.clone(),
                go_name: parameter_name(argument),
                exported_go_name: argument.exported_go_name(),
                go_type: resolver.resolve(&argument.type_name, ctx).await,
            });
        }

        let result = if function.has_result() {
            let resolved = resolver.resolve_type(&function.result, ctx).await;
            let go_type = resolved.go_type;
            if TypeDescriptor::parse(&function.result).is_set_returning() {
                let elem = slice_elem(&go_type).to_string();
                let struct_scan =
                    is_pointer(&elem) || resolved.strategy == ResolutionStrategy::Passthrough;
                ResultShape::Rows {
                    go_type,
                    elem,
                    struct_scan,
                }
            } else {
                let struct_scan = is_pointer(&go_type);
                ResultShape::Single {
                    go_type,
                    struct_scan,
                }
            }
        } else {
            ResultShape::None
        };

        Self {
            function,
            arguments,
            result,
        }
    }
}

/// コード合成器
///
/// 関数ごとの宣言を蓄積し、最後に1つのソースファイルへまとめる。
#[derive(Debug, Clone)]
pub struct CodeSynthesizer {
    options: SynthesisOptions,
    decls: Vec<Decl>,
    needs_inline_helper: bool,
}

impl CodeSynthesizer {
    pub fn new(options: SynthesisOptions) -> Self {
        Self {
            options,
            decls: Vec::new(),
            needs_inline_helper: false,
        }
    }

    /// 1つのルーチンの宣言列を生成（引数構造体 + 関数）
    pub fn generate_function(&mut self, resolved: &ResolvedFunction, imports: &mut ImportSet) -> Vec<Decl> {
        let mut decls = Vec::new();
        let go_name = resolved.function.go_name();

        if self.options.args_def {
            imports.require(ARGS_DEF_IMPORT);
            decls.push(args_def_decl(&go_name, &resolved.arguments));
        }

        let mut params = Vec::with_capacity(resolved.arguments.len() + 1);
        if self.options.connection == ConnectionStyle::Parameter {
            imports.require(SQLX_IMPORT);
            params.push(Param::new("db", "*sqlx.DB"));
        }
        params.extend(
            resolved
                .arguments
                .iter()
                .map(|arg| Param::new(arg.go_name.clone(), arg.go_type.clone())),
        );

        let call_args = self.call_args(&resolved.arguments, imports);

        let results = match resolved.result.go_type() {
            Some(go_type) => Results::Named(vec![
                Param::new("result", go_type),
                Param::new("err", "error"),
            ]),
            None => Results::Unnamed(vec!["error".to_string()]),
        };

        decls.push(Decl::Func(FuncDecl {
            doc: doc_comment(&go_name, &resolved.function.description, &resolved.arguments),
            receiver: None,
            name: go_name,
            params,
            results,
            body: self.body(resolved, call_args),
        }));

        decls
    }

    /// 1つのルーチンをGoソース片として生成
    pub fn render_function(&mut self, resolved: &ResolvedFunction, imports: &mut ImportSet) -> String {
        let printer = GoPrinter::new();
        self.generate_function(resolved, imports)
            .iter()
            .map(|decl| printer.print_decl(decl))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// ルーチンを追加
    pub fn add_function(&mut self, resolved: &ResolvedFunction, imports: &mut ImportSet) {
        let decls = self.generate_function(resolved, imports);
        self.decls.extend(decls);
    }

    /// ソースファイルにまとめる
    ///
    /// 順序はENUM（名前順）、関数（追加順）、インラインヘルパー。
    pub fn finish(self, ctx: &GenerationContext) -> SourceFile {
        let mut decls = ctx.enums.decls();
        decls.extend(self.decls);
        if self.needs_inline_helper {
            decls.push(inline_array_helper());
        }
        SourceFile {
            package: self.options.package,
            imports: ctx.imports.iter().map(str::to_string).collect(),
            decls,
        }
    }

    /// ソースファイル全体を出力
    pub fn render(self, ctx: &GenerationContext) -> String {
        GoPrinter::new().print_file(&self.finish(ctx))
    }

    /// 位置パラメータに束縛する式
    fn call_args(&mut self, arguments: &[ResolvedArgument], imports: &mut ImportSet) -> Vec<Expr> {
        arguments
            .iter()
            .map(|arg| {
                if !arg.is_identifier_slice() {
                    return Expr::ident(arg.go_name.clone());
                }
                let helper = match &self.options.array_helper {
                    Some(helper) => {
                        imports.require(helper.import.clone());
                        helper.function.clone()
                    }
                    None => {
                        imports.require("strings");
                        self.needs_inline_helper = true;
                        INLINE_ARRAY_HELPER.to_string()
                    }
                };
                Expr::call(helper, vec![Expr::ident(arg.go_name.clone())])
            })
            .collect()
    }

    fn body(&self, resolved: &ResolvedFunction, call_args: Vec<Expr>) -> Vec<Stmt> {
        let function = &resolved.function;
        let has_result = resolved.result.go_type().is_some();
        let zero = match resolved.result.go_type() {
            Some(go_type) => zero_value(go_type).unwrap_or("result"),
            None => "",
        };
        let fail = |zero: &str| -> Vec<Expr> {
            if has_result {
                vec![Expr::ident(zero), Expr::ident("err")]
            } else {
                vec![Expr::ident("err")]
            }
        };

        let mut body = Vec::new();
        let accessor = self.options.connection == ConnectionStyle::Accessor;
        if accessor {
            body.push(Stmt::Define {
                names: vec!["db".to_string(), "err".to_string()],
                value: Expr::call(self.options.db_accessor.clone(), vec![]),
            });
            body.push(Stmt::return_on_err(fail(zero)));
        }

        let sql = query_sql(function, resolved.arguments.len(), resolved.result.struct_scan());
        let mut query_args = vec![Expr::str(sql)];
        query_args.extend(call_args);
        let db = Expr::ident("db");

        match &resolved.result {
            ResultShape::None => {
                let names = vec!["_".to_string(), "err".to_string()];
                let value = db.method("Exec", query_args);
                body.push(if accessor {
                    Stmt::Assign { names, value }
                } else {
                    Stmt::Define { names, value }
                });
                body.push(Stmt::Return(vec![Expr::ident("err")]));
            }
            ResultShape::Single {
                go_type,
                struct_scan: true,
            } => {
                body.push(Stmt::Assign {
                    names: vec!["result".to_string()],
                    value: Expr::call("new", vec![Expr::ident(deref(go_type))]),
                });
                body.push(Stmt::Assign {
                    names: vec!["err".to_string()],
                    value: db
                        .method("QueryRowx", query_args)
                        .method("StructScan", vec![Expr::ident("result")]),
                });
                body.push(Stmt::return_on_err(fail(zero)));
                body.push(Stmt::Return(vec![Expr::ident("result"), Expr::ident("nil")]));
            }
            ResultShape::Single { .. } => {
                body.push(Stmt::Assign {
                    names: vec!["err".to_string()],
                    value: db
                        .method("QueryRow", query_args)
                        .method("Scan", vec![Expr::ident("result").addr_of()]),
                });
                body.push(Stmt::return_on_err(fail(zero)));
                body.push(Stmt::Return(vec![Expr::ident("result"), Expr::ident("nil")]));
            }
            ResultShape::Rows {
                elem, struct_scan, ..
            } => {
                let query_method = if *struct_scan { "Queryx" } else { "Query" };
                body.push(Stmt::Define {
                    names: vec!["rows".to_string(), "err".to_string()],
                    value: db.method(query_method, query_args),
                });
                body.push(Stmt::return_on_err(fail(zero)));
                body.push(Stmt::Defer(Expr::ident("rows").method("Close", vec![])));

                let mut row_body = Vec::new();
                let scan = if is_pointer(elem) {
                    row_body.push(Stmt::Define {
                        names: vec!["value".to_string()],
                        value: Expr::call("new", vec![Expr::ident(deref(elem))]),
                    });
                    Expr::ident("rows").method("StructScan", vec![Expr::ident("value")])
                } else {
                    row_body.push(Stmt::Var {
                        name: "value".to_string(),
                        ty: elem.clone(),
                    });
                    let method = if *struct_scan { "StructScan" } else { "Scan" };
                    Expr::ident("rows").method(method, vec![Expr::ident("value").addr_of()])
                };
                row_body.push(Stmt::Assign {
                    names: vec!["err".to_string()],
                    value: scan,
                });
                row_body.push(Stmt::return_on_err(fail(zero)));
                row_body.push(Stmt::Assign {
                    names: vec!["result".to_string()],
                    value: Expr::call("append", vec![Expr::ident("result"), Expr::ident("value")]),
                });

                body.push(Stmt::For {
                    cond: Expr::ident("rows").method("Next", vec![]),
                    body: row_body,
                });
                let rows_err = Expr::ident("rows").method("Err", vec![]);
                body.push(Stmt::If {
                    cond: rows_err.clone().binary("!=", Expr::ident("nil")),
                    body: vec![Stmt::Return(vec![Expr::ident(zero), rows_err])],
                });
                body.push(Stmt::Return(vec![Expr::ident("result"), Expr::ident("nil")]));
            }
        }

        body
    }
}

/// 呼び出しSQL
///
/// 全列読み込みでは `SELECT * FROM` 形式にする。
fn query_sql(function: &Function, argument_count: usize, struct_scan: bool) -> String {
    let placeholders = (1..=argument_count)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    if struct_scan {
        format!("SELECT * FROM {}({})", function.qualified_name(), placeholders)
    } else {
        format!("SELECT {}({})", function.qualified_name(), placeholders)
    }
}

/// 関数コメント
///
/// 先頭文字を小文字にし、引数名をGoの識別子へ単純置換する。
fn doc_comment(go_name: &str, description: &Option<String>, arguments: &[ResolvedArgument]) -> Vec<String> {
    let Some(description) = description else {
        return vec![];
    };
    let mut chars = description.chars();
    let Some(first) = chars.next() else {
        return vec![];
    };
    let mut text: String = first.to_lowercase().chain(chars).collect();
    for arg in arguments {
        text = text.replace(&arg.name, &arg.go_name);
    }
    format!("{} {}", go_name, text)
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// 引数構造体の宣言
fn args_def_decl(go_name: &str, arguments: &[ResolvedArgument]) -> Decl {
    let name = format!("{}Args", go_name);
    Decl::VarStruct {
        doc: vec![format!("{} defines the arguments for {}", name, go_name)],
        name,
        embedded: vec!["command.ArgsDef".to_string()],
        fields: arguments
            .iter()
            .map(|arg| StructField {
                name: arg.exported_go_name.clone(),
                ty: arg.go_type.clone(),
                tag: Some(format!("arg:\"{}\"", arg.go_name)),
            })
            .collect(),
    }
}

/// 識別子スライスを `{"a","b"}` 形式へ変換するヘルパー（空なら `NULL`）
fn inline_array_helper() -> Decl {
    let b = || Expr::ident("b");
    Decl::Func(FuncDecl {
        doc: vec![format!(
            "{} formats ids as a PostgreSQL array literal",
            INLINE_ARRAY_HELPER
        )],
        receiver: None,
        name: INLINE_ARRAY_HELPER.to_string(),
        params: vec![Param::new("ids", IDENTIFIER_SLICE_TYPE)],
        results: Results::Unnamed(vec!["string".to_string()]),
        body: vec![
            Stmt::If {
                cond: Expr::call("len", vec![Expr::ident("ids")]).binary("==", Expr::ident("0")),
                body: vec![Stmt::Return(vec![Expr::str("NULL")])],
            },
            Stmt::Var {
                name: "b".to_string(),
                ty: "strings.Builder".to_string(),
            },
            Stmt::Expr(b().method("WriteString", vec![Expr::str("{")])),
            Stmt::Range {
                key: "i".to_string(),
                value: Some("id".to_string()),
                expr: Expr::ident("ids"),
                body: vec![
                    Stmt::If {
                        cond: Expr::ident("i").binary(">", Expr::ident("0")),
                        body: vec![Stmt::Expr(b().method("WriteString", vec![Expr::str(",")]))],
                    },
                    Stmt::Expr(b().method(
                        "WriteString",
                        vec![Expr::str("\"")
                            .binary("+", Expr::ident("id").method("String", vec![]))
                            .binary("+", Expr::str("\""))],
                    )),
                ],
            },
            Stmt::Expr(b().method("WriteString", vec![Expr::str("}")])),
            Stmt::Return(vec![b().method("String", vec![])]),
        ],
    })
}

// Goコードの中間表現
//
// 生成ロジックはこの構造を組み立てるだけで、テキスト化は go_printer が担当します。
// 生成に必要な構文だけを持つ最小限のサブセットです。

/// Go式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// 識別子やそのまま出力する式（`err`, `nil`, `time.Time{}` 等）
    Ident(String),
    /// 文字列リテラル（出力時にエスケープされる）
    Str(String),
    /// 関数呼び出し `callee(args...)`
    Call { callee: String, args: Vec<Expr> },
    /// メソッド呼び出し `recv.method(args...)`
    MethodCall {
        recv: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// アドレス演算 `&expr`
    AddrOf(Box<Expr>),
    /// 二項演算 `lhs op rhs`
    Binary {
        lhs: Box<Expr>,
        op: &'static str,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: callee.into(),
            args,
        }
    }

    pub fn method(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            recv: Box::new(self),
            method: method.into(),
            args,
        }
    }

    pub fn addr_of(self) -> Self {
        Expr::AddrOf(Box::new(self))
    }

    pub fn binary(self, op: &'static str, rhs: Expr) -> Self {
        Expr::Binary {
            lhs: Box::new(self),
            op,
            rhs: Box::new(rhs),
        }
    }
}

/// Go文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// 短縮変数宣言 `a, b := expr`
    Define { names: Vec<String>, value: Expr },
    /// 代入 `a, b = expr`
    Assign { names: Vec<String>, value: Expr },
    /// 変数宣言 `var name ty`
    Var { name: String, ty: String },
    /// `if cond { body }`
    If { cond: Expr, body: Vec<Stmt> },
    /// `for cond { body }`
    For { cond: Expr, body: Vec<Stmt> },
    /// `for key, value := range expr { body }`（`value` 省略時は `for key := range expr`）
    Range {
        key: String,
        value: Option<String>,
        expr: Expr,
        body: Vec<Stmt>,
    },
    /// `switch tag { case ...: body }`
    Switch { tag: Expr, cases: Vec<SwitchCase> },
    /// `defer expr`
    Defer(Expr),
    /// `return values...`
    Return(Vec<Expr>),
    /// 式文
    Expr(Expr),
}

impl Stmt {
    /// `if err != nil { return values... }`
    pub fn return_on_err(values: Vec<Expr>) -> Self {
        Stmt::If {
            cond: Expr::ident("err").binary("!=", Expr::ident("nil")),
            body: vec![Stmt::Return(values)],
        }
    }
}

/// switch の case 節
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchCase {
    pub values: Vec<Expr>,
    pub body: Vec<Stmt>,
}

/// 引数または名前付き戻り値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// 関数の戻り値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Results {
    /// 名前なしの型リスト（`error` など）
    Unnamed(Vec<String>),
    /// 名前付き戻り値（`(result T, err error)`）
    Named(Vec<Param>),
}

/// 関数宣言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub doc: Vec<String>,
    pub receiver: Option<Param>,
    pub name: String,
    pub params: Vec<Param>,
    pub results: Results,
    pub body: Vec<Stmt>,
}

/// 構造体フィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: String,
    pub tag: Option<String>,
}

/// 定数宣言の1項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstSpec {
    pub name: String,
    pub ty: String,
    pub value: Expr,
}

/// トップレベル宣言
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `type Name Underlying`
    Type {
        doc: Vec<String>,
        name: String,
        underlying: String,
    },
    /// `const ( ... )`
    Const(Vec<ConstSpec>),
    /// `var Name struct { Embedded; Fields... }`
    VarStruct {
        doc: Vec<String>,
        name: String,
        embedded: Vec<String>,
        fields: Vec<StructField>,
    },
    Func(FuncDecl),
}

/// 生成するGoソースファイル全体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: String,
    pub imports: Vec<String>,
    pub decls: Vec<Decl>,
}

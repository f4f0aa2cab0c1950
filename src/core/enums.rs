// ENUMレジストリ
//
// 型解決中に発見したPostgreSQLのENUM型を保持し、
// Goの名前付き文字列型・定数群・Valid() メソッドとして出力します。

use crate::core::go_ast::{ConstSpec, Decl, Expr, FuncDecl, Param, Results, Stmt, SwitchCase};
use crate::core::naming::exported_name;
use std::collections::HashMap;

/// ENUM型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    /// データベース上の型名（スキーマ修飾を含む場合あり）
    pub name: String,
    /// ラベル（カタログの並び順）
    pub values: Vec<String>,
}

impl Enum {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Goの型名（最後のドット区切り要素をエクスポート名に変換）
    pub fn go_name(&self) -> String {
        let last = match self.name.rfind('.') {
            Some(p) => &self.name[p + 1..],
            None => self.name.as_str(),
        };
        exported_name(last)
    }

    /// 定数名とラベルの組（宣言順）
    pub fn go_consts(&self) -> Vec<(String, &str)> {
        let base = self.go_name();
        self.values
            .iter()
            .map(|value| (format!("{}{}", base, exported_name(value)), value.as_str()))
            .collect()
    }

    /// 型宣言・定数・Valid() の宣言列
    pub fn decls(&self) -> Vec<Decl> {
        let go_name = self.go_name();
        let consts = self.go_consts();

        let type_decl = Decl::Type {
            doc: vec![],
            name: go_name.clone(),
            underlying: "string".to_string(),
        };

        let const_decl = Decl::Const(
            consts
                .iter()
                .map(|(name, value)| ConstSpec {
                    name: name.clone(),
                    ty: go_name.clone(),
                    value: Expr::str(*value),
                })
                .collect(),
        );

        let valid = FuncDecl {
            doc: vec![format!("Valid indicates if c is a valid {}", go_name)],
            receiver: Some(Param::new("c", go_name.clone())),
            name: "Valid".to_string(),
            params: vec![],
            results: Results::Unnamed(vec!["bool".to_string()]),
            body: vec![
                Stmt::Switch {
                    tag: Expr::ident("c"),
                    cases: vec![SwitchCase {
                        values: consts.iter().map(|(name, _)| Expr::ident(name)).collect(),
                        body: vec![Stmt::Return(vec![Expr::ident("true")])],
                    }],
                },
                Stmt::Return(vec![Expr::ident("false")]),
            ],
        };

        vec![type_decl, const_decl, Decl::Func(valid)]
    }
}

/// ENUMレジストリ
///
/// 1回の生成実行の間だけ存在し、型名をキーにENUMを保持する。
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    enums: HashMap<String, Enum>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// ENUMを登録し、そのGo型名を返す
    ///
    /// 同名のENUMが既にあれば上書きする（同一実行内では内容も同一）。
    /// ラベルが空のENUMは登録しない。
    pub fn register_or_reuse(&mut self, enum_type: Enum) -> Option<String> {
        if enum_type.values.is_empty() {
            return None;
        }
        let go_name = enum_type.go_name();
        self.enums.insert(enum_type.name.clone(), enum_type);
        Some(go_name)
    }

    pub fn get(&self, name: &str) -> Option<&Enum> {
        self.enums.get(name)
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    /// 名前順に並べたENUM
    pub fn sorted(&self) -> Vec<&Enum> {
        let mut sorted: Vec<&Enum> = self.enums.values().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    /// 名前順の宣言列
    pub fn decls(&self) -> Vec<Decl> {
        self.sorted().into_iter().flat_map(Enum::decls).collect()
    }
}

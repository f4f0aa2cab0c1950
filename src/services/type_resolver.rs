// 型解決サービス
//
// PostgreSQLの型記述子をGoの型へ解決します。
// 上書きテーブル → 組み込みテーブル → カタログのENUM → そのまま、の順に戦略を試し、
// 最初に一致した結果をコレクション修飾子で包んで返します。

use crate::adapters::catalog::EnumCatalog;
use crate::core::enums::{Enum, EnumRegistry};
use crate::core::error::DatabaseError;
use crate::core::go_types::{builtin_go_type, deref, known_import};
use crate::core::imports::ImportSet;
use crate::core::type_descriptor::TypeDescriptor;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 呼び出し側が与える上書きテーブル
#[derive(Debug, Clone, Default)]
pub struct TypeOverrides {
    /// PostgreSQL型名 -> Go型
    pub type_map: BTreeMap<String, String>,
    /// Go型 -> インポートパス
    pub type_imports: BTreeMap<String, String>,
}

impl TypeOverrides {
    pub fn new(type_map: BTreeMap<String, String>, type_imports: BTreeMap<String, String>) -> Self {
        Self {
            type_map,
            type_imports,
        }
    }

    /// Go型が要求するインポートパス
    ///
    /// 先頭のポインタマーカーを外してから、呼び出し側のテーブル、既知テーブルの順に引く。
    pub fn import_for(&self, go_type: &str) -> Option<&str> {
        let go_type = deref(go_type);
        self.type_imports
            .get(go_type)
            .map(String::as_str)
            .or_else(|| known_import(go_type))
    }
}

/// 1回の生成実行で共有する可変状態
#[derive(Debug, Default)]
pub struct GenerationContext {
    pub imports: ImportSet,
    pub enums: EnumRegistry,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 解決戦略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    Override,
    Builtin,
    CatalogEnum,
    Passthrough,
}

/// 戦略の評価順
pub const STRATEGY_ORDER: [ResolutionStrategy; 4] = [
    ResolutionStrategy::Override,
    ResolutionStrategy::Builtin,
    ResolutionStrategy::CatalogEnum,
    ResolutionStrategy::Passthrough,
];

/// 解決結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// コレクション修飾子で包んだGo型
    pub go_type: String,
    /// 一致した戦略
    pub strategy: ResolutionStrategy,
}

/// 戦略1つの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(String),
    NotMatched,
}

/// ENUM問い合わせの結果
#[derive(Debug)]
pub enum EnumLookup {
    /// ラベルが1つ以上見つかった
    Found(Vec<String>),
    /// ENUMではない（ラベル0件）
    Empty,
    /// 問い合わせ自体が失敗した
    Failed(DatabaseError),
}

/// 型リゾルバ
pub struct TypeResolver<'a> {
    overrides: &'a TypeOverrides,
    catalog: &'a dyn EnumCatalog,
}

impl<'a> TypeResolver<'a> {
    pub fn new(overrides: &'a TypeOverrides, catalog: &'a dyn EnumCatalog) -> Self {
        Self { overrides, catalog }
    }

    /// 型記述子をGo型へ解決
    ///
    /// 解決は失敗しない。どの戦略にも一致しなければ基底名をそのまま使う。
    pub async fn resolve(&self, descriptor: &str, ctx: &mut GenerationContext) -> String {
        self.resolve_type(descriptor, ctx).await.go_type
    }

    /// 型記述子を解決し、一致した戦略も返す
    pub async fn resolve_type(&self, descriptor: &str, ctx: &mut GenerationContext) -> ResolvedType {
        let parsed = TypeDescriptor::parse(descriptor);

        for strategy in STRATEGY_ORDER {
            if let Resolution::Matched(host_type) = self.apply(strategy, &parsed, ctx).await {
                debug!(
                    descriptor = %descriptor,
                    strategy = ?strategy,
                    go_type = %host_type,
                    "Resolved type"
                );
                return ResolvedType {
                    go_type: parsed.wrap_host_type(host_type),
                    strategy,
                };
            }
        }

        ResolvedType {
            go_type: parsed.wrap_host_type(parsed.base.clone()),
            strategy: ResolutionStrategy::Passthrough,
        }
    }

    async fn apply(
        &self,
        strategy: ResolutionStrategy,
        parsed: &TypeDescriptor,
        ctx: &mut GenerationContext,
    ) -> Resolution {
        match strategy {
            ResolutionStrategy::Override => match self.overrides.type_map.get(&parsed.base) {
                Some(go_type) => self.matched_with_import(go_type, ctx),
                None => Resolution::NotMatched,
            },
            ResolutionStrategy::Builtin => match builtin_go_type(&parsed.base) {
                Some(go_type) => self.matched_with_import(go_type, ctx),
                None => Resolution::NotMatched,
            },
            ResolutionStrategy::CatalogEnum => match self.lookup_enum(parsed).await {
                EnumLookup::Found(labels) => {
                    match ctx.enums.register_or_reuse(Enum::new(parsed.base.clone(), labels)) {
                        Some(go_name) => Resolution::Matched(go_name),
                        None => Resolution::NotMatched,
                    }
                }
                EnumLookup::Empty => Resolution::NotMatched,
                EnumLookup::Failed(e) => {
                    warn!(
                        type_name = %parsed.base,
                        error = %e,
                        "Enum lookup failed, passing the type name through"
                    );
                    Resolution::NotMatched
                }
            },
            ResolutionStrategy::Passthrough => Resolution::Matched(parsed.base.clone()),
        }
    }

    fn matched_with_import(&self, go_type: &str, ctx: &mut GenerationContext) -> Resolution {
        if let Some(import) = self.overrides.import_for(go_type) {
            ctx.imports.require(import);
        }
        Resolution::Matched(go_type.to_string())
    }

    /// カタログからENUMラベルを取得
    pub async fn lookup_enum(&self, parsed: &TypeDescriptor) -> EnumLookup {
        let (schema, type_name) = parsed.split_qualified();
        match self.catalog.enum_labels(schema, type_name).await {
            Ok(labels) if labels.is_empty() => EnumLookup::Empty,
            Ok(labels) => EnumLookup::Found(labels),
            Err(e) => EnumLookup::Failed(e),
        }
    }
}

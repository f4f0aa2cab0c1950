// 統合テスト共通ヘルパー
//
// カタログをメモリ上のテーブルで置き換える。

#![allow(dead_code)]

use async_trait::async_trait;
use pgfuncgen::adapters::catalog::{EnumCatalog, RawRoutineRow, RoutineCatalog};
use pgfuncgen::core::error::DatabaseError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// インメモリのカタログ
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    routines: HashMap<String, Vec<RawRoutineRow>>,
    enums: HashMap<String, Vec<String>>,
    fail_enums: bool,
    routine_calls: AtomicUsize,
    enum_calls: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルーチンを登録（`schema.name` 形式）
    pub fn with_routine(mut self, qualified: &str, arguments: &str, result: &str) -> Self {
        self.routines
            .entry(qualified.to_string())
            .or_default()
            .push(RawRoutineRow {
                arguments: arguments.to_string(),
                result: result.to_string(),
                kind: "normal".to_string(),
                description: None,
            });
        self
    }

    /// 説明付きのルーチンを登録
    pub fn with_described_routine(
        mut self,
        qualified: &str,
        arguments: &str,
        result: &str,
        description: &str,
    ) -> Self {
        self.routines
            .entry(qualified.to_string())
            .or_default()
            .push(RawRoutineRow {
                arguments: arguments.to_string(),
                result: result.to_string(),
                kind: "normal".to_string(),
                description: Some(description.to_string()),
            });
        self
    }

    /// ENUMを登録（スキーマ修飾なしの名前、または `schema.name`）
    pub fn with_enum(mut self, name: &str, labels: &[&str]) -> Self {
        self.enums.insert(
            name.to_string(),
            labels.iter().map(|l| l.to_string()).collect(),
        );
        self
    }

    /// ENUM問い合わせを常に失敗させる
    pub fn failing_enums(mut self) -> Self {
        self.fail_enums = true;
        self
    }

    pub fn routine_calls(&self) -> usize {
        self.routine_calls.load(Ordering::SeqCst)
    }

    pub fn enum_calls(&self) -> usize {
        self.enum_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutineCatalog for InMemoryCatalog {
    async fn fetch_routine(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Vec<RawRoutineRow>, DatabaseError> {
        self.routine_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .routines
            .get(&format!("{}.{}", namespace, name))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl EnumCatalog for InMemoryCatalog {
    async fn enum_labels(
        &self,
        schema: Option<&str>,
        type_name: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        self.enum_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_enums {
            return Err(DatabaseError::Query {
                message: "connection reset".to_string(),
                sql: None,
            });
        }

        let key = match schema {
            Some(schema) => format!("{}.{}", schema, type_name),
            None => type_name.to_string(),
        };
        Ok(self.enums.get(&key).cloned().unwrap_or_default())
    }
}

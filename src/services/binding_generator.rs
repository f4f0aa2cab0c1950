// バインディング生成パイプライン
//
// 指定されたルーチンを順にイントロスペクトし、型解決・コード合成を行い、
// 全ルーチンの合成が成功した場合だけファイルを書き出してフォーマッタを起動します。

use crate::adapters::catalog::{EnumCatalog, RoutineCatalog};
use crate::adapters::source_writer::SourceWriter;
use crate::core::error::GenerateError;
use crate::services::code_synthesizer::{CodeSynthesizer, ResolvedFunction, SynthesisOptions};
use crate::services::function_introspector::FunctionIntrospector;
use crate::services::type_resolver::{GenerationContext, TypeOverrides, TypeResolver};
use std::path::PathBuf;
use tracing::{debug, info};

/// 生成リクエスト
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 対象ルーチン名（呼び出し順に出力される）
    pub functions: Vec<String>,
    /// 出力先ファイル
    pub output: PathBuf,
    pub options: SynthesisOptions,
    pub overrides: TypeOverrides,
    /// 書き込みとフォーマットを行わない
    pub dry_run: bool,
}

/// 生成結果
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output: PathBuf,
    /// 生成したGo関数名
    pub functions: Vec<String>,
    /// 生成したENUM型の数
    pub enum_count: usize,
    /// 生成したソース（フォーマット前）
    pub source: String,
    /// ファイルに書き込んだかどうか
    pub written: bool,
}

/// 合成結果
#[derive(Debug, Clone)]
pub struct SynthesizedSource {
    pub functions: Vec<String>,
    pub enum_count: usize,
    pub source: String,
}

/// バインディング生成サービス
pub struct BindingGenerator<'a> {
    routines: &'a dyn RoutineCatalog,
    enums: &'a dyn EnumCatalog,
    writer: SourceWriter,
}

impl<'a> BindingGenerator<'a> {
    pub fn new(
        routines: &'a dyn RoutineCatalog,
        enums: &'a dyn EnumCatalog,
        writer: SourceWriter,
    ) -> Self {
        Self {
            routines,
            enums,
            writer,
        }
    }

    /// 全ルーチンを合成してソースを返す（I/Oなし）
    ///
    /// いずれかのルーチンで失敗した時点で中断する。
    pub async fn synthesize(
        &self,
        request: &GenerationRequest,
    ) -> Result<SynthesizedSource, GenerateError> {
        if request.functions.is_empty() {
            return Err(GenerateError::NoFunctions);
        }

        let introspector = FunctionIntrospector::new(self.routines);
        let mut functions = Vec::with_capacity(request.functions.len());
        for name in &request.functions {
            functions.push(introspector.introspect(name).await?);
        }

        let resolver = TypeResolver::new(&request.overrides, self.enums);
        let mut ctx = GenerationContext::new();
        let mut synthesizer = CodeSynthesizer::new(request.options.clone());
        let mut go_names = Vec::with_capacity(functions.len());

        for function in functions {
            let resolved = ResolvedFunction::resolve(function, &resolver, &mut ctx).await;
            debug!(
                function = %resolved.function.qualified_name(),
                result = ?resolved.result,
                "Synthesizing wrapper"
            );
            go_names.push(resolved.function.go_name());
            synthesizer.add_function(&resolved, &mut ctx.imports);
        }

        let enum_count = ctx.enums.len();
        let source = synthesizer.render(&ctx);

        Ok(SynthesizedSource {
            functions: go_names,
            enum_count,
            source,
        })
    }

    /// 合成してファイルに書き出す
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReport, GenerateError> {
        let synthesized = self.synthesize(request).await?;

        if !request.dry_run {
            self.writer
                .write_and_format(&request.output, &synthesized.source)
                .await?;
            info!(
                path = %request.output.display(),
                functions = synthesized.functions.len(),
                "Generated file"
            );
        }

        Ok(GenerationReport {
            output: request.output.clone(),
            functions: synthesized.functions,
            enum_count: synthesized.enum_count,
            source: synthesized.source,
            written: !request.dry_run,
        })
    }
}

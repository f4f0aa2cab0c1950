// generateコマンドハンドラー
//
// 設定とコマンドライン引数から生成リクエストを組み立て、
// データベースに接続してGoラッパーを生成します。

use crate::adapters::catalog::PostgresCatalog;
use crate::adapters::database::DatabaseConnectionService;
use crate::adapters::source_writer::SourceWriter;
use crate::cli::command_context::CommandContext;
use crate::cli::commands::render_output;
use crate::cli::OutputFormat;
use crate::services::binding_generator::{BindingGenerator, GenerationReport, GenerationRequest};
use crate::services::code_synthesizer::SynthesisOptions;
use crate::services::database_config_resolver::DatabaseConfigResolver;
use crate::services::type_resolver::TypeOverrides;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// generateコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 設定ファイルのパス（未指定なら既定）
    pub config_path: Option<PathBuf>,
    /// 対象ルーチン（空なら設定の一覧）
    pub functions: Vec<String>,
    /// 出力ファイルの上書き
    pub output: Option<PathBuf>,
    /// パッケージ名の上書き
    pub package: Option<String>,
    /// 引数構造体を出力
    pub args_def: bool,
    /// 書き込まずにソースを表示
    pub dry_run: bool,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// 生成結果のサマリ（JSON出力用）
#[derive(Debug, Serialize)]
pub struct GenerateSummary {
    pub output: String,
    pub functions: Vec<String>,
    pub enums: usize,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// generateコマンドハンドラー
#[derive(Debug, Default)]
pub struct GenerateCommandHandler {}

impl GenerateCommandHandler {
    /// 新しいGenerateCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// generateコマンドを実行
    pub async fn execute(&self, command: &GenerateCommand) -> Result<String> {
        let context = CommandContext::load(command.project_path.clone(), command.config_path.clone())?;
        let request = self.build_request(&context, command);

        debug!(
            functions = request.functions.len(),
            output = %request.output.display(),
            dry_run = request.dry_run,
            "Starting generation"
        );

        let resolved = DatabaseConfigResolver::resolve(&context.config.database);
        let connection_service = DatabaseConnectionService::new();
        let pool = connection_service
            .create_pool(&resolved.config, resolved.url.as_deref())
            .await
            .with_context(|| "Failed to connect to database")?;

        let catalog = PostgresCatalog::new(pool.clone());
        let writer = SourceWriter::new(context.config.formatter.clone());
        let generator = BindingGenerator::new(&catalog, &catalog, writer);
        let result = generator.generate(&request).await;

        connection_service.close_pool(pool).await;

        let report = result.with_context(|| "Failed to generate Go wrappers")?;
        self.format_report(&report, command.format)
    }

    /// 設定とコマンドライン引数から生成リクエストを組み立て
    ///
    /// コマンドライン引数が設定より優先される。
    pub fn build_request(&self, context: &CommandContext, command: &GenerateCommand) -> GenerationRequest {
        let config = &context.config;

        let functions = if command.functions.is_empty() {
            config.functions.clone()
        } else {
            command.functions.clone()
        };

        let output = match &command.output {
            Some(path) => context.resolve_path(path),
            None => context.output_file(),
        };

        let options = SynthesisOptions {
            package: command
                .package
                .clone()
                .unwrap_or_else(|| config.output.package.clone()),
            args_def: command.args_def || config.output.args_def,
            connection: config.output.connection,
            db_accessor: config.output.db_accessor.clone(),
            array_helper: config.output.array_helper.clone(),
        };

        GenerationRequest {
            functions,
            output,
            options,
            overrides: TypeOverrides::new(config.type_map.clone(), config.type_imports.clone()),
            dry_run: command.dry_run,
        }
    }

    /// 生成結果を出力用に整形
    pub fn format_report(&self, report: &GenerationReport, format: OutputFormat) -> Result<String> {
        let summary = GenerateSummary {
            output: report.output.display().to_string(),
            functions: report.functions.clone(),
            enums: report.enum_count,
            written: report.written,
            source: (!report.written).then(|| report.source.clone()),
        };

        let text = if report.written {
            format!(
                "{} {} ({} functions, {} enums)",
                "Generated".green().bold(),
                report.output.display(),
                report.functions.len(),
                report.enum_count
            )
        } else {
            report.source.trim_end().to_string()
        };

        render_output(format, &summary, text)
    }
}

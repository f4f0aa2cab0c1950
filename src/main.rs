use anyhow::{Context, Result};
use clap::Parser;
use colored::control as color_control;
use pgfuncgen::cli::commands::generate::{GenerateCommand, GenerateCommandHandler};
use pgfuncgen::cli::commands::init::{InitCommand, InitCommandHandler};
use pgfuncgen::cli::commands::render_output;
use pgfuncgen::cli::{Cli, Commands};
use serde_json::json;
use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// ログレベルを指定する環境変数（未設定なら RUST_LOG）
const LOG_ENV: &str = "PGFUNCGEN_LOG";

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // 非同期ランタイムを作成して実行
    let runtime = tokio::runtime::Runtime::new()
        .context("Failed to create Tokio runtime")
        .unwrap_or_else(|e| {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        });

    let result = runtime.block_on(run_command(cli));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// トレーシングサブスクライバーを初期化（出力先はstderr）
fn init_logging(verbose: bool) {
    let env_var = if env::var_os(LOG_ENV).is_some() {
        LOG_ENV
    } else {
        EnvFilter::DEFAULT_ENV
    };

    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(env_var)
        .from_env_lossy();
    if verbose {
        filter = filter.add_directive(LevelFilter::DEBUG.into());
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// コマンドを実行する
async fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    // --config フラグの処理（絶対パスに変換）
    let config_path: Option<PathBuf> = cli.config.map(|p| {
        if p.is_absolute() {
            p
        } else {
            project_path.join(p)
        }
    });

    match cli.command {
        Commands::Init { force } => {
            let handler = InitCommandHandler::new();
            let command = InitCommand {
                project_path,
                config_path,
                force,
            };
            let message = handler.execute(&command)?;
            render_output(cli.format, &json!({ "message": message }), message)
        }

        Commands::Generate {
            functions,
            output,
            package,
            args_def,
            dry_run,
        } => {
            let handler = GenerateCommandHandler::new();
            let command = GenerateCommand {
                project_path,
                config_path,
                functions,
                output,
                package,
                args_def,
                dry_run,
                format: cli.format,
            };
            handler.execute(&command).await
        }
    }
}

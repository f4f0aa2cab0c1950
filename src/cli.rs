// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod command_context;
pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 出力フォーマット
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

/// pgfuncgen - Go wrappers for PostgreSQL functions
///
/// Introspects stored functions in a PostgreSQL database and generates
/// type-safe Go wrapper functions for calling them through sqlx.
#[derive(Parser, Debug)]
#[command(name = "pgfuncgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate Go wrappers for PostgreSQL stored functions")]
#[command(long_about = "pgfuncgen - Go wrappers for PostgreSQL stored functions

Reads function signatures from the PostgreSQL catalog and writes one Go
source file with a wrapper per function. Enum types used by the functions
are emitted as Go string types with constants and a Valid() method.")]
#[command(propagate_version = true)]
#[command(after_help = "GETTING STARTED:
  1. Create a config file:          pgfuncgen init
  2. List functions and output:     Edit .pgfuncgen.yaml
  3. Generate wrappers:             pgfuncgen generate

For detailed help on each command, use: pgfuncgen <command> --help")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format (text or json)
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a starter configuration file
    ///
    /// Writes .pgfuncgen.yaml into the current directory.
    ///
    /// EXAMPLES:
    ///   pgfuncgen init
    ///
    ///   # Overwrite an existing config
    ///   pgfuncgen init --force
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate Go wrappers for stored functions
    ///
    /// Introspects every requested function, resolves argument and result
    /// types, and writes a single Go file. Nothing is written unless every
    /// function succeeds.
    ///
    /// EXAMPLES:
    ///   # Generate the functions listed in the config
    ///   pgfuncgen generate
    ///
    ///   # Generate specific functions
    ///   pgfuncgen generate ops.refresh_cache get_user
    ///
    ///   # Preview the source without writing it
    ///   pgfuncgen generate --dry-run
    Generate {
        /// Functions to generate (`name` or `schema.name`); replaces the configured list
        #[arg(value_name = "FUNCTION")]
        functions: Vec<String>,

        /// Output Go file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Go package name
        #[arg(short, long, value_name = "NAME")]
        package: Option<String>,

        /// Emit a command.ArgsDef struct per function
        #[arg(long)]
        args_def: bool,

        /// Print the generated source without writing or formatting it
        #[arg(long)]
        dry_run: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "pgfuncgen",
            "generate",
            "ops.refresh_cache",
            "get_user",
            "--output",
            "db/functions.go",
            "--package",
            "db",
            "--args-def",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                functions,
                output,
                package,
                args_def,
                dry_run,
            } => {
                assert_eq!(functions, vec!["ops.refresh_cache", "get_user"]);
                assert_eq!(output, Some(PathBuf::from("db/functions.go")));
                assert_eq!(package.as_deref(), Some("db"));
                assert!(args_def);
                assert!(dry_run);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "pgfuncgen",
            "init",
            "--force",
            "--verbose",
            "--no-color",
            "--config",
            "custom.yaml",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}

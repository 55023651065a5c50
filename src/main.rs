mod cli;
mod commands;
mod presentation;

use anyhow::Result;
use deepword::config::UserConfig;
use deepword::config::error::ConfigError;
use deepword::{ApiError, DomainError, MediaError};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let (args, flags) = cli::split_flags(&args);

    init_tracing();

    if let Err(e) = run(&args, flags).await {
        handle_error(e, flags.machine);
    }
}

/// アプリケーションのメイン処理
async fn run(args: &[String], flags: cli::GlobalFlags) -> Result<()> {
    let result = cli::parse_args(args, flags).await?;
    presentation::output::output_result(&result, flags.machine)
}

/// ログ出力の初期化（stderr）
///
/// RUST_LOG があればそれを優先し、なければユーザー設定のログレベルを使う。
/// 設定ファイルは作成しない。読み込みに失敗してもここでは止めない
/// （ネットワークを使うコマンド側で改めて報告される）。
fn init_tracing() {
    let level = match UserConfig::load_existing() {
        Ok(Some(config)) => config.effective_log_level(),
        _ => deepword::config::APP_CONFIG.logging.level.clone(),
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("deepword={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    if machine_output {
        let json = serde_json::json!({
            "success": false,
            "error": error.to_string(),
            "causes": error.chain().skip(1).map(|c| c.to_string()).collect::<Vec<_>>(),
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
    } else {
        eprintln!("Error: {}", error);

        // エラーチェーンを辿って詳細を表示
        let chain: Vec<_> = error.chain().skip(1).collect();
        if !chain.is_empty() {
            eprintln!("\nCaused by:");
            for (i, cause) in chain.iter().enumerate() {
                eprintln!("  {}: {}", i + 1, cause);
            }
        }

        if let Some(hint) = hint {
            eprintln!("\nHint: {}", hint);
        }
    }

    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<ApiError>() {
            return e.severity().exit_code();
        }
        if let Some(e) = cause.downcast_ref::<MediaError>() {
            return e.severity().exit_code();
        }
        if let Some(e) = cause.downcast_ref::<DomainError>() {
            return e.severity().exit_code();
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.severity().exit_code();
        }
    }

    // 不明なエラーの場合はデフォルトの終了コード
    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        let hint = if let Some(e) = cause.downcast_ref::<ApiError>() {
            e.hint()
        } else if let Some(e) = cause.downcast_ref::<MediaError>() {
            e.hint()
        } else if let Some(e) = cause.downcast_ref::<DomainError>() {
            e.hint()
        } else if let Some(e) = cause.downcast_ref::<ConfigError>() {
            e.hint()
        } else {
            None
        };

        if let Some(hint) = hint {
            return Some(hint.to_string());
        }
    }

    None
}

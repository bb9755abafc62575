mod config;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use config::Cli;
use deploywatch_cloudflare::CloudflarePagesProvider;
use deploywatch_core::{
    ReconcileOutcome, ReconciliationState, Reconciler, StatusProvider, emit_deployment_outputs,
};
use deploywatch_github::{ActionsOutput, GithubDeploymentStatus};
use std::process::ExitCode;

/// プロバイダーがデプロイ失敗を返した、または入力が不正
const EXIT_FAILED: u8 = 1;
/// 最大試行回数に達しても結果が確定しなかった
const EXIT_UNKNOWN: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help / --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            // 終了コード 2 は状態不明用なので、入力エラーは 1 で終了する
            let _ = e.print();
            return Ok(ExitCode::from(EXIT_FAILED));
        }
    };

    // stdoutはCIの出力用に空けておき、ログはstderrに出力
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let identity = cli.identity();
    let poll_config = cli.poll_config();
    poll_config.validate()?;

    let provider = CloudflarePagesProvider::new(cli.pages_config())
        .context("Cloudflare Pages クライアントの初期化に失敗しました")?;
    let github_config = cli
        .github_config()
        .context("GitHub の設定が不正です")?;
    let sink = GithubDeploymentStatus::new(github_config)
        .context("GitHub クライアントの初期化に失敗しました")?;

    let outcome = Reconciler::new(&provider, &sink, poll_config)
        .run(&identity)
        .await;

    let mut outputs = ActionsOutput::from_env();
    emit_deployment_outputs(&mut outputs, provider.name(), &outcome)
        .context("ステップ出力の書き込みに失敗しました")?;

    print_summary(provider.display_name(), &outcome);
    Ok(exit_code(&outcome))
}

fn exit_code(outcome: &ReconcileOutcome) -> ExitCode {
    match outcome.state {
        ReconciliationState::Succeeded => ExitCode::SUCCESS,
        ReconciliationState::Failed => ExitCode::from(EXIT_FAILED),
        _ => ExitCode::from(EXIT_UNKNOWN),
    }
}

fn print_summary(provider: &str, outcome: &ReconcileOutcome) {
    match outcome.state {
        ReconciliationState::Succeeded => {
            eprintln!(
                "{} {} デプロイ成功 ({} 回目)",
                "✓".green().bold(),
                provider,
                outcome.attempts
            );
            if let Some(url) = &outcome.deployment_url {
                eprintln!("  {}", url.cyan());
            }
        }
        ReconciliationState::Failed => {
            eprintln!(
                "{} {} デプロイ失敗 ({} 回目)",
                "✗".red().bold(),
                provider,
                outcome.attempts
            );
        }
        _ => {
            eprintln!(
                "{} {} デプロイ状態不明: {} 回試行しても完了しませんでした",
                "⚠".yellow().bold(),
                provider,
                outcome.attempts
            );
        }
    }
}

mod cli;

use clap::Parser;
use png_normalizer::report::StatusReporter;
use png_normalizer::workflow;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() {
    // 診断ログは標準エラーへ。進捗表示 (標準出力) とは混ざらない
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // コマンドライン引数を解析します
    let settings = cli::Args::parse().into_settings();

    let mut reporter = StatusReporter::new(io::stdout().lock());
    match workflow::run(&settings, &mut reporter) {
        Ok(outcome) => {
            // 個々のファイルの失敗は終了コードに影響しない
            for file in outcome.files() {
                match file.result() {
                    Ok(destination) => {
                        tracing::debug!(file = file.file_name(), destination = %destination.display(), "written")
                    }
                    Err(e) => tracing::debug!(file = file.file_name(), error = %e, "failed"),
                }
            }
            tracing::debug!(
                succeeded = outcome.succeeded(),
                failed = outcome.failures().count(),
                "exiting"
            );
        }
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            std::process::exit(1);
        }
    }
}

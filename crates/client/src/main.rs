use clap::Parser;
use std::process::ExitCode;
use stockwatch_client::cli::Cli;
use stockwatch_client::commands;
use stockwatch_core::common::tls::install_crypto_provider;
use tracing_subscriber::EnvFilter;

// 客户端日志写 stderr，默认只输出告警，保持命令输出干净
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    install_crypto_provider();

    let mut stdout = std::io::stdout();
    match commands::run(&cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

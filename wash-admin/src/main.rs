//! wash-admin: terminal console for the car-wash kiosk network

mod cli;
mod commands;
mod context;
mod logger;
mod render;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    // 1. .env 优先于默认值, 命令行参数优先于 .env
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 2. 日志
    let _log_guard = logger::init_logger(cli.log_level.as_deref(), cli.log_json, cli.log_dir.as_deref());

    // 3. 执行命令
    if let Err(e) = commands::run(cli).await {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {}", context::describe(&e));
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

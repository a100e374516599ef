//! Logging setup
//!
//! Console output by default; `--log-dir` switches to a daily rolling file.
//! `RUST_LOG` overrides the level given on the command line.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "wash_admin=info,wash_client=info";

/// Initialize the subscriber
///
/// The returned guard flushes the file writer and must live until exit.
pub fn init_logger(level: Option<&str>, json: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let directives = match level {
        Some(level) => format!("wash_admin={level},wash_client={level}"),
        None => DEFAULT_DIRECTIVES.to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && dir.is_dir()
    {
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "wash-admin"));
        let builder = builder.with_writer(writer).with_ansi(false);
        if json {
            builder.json().init();
        } else {
            builder.init();
        }
        return Some(guard);
    }

    // Console logs go to stderr so tables on stdout stay clean
    let builder = builder.with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    None
}

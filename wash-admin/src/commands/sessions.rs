//! Live wash sessions

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use wash_client::{SessionMonitor, SessionSnapshot};

use super::confirm;
use crate::cli::{SessionCommand, StatusFilter};
use crate::context::Context;
use crate::render::{self, Row, SessionLine};

/// Elapsed-time labels are redrawn this often between fetches
const DISPLAY_TICK: Duration = Duration::from_secs(1);

pub async fn run(ctx: &mut Context, cmd: SessionCommand) -> Result<()> {
    ctx.profile()?;
    match cmd {
        SessionCommand::Watch { status } => watch(ctx, status).await,
        SessionCommand::Stop { id, yes } => stop(ctx, &id, yes).await,
    }
}

/// Stop after confirmation, then show what is still running
async fn stop(ctx: &mut Context, id: &str, yes: bool) -> Result<()> {
    if !confirm(&format!("Stop session {}?", id), yes)? {
        println!("Cancelled");
        return Ok(());
    }

    let monitor = SessionMonitor::new(ctx.client().clone());
    let result = monitor.stop(id).await;
    let session = ctx.check(result)?;
    println!("Session {}: {}", session.id, session.status.label());

    let snapshot = monitor.snapshot();
    if let Some(error) = &snapshot.error {
        println!("! {}", error);
    }
    print!("{}", session_table(&snapshot, Utc::now()));
    Ok(())
}

async fn watch(ctx: &Context, status: StatusFilter) -> Result<()> {
    let monitor = SessionMonitor::new(ctx.client().clone()).with_status(status.0);
    let poller = monitor.spawn();

    let mut display = tokio::time::interval(DISPLAY_TICK);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = display.tick() => draw(&monitor.snapshot())?,
        }
    }

    monitor.shutdown();
    poller.await?;
    Ok(())
}

fn draw(snapshot: &SessionSnapshot) -> Result<()> {
    let now = Utc::now();
    let mut out = io::stdout().lock();
    write!(out, "\x1b[2J\x1b[H")?;

    let filter = snapshot.status.map_or("all", |s| s.as_str());
    let updated = snapshot
        .fetched_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    writeln!(out, "Wash sessions [{}]  updated {}", filter, updated)?;
    if let Some(error) = &snapshot.error {
        writeln!(out, "! {}", error)?;
    }

    write!(out, "{}", session_table(snapshot, now))?;
    writeln!(out, "\nCtrl+C to exit")?;
    out.flush()?;
    Ok(())
}

fn session_table(snapshot: &SessionSnapshot, now: DateTime<Utc>) -> String {
    let rows: Vec<Vec<String>> = snapshot
        .sessions
        .iter()
        .map(|session| SessionLine { session, now }.cells())
        .collect();
    if rows.is_empty() && !snapshot.loading {
        return "No sessions\n".to_string();
    }
    render::table(SessionLine::HEADERS, &rows)
}

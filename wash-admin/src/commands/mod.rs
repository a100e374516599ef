//! Command handlers

mod auth;
mod entities;
mod kiosks;
mod payments;
mod sessions;
mod stats;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use shared::models::ARCHIVE_WARNING;
use wash_client::{PAGE_SIZES, TableState};

use crate::cli::{Cli, Command};
use crate::context::Context;

pub async fn run(cli: Cli) -> Result<()> {
    let mut ctx = Context::open(&cli).await?;
    match cli.command {
        Command::Login { email, password } => auth::login(&mut ctx, &email, password).await,
        Command::Logout => auth::logout(&mut ctx),
        Command::Whoami => auth::whoami(&ctx),
        Command::Stats => stats::run(&mut ctx).await,
        Command::Orgs(cmd) => entities::organizations(&mut ctx, cmd).await,
        Command::Branches(cmd) => entities::branches(&mut ctx, cmd).await,
        Command::Devices(cmd) => entities::devices(&mut ctx, cmd).await,
        Command::Services(cmd) => entities::services(&mut ctx, cmd).await,
        Command::Promotions(cmd) => entities::promotions(&mut ctx, cmd).await,
        Command::Users(cmd) => entities::users(&mut ctx, cmd).await,
        Command::Kiosks(cmd) => kiosks::run(&mut ctx, cmd).await,
        Command::Payments(cmd) => payments::run(&mut ctx, cmd).await,
        Command::Sessions(cmd) => sessions::run(&mut ctx, cmd).await,
        Command::Upload { file } => upload(&mut ctx, &file).await,
    }
}

/// Table state from the list flags
fn table_state(search: &str, page: usize, page_size: usize) -> Result<TableState> {
    let mut state = TableState::new();
    if !state.set_page_size(page_size) {
        bail!("Page size must be one of {:?}", PAGE_SIZES);
    }
    state.set_query(search);
    state.set_page(page);
    Ok(state)
}

/// Ask before archiving; `yes` skips the prompt
fn confirm_archive(what: &str, id: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    println!("{}", ARCHIVE_WARNING);
    confirm(&format!("Archive {} {}?", what, id), false)
}

/// y/N question on stdin; `yes` answers it up front
fn confirm(question: &str, yes: bool) -> Result<bool> {
    confirm_from(&mut io::stdin().lock(), question, yes)
}

fn confirm_from(input: &mut impl BufRead, question: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let answer = read_line_from(input)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn read_line() -> Result<String> {
    read_line_from(&mut io::stdin().lock())
}

fn read_line_from(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn upload(ctx: &mut Context, file: &Path) -> Result<()> {
    ctx.profile()?;
    let url = upload_file(ctx, file).await?;
    println!("{}", url);
    Ok(())
}

/// Upload a local file, returning its absolute URL
async fn upload_file(ctx: &mut Context, file: &Path) -> Result<String> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Cannot read {}", file.display()))?;
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let result = ctx.api().upload_file(&name, bytes).await;
    ctx.check(result)
}

/// Upload an optional image flag
async fn upload_opt(ctx: &mut Context, file: Option<&Path>) -> Result<Option<String>> {
    match file {
        Some(file) => Ok(Some(upload_file(ctx, file).await?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_state_from_flags() {
        let state = table_state("yunus", 3, 50).unwrap();
        assert_eq!(state.query(), "yunus");
        assert_eq!(state.page(), 3);
        assert_eq!(state.page_size(), 50);

        assert!(table_state("", 1, 7).is_err());
    }

    #[test]
    fn test_confirm_skipped_with_yes() {
        assert!(confirm_archive("branch", "b1", true).unwrap());
        assert!(confirm_from(&mut io::empty(), "Stop session s1?", true).unwrap());
    }

    #[test]
    fn test_confirm_reads_answer() {
        let mut yes = io::Cursor::new("Y\n");
        assert!(confirm_from(&mut yes, "Stop session s1?", false).unwrap());

        let mut no = io::Cursor::new("n\n");
        assert!(!confirm_from(&mut no, "Stop session s1?", false).unwrap());

        // EOF or a bare enter keeps the default
        assert!(!confirm_from(&mut io::empty(), "Stop session s1?", false).unwrap());
        let mut enter = io::Cursor::new("\n");
        assert!(!confirm_from(&mut enter, "Stop session s1?", false).unwrap());
    }
}

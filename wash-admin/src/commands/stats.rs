//! Dashboard counts

use anyhow::Result;
use wash_client::api::NetworkStats;

use crate::context::Context;
use crate::render;

pub async fn run(ctx: &mut Context) -> Result<()> {
    let scope = ctx.scope(None)?;
    let result = ctx.api().stats(scope.as_deref()).await;
    let stats = ctx.check(result)?;
    print!("{}", stats_table(&stats));
    Ok(())
}

fn stats_table(stats: &NetworkStats) -> String {
    let mut rows = Vec::new();
    if let Some(orgs) = stats.organizations {
        rows.push(vec!["Organizations".to_string(), orgs.to_string()]);
    }
    if let Some(accounts) = stats.accounts {
        rows.push(vec!["Accounts".to_string(), accounts.to_string()]);
    }
    rows.push(vec!["Branches".to_string(), stats.branches.to_string()]);
    rows.push(vec![
        "Kiosks".to_string(),
        format!("{} ({} active)", stats.kiosks, stats.active_kiosks),
    ]);
    if stats.organizations.is_some() {
        rows.push(vec![
            "Unassigned kiosks".to_string(),
            stats.unassigned_kiosks.to_string(),
        ]);
    }
    render::table(&["", "COUNT"], &rows)
}

//! Hardware kiosks: listing, assignment, balance and IoT overrides

use anyhow::{Result, anyhow};
use shared::iot::IotField;
use shared::models::{HardwareKiosk, KioskAssign, KioskCreate};
use wash_client::api::{KioskQuery, ListFilter};
use wash_client::{KioskEditor, KioskRow};

use super::{confirm_archive, table_state};
use crate::cli::{KioskCommand, OverrideCommand};
use crate::context::Context;
use crate::render;

pub async fn run(ctx: &mut Context, cmd: KioskCommand) -> Result<()> {
    match cmd {
        KioskCommand::List {
            list,
            status,
            assignment,
        } => {
            let query = KioskQuery {
                status,
                org_id: ctx.scope(list.org.clone())?,
                branch_id: list.branch.clone(),
            };
            let rows = load_rows(ctx, &query).await?;
            let rows: Vec<KioskRow> = rows
                .into_iter()
                .filter(|row| assignment.matches(&row.kiosk))
                .collect();

            let mut state = table_state(&list.search, list.page, list.page_size)?;
            println!("{}", render::page(&state.view(&rows)));
            Ok(())
        }
        KioskCommand::Create { mac, name, kiosk_id } => {
            ctx.require_super_admin()?;
            if mac.trim().is_empty() {
                anyhow::bail!("--mac is required");
            }
            let payload = KioskCreate {
                mac_id: mac.trim().to_string(),
                name,
                kiosk_id,
            };
            let result = ctx.api().create_hardware_kiosk(&payload).await;
            let kiosk = ctx.check(result)?;
            println!("Registered kiosk {} ({}) as {}", kiosk.name, kiosk.mac_id, kiosk.id);
            Ok(())
        }
        KioskCommand::Update { id, name, status } => {
            let mut editor = find_editor(ctx, &id).await?;
            if let Some(name) = name {
                editor.set_name(name);
            }
            if let Some(status) = status {
                editor.set_status(status);
            }
            if !editor.is_dirty() {
                println!("Nothing changed");
                return Ok(());
            }
            let result = editor.save(&ctx.api()).await.map(|k| (k.name.clone(), k.status));
            let (name, status) = ctx.check(result)?;
            println!("Kiosk {}: {} ({})", id, name, status);
            Ok(())
        }
        KioskCommand::Delete { id, yes } => {
            if !confirm_archive("kiosk", &id, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            let result = ctx.api().delete_hardware_kiosk(&id).await;
            ctx.check(result)?;
            println!("Archived kiosk {}", id);
            Ok(())
        }
        KioskCommand::Assign { id, org, branch } => {
            ctx.require_super_admin()?;
            let payload = KioskAssign {
                org_id: org,
                branch_id: branch,
            };
            let result = wash_client::assign_kiosk(&ctx.api(), &id, &payload).await;
            let (kiosk, pruned) = ctx.check(result)?;
            println!(
                "Kiosk {} assigned to {} / {}",
                kiosk.id,
                kiosk.org_id().unwrap_or("-"),
                kiosk.branch_id().unwrap_or("-")
            );
            report_pruned(&pruned);
            Ok(())
        }
        KioskCommand::Unassign { id } => {
            ctx.require_super_admin()?;
            let result = wash_client::unassign_kiosk(&ctx.api(), &id).await;
            let (kiosk, pruned) = ctx.check(result)?;
            println!("Kiosk {} unassigned", kiosk.id);
            report_pruned(&pruned);
            Ok(())
        }
        KioskCommand::TopUp { id, amount } => {
            if amount <= rust_decimal::Decimal::ZERO {
                anyhow::bail!("Amount must be positive");
            }
            let result = ctx.api().top_up_kiosk(&id, amount).await;
            let kiosk = ctx.check(result)?;
            println!("Kiosk {} balance: {}", kiosk.id, kiosk.cash_balance);
            Ok(())
        }
        KioskCommand::Overrides(cmd) => overrides(ctx, cmd).await,
    }
}

fn report_pruned(pruned: &[String]) {
    for service_id in pruned {
        println!("Dropped overrides of service {} (not offered by the new branch)", service_id);
    }
}

/// Kiosks named by organization and branch
///
/// Partners cannot list organizations, so their rows only resolve branches.
async fn load_rows(ctx: &mut Context, query: &KioskQuery) -> Result<Vec<KioskRow>> {
    if ctx.profile()?.is_super_admin() {
        let result = ctx.api().kiosk_overview(query).await;
        let (kiosks, orgs, branches) = ctx.check(result)?;
        return Ok(KioskRow::build(kiosks, &orgs, &branches));
    }

    let result = {
        let api = ctx.api();
        tokio::try_join!(
            api.hardware_kiosks(query),
            api.branches(query.org_id.as_deref())
        )
    };
    let (kiosks, branches) = ctx.check(result)?;
    Ok(KioskRow::build(kiosks, &[], &branches))
}

async fn find_kiosk(ctx: &mut Context, kiosk_id: &str) -> Result<HardwareKiosk> {
    let result = ctx.api().hardware_kiosks(&KioskQuery::default()).await;
    ctx.check(result)?
        .into_iter()
        .find(|k| k.id == kiosk_id)
        .ok_or_else(|| anyhow!("Kiosk {} not found", kiosk_id))
}

/// Editor for name and status; overrides are carried along untouched
async fn find_editor(ctx: &mut Context, kiosk_id: &str) -> Result<KioskEditor> {
    let kiosk = find_kiosk(ctx, kiosk_id).await?;
    Ok(KioskEditor::new(kiosk, Vec::new()))
}

/// Open the override editor on a kiosk and the services of its branch
async fn open_editor(ctx: &mut Context, kiosk_id: &str) -> Result<KioskEditor> {
    let kiosk = find_kiosk(ctx, kiosk_id).await?;
    let Some(branch_id) = kiosk.branch_id().map(str::to_string) else {
        anyhow::bail!("Kiosk {} is not assigned to a branch", kiosk.id);
    };
    let filter = ListFilter {
        org_id: kiosk.org_id().map(str::to_string),
        branch_id: Some(branch_id),
    };
    let result = ctx.api().services(&filter).await;
    let services = ctx.check(result)?;
    Ok(KioskEditor::new(kiosk, services))
}

async fn overrides(ctx: &mut Context, cmd: OverrideCommand) -> Result<()> {
    let mut editor = match &cmd {
        OverrideCommand::Show { kiosk }
        | OverrideCommand::Populate { kiosk }
        | OverrideCommand::Set { kiosk, .. }
        | OverrideCommand::Clear { kiosk, .. } => open_editor(ctx, kiosk).await?,
    };

    match cmd {
        OverrideCommand::Show { .. } => {
            print_overrides(&editor);
            return Ok(());
        }
        OverrideCommand::Populate { .. } => editor.populate_defaults(),
        OverrideCommand::Set {
            service,
            field,
            value,
            ..
        } => editor.set_field_str(&service, field, &value)?,
        OverrideCommand::Clear { service, field, .. } => {
            let removed = match field {
                Some(field) => editor.clear_field(&service, field),
                None => editor.reset_service(&service),
            };
            if removed {
                println!("Service {} back on its baseline", service);
            }
        }
    }

    if !editor.is_dirty() {
        println!("Nothing changed");
        return Ok(());
    }
    let result = editor.save(&ctx.api()).await.map(|_| ());
    ctx.check(result)?;
    print_overrides(&editor);
    Ok(())
}

/// Effective parameters per service; overridden values carry a `*`
fn print_overrides(editor: &KioskEditor) {
    let mut headers = vec!["SERVICE"];
    headers.extend(IotField::ALL.iter().map(IotField::wire_name));

    let rows: Vec<Vec<String>> = editor
        .services()
        .iter()
        .filter_map(|service| {
            let effective = editor.effective(&service.id)?;
            let overridden = editor
                .overrides()
                .get(&service.id)
                .map(|o| o.overridden_fields())
                .unwrap_or_default();
            let mut row = vec![service.name.clone()];
            row.extend(IotField::ALL.iter().map(|field| {
                let value = effective
                    .get(*field)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string());
                if overridden.contains(field) {
                    format!("{}*", value)
                } else {
                    value
                }
            }));
            Some(row)
        })
        .collect();

    println!("Kiosk {} ({})", editor.kiosk().name, editor.kiosk().mac_id);
    print!("{}", render::table(&headers, &rows));
    for orphan in editor.orphaned() {
        println!("Warning: override for unknown service {}", orphan);
    }
}

//! Organizations, branches, devices, services, promotions and accounts

use std::io::{self, Write};

use anyhow::{Result, anyhow, bail};
use shared::iot::IotParams;
use shared::models::{
    AccountCreate, AccountUpdate, BranchCreate, BranchUpdate, DevicePayload, OrganizationPayload,
    PromotionPayload, ServicePayload,
};
use wash_client::Searchable;
use wash_client::api::ListFilter;

use super::{confirm_archive, read_line, table_state, upload_opt};
use crate::cli::{
    BranchCommand, DeviceCommand, DeviceFields, ListArgs, OrgCommand, OrgFields, PromotionCommand,
    PromotionFields, ServiceCommand, ServiceFields, UserCommand,
};
use crate::context::Context;
use crate::render::{self, Row};

/// Filter, page and print a loaded list
fn print_list<T: Searchable + Row>(args: &ListArgs, items: &[T]) -> Result<()> {
    let mut state = table_state(&args.search, args.page, args.page_size)?;
    let view = state.view(items);
    println!("{}", render::page(&view));
    Ok(())
}

fn report_archived(what: &str, id: &str) {
    println!("Archived {} {}", what, id);
}

fn require<'a>(value: &'a Option<String>, flag: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => bail!("--{} is required", flag),
    }
}

/// Organization scope of an update; only sent when given
fn update_scope(ctx: &Context, org: Option<String>) -> Result<Option<String>> {
    match org {
        Some(org) => ctx.scope(Some(org)),
        None => Ok(None),
    }
}

pub async fn organizations(ctx: &mut Context, cmd: OrgCommand) -> Result<()> {
    ctx.require_super_admin()?;
    match cmd {
        OrgCommand::List(args) => {
            let result = ctx.api().organizations().await;
            let items = ctx.check(result)?;
            print_list(&args, &items)
        }
        OrgCommand::Create(fields) => {
            require(&fields.name, "name")?;
            let logo_url = upload_opt(ctx, fields.logo.as_deref()).await?;
            let payload = org_payload(fields, logo_url);
            let result = ctx.api().create_organization(&payload).await;
            let org = ctx.check(result)?;
            println!("Created organization {} ({})", org.name, org.id);
            Ok(())
        }
        OrgCommand::Update { id, fields } => {
            let logo_url = upload_opt(ctx, fields.logo.as_deref()).await?;
            let payload = org_payload(fields, logo_url);
            let result = ctx.api().update_organization(&id, &payload).await;
            let org = ctx.check(result)?;
            println!("Updated organization {} ({})", org.name, org.id);
            Ok(())
        }
        OrgCommand::Delete { id, yes } => {
            if !confirm_archive("organization", &id, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            let result = ctx.api().delete_organization(&id).await;
            ctx.check(result)?;
            report_archived("organization", &id);
            Ok(())
        }
        OrgCommand::Attach { org_id, kiosk_ids } => {
            let requested = kiosk_ids.len();
            let result = ctx.api().attach_kiosks(&org_id, kiosk_ids).await;
            let attached = ctx.check(result)?;
            println!(
                "Attached {} of {} kiosk(s) to {}",
                attached.attached_count, requested, org_id
            );
            Ok(())
        }
    }
}

fn org_payload(fields: OrgFields, logo_url: Option<String>) -> OrganizationPayload {
    OrganizationPayload {
        name: fields.name,
        inn: fields.inn,
        status: fields.status,
        partner_type: fields.partner_type,
        description: fields.description,
        address: fields.address,
        phone: fields.phone,
        email: fields.email,
        working_hours: fields.working_hours,
        logo_url,
    }
}

pub async fn branches(ctx: &mut Context, cmd: BranchCommand) -> Result<()> {
    match cmd {
        BranchCommand::List(args) => {
            let org = ctx.scope(args.org.clone())?;
            let result = ctx.api().branches(org.as_deref()).await;
            let items = ctx.check(result)?;
            print_list(&args, &items)
        }
        BranchCommand::Create {
            org,
            name,
            address,
            phone,
            status,
            partner_type,
            box_count,
        } => {
            let Some(org_id) = ctx.scope(org)? else {
                bail!("--org is required");
            };
            let payload = BranchCreate {
                org_id,
                name,
                address,
                phone,
                status,
                partner_type,
                box_count,
            };
            let result = ctx.api().create_branch(&payload).await;
            let branch = ctx.check(result)?;
            println!("Created branch {} ({})", branch.name, branch.id);
            if let Some(boxes) = branch.box_count {
                println!("{} kiosk(s) will be registered for the boxes", boxes);
            }
            Ok(())
        }
        BranchCommand::Update {
            id,
            name,
            address,
            phone,
            status,
            partner_type,
        } => {
            let org = ctx.scope(None)?;
            let result = ctx.api().branches(org.as_deref()).await;
            let current = ctx
                .check(result)?
                .into_iter()
                .find(|b| b.id == id)
                .ok_or_else(|| anyhow!("Branch {} not found", id))?;

            let payload = BranchUpdate {
                name: name.unwrap_or(current.name),
                address: address.unwrap_or(current.address),
                phone: phone.unwrap_or(current.phone),
                status: status.unwrap_or(current.status),
                partner_type: partner_type.or(current.partner_type),
            };
            let result = ctx.api().update_branch(&id, &payload).await;
            let branch = ctx.check(result)?;
            println!("Updated branch {} ({})", branch.name, branch.id);
            Ok(())
        }
        BranchCommand::Delete { id, yes } => {
            if !confirm_archive("branch", &id, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            let result = ctx.api().delete_branch(&id).await;
            ctx.check(result)?;
            report_archived("branch", &id);
            Ok(())
        }
    }
}

pub async fn devices(ctx: &mut Context, cmd: DeviceCommand) -> Result<()> {
    match cmd {
        DeviceCommand::List(args) => {
            let org = ctx.scope(args.org.clone())?;
            let result = ctx.api().devices(org.as_deref()).await;
            let mut items = ctx.check(result)?;
            if let Some(branch) = &args.branch {
                items.retain(|d| d.branch_id.as_ref() == Some(branch));
            }
            print_list(&args, &items)
        }
        DeviceCommand::Create(mut fields) => {
            require(&fields.name, "name")?;
            let org_id = ctx.scope(fields.org.take())?;
            let payload = device_payload(fields, org_id);
            let result = ctx.api().create_device(&payload).await;
            let device = ctx.check(result)?;
            println!("Created device {} ({})", device.name, device.id);
            Ok(())
        }
        DeviceCommand::Update { id, mut fields } => {
            let org_id = update_scope(ctx, fields.org.take())?;
            let payload = device_payload(fields, org_id);
            let result = ctx.api().update_device(&id, &payload).await;
            let device = ctx.check(result)?;
            println!("Updated device {} ({})", device.name, device.id);
            Ok(())
        }
        DeviceCommand::Delete { id, yes } => {
            if !confirm_archive("device", &id, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            let result = ctx.api().delete_device(&id).await;
            ctx.check(result)?;
            report_archived("device", &id);
            Ok(())
        }
    }
}

fn device_payload(fields: DeviceFields, org_id: Option<String>) -> DevicePayload {
    DevicePayload {
        name: fields.name,
        org_id,
        branch_id: fields.branch,
        mac_id: fields.mac,
        status: fields.status,
        cash_balance: fields.cash_balance,
    }
}

pub async fn services(ctx: &mut Context, cmd: ServiceCommand) -> Result<()> {
    match cmd {
        ServiceCommand::List(args) => {
            let filter = ListFilter {
                org_id: ctx.scope(args.org.clone())?,
                branch_id: args.branch.clone(),
            };
            let result = ctx.api().services(&filter).await;
            let items = ctx.check(result)?;
            print_list(&args, &items)
        }
        ServiceCommand::Create(mut fields) => {
            let Some(org_id) = ctx.scope(fields.org.take())? else {
                bail!("--org is required");
            };
            // car-wash services live on a branch
            require(&fields.branch, "branch")?;
            require(&fields.name, "name")?;
            let payload = service_payload(fields, Some(org_id));
            let result = ctx.api().create_service(&payload).await;
            let service = ctx.check(result)?;
            println!("Created service {} ({})", service.name, service.id);
            Ok(())
        }
        ServiceCommand::Update { id, mut fields } => {
            let org_id = update_scope(ctx, fields.org.take())?;
            let payload = service_payload(fields, org_id);
            let result = ctx.api().update_service(&id, &payload).await;
            let service = ctx.check(result)?;
            println!("Updated service {} ({})", service.name, service.id);
            Ok(())
        }
        ServiceCommand::Delete { id, yes } => {
            if !confirm_archive("service", &id, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            let result = ctx.api().delete_service(&id).await;
            ctx.check(result)?;
            report_archived("service", &id);
            Ok(())
        }
    }
}

fn service_payload(fields: ServiceFields, org_id: Option<String>) -> ServicePayload {
    ServicePayload {
        org_id,
        branch_id: fields.branch,
        name: fields.name,
        description: fields.description,
        category: fields.category,
        price_per_minute: fields.price_per_minute,
        duration_minutes: fields.duration,
        bookable: fields.bookable,
        booking_interval_minutes: fields.booking_interval,
        working_hours: fields.working_hours,
        active: fields.active,
        iot: IotParams {
            relay_bits: fields.relay_bits,
            command: fields.command,
            motor_flag: fields.motor_flag,
            motor_frequency: fields.motor_frequency,
            pump1_power: fields.pump1_power,
            pump2_power: fields.pump2_power,
            pump3_power: fields.pump3_power,
            pump4_power: fields.pump4_power,
        },
    }
}

pub async fn promotions(ctx: &mut Context, cmd: PromotionCommand) -> Result<()> {
    match cmd {
        PromotionCommand::List(args) => {
            let filter = ListFilter {
                org_id: ctx.scope(args.org.clone())?,
                branch_id: args.branch.clone(),
            };
            let result = ctx.api().promotions(&filter).await;
            let items = ctx.check(result)?;
            print_list(&args, &items)
        }
        PromotionCommand::Create(mut fields) => {
            let Some(org_id) = ctx.scope(fields.org.take())? else {
                bail!("--org is required");
            };
            require(&fields.title, "title")?;
            if fields.start.is_none() || fields.end.is_none() {
                bail!("--start and --end are required");
            }
            let image_url = upload_opt(ctx, fields.image.as_deref()).await?;
            let payload = promotion_payload(fields, Some(org_id), image_url)?;
            let result = ctx.api().create_promotion(&payload).await;
            let promotion = ctx.check(result)?;
            println!("Created promotion {} ({})", promotion.title, promotion.id);
            Ok(())
        }
        PromotionCommand::Update { id, mut fields } => {
            let org_id = update_scope(ctx, fields.org.take())?;
            let image_url = upload_opt(ctx, fields.image.as_deref()).await?;
            let payload = promotion_payload(fields, org_id, image_url)?;
            let result = ctx.api().update_promotion(&id, &payload).await;
            let promotion = ctx.check(result)?;
            println!("Updated promotion {} ({})", promotion.title, promotion.id);
            Ok(())
        }
        PromotionCommand::Delete { id, yes } => {
            if !confirm_archive("promotion", &id, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            let result = ctx.api().delete_promotion(&id).await;
            ctx.check(result)?;
            report_archived("promotion", &id);
            Ok(())
        }
    }
}

fn promotion_payload(
    fields: PromotionFields,
    org_id: Option<String>,
    image_url: Option<String>,
) -> Result<PromotionPayload> {
    if let (Some(start), Some(end)) = (fields.start, fields.end)
        && end < start
    {
        bail!("--end is before --start");
    }
    let day = |d: chrono::NaiveDate| d.format("%Y-%m-%d").to_string();
    Ok(PromotionPayload {
        org_id,
        branch_id: fields.branch,
        title: fields.title,
        description: fields.description,
        image_url,
        discount_value: fields.discount,
        start_date: fields.start.map(day),
        end_date: fields.end.map(day),
        active: fields.active,
    })
}

pub async fn users(ctx: &mut Context, cmd: UserCommand) -> Result<()> {
    ctx.require_super_admin()?;
    match cmd {
        UserCommand::List(args) => {
            let result = ctx.api().accounts().await;
            let mut items = ctx.check(result)?;
            if let Some(org) = &args.org {
                items.retain(|a| a.org_id.as_ref() == Some(org));
            }
            print_list(&args, &items)
        }
        UserCommand::Create {
            email,
            password,
            full_name,
            role,
            org,
        } => {
            if email.trim().is_empty() {
                bail!("Email is required");
            }
            let password = match password {
                Some(password) => password,
                None => {
                    print!("Password for {}: ", email);
                    io::stdout().flush()?;
                    read_line()?
                }
            };
            if password.trim().is_empty() {
                bail!("Password is required");
            }
            let payload = AccountCreate {
                email,
                password,
                full_name,
                role,
                org_id: org.filter(|o| !o.is_empty()),
            };
            let result = ctx.api().create_account(&payload).await;
            let account = ctx.check(result)?;
            println!("Created account {} ({})", account.email, account.id);
            Ok(())
        }
        UserCommand::Update {
            id,
            full_name,
            role,
            password,
        } => {
            let result = ctx.api().accounts().await;
            let current = ctx
                .check(result)?
                .into_iter()
                .find(|a| a.id == id)
                .ok_or_else(|| anyhow!("Account {} not found", id))?;

            let payload = AccountUpdate {
                full_name: full_name.unwrap_or(current.full_name),
                role: role.unwrap_or(current.role),
                password: password.filter(|p| !p.is_empty()),
            };
            let result = ctx.api().update_account(&id, &payload).await;
            let account = ctx.check(result)?;
            println!("Updated account {} ({})", account.email, account.role);
            Ok(())
        }
        UserCommand::Delete { id, yes } => {
            if !confirm_archive("account", &id, yes)? {
                println!("Cancelled");
                return Ok(());
            }
            let result = ctx.api().delete_account(&id).await;
            ctx.check(result)?;
            report_archived("account", &id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shared::models::PartnerType;

    use super::*;

    #[test]
    fn test_service_payload_carries_iot_baseline() {
        let fields = ServiceFields {
            branch: Some("br-1".into()),
            name: Some("Turbo".into()),
            price_per_minute: Some(2000),
            relay_bits: Some("1010".into()),
            pump2_power: Some(60),
            ..Default::default()
        };
        let json = serde_json::to_value(service_payload(fields, Some("org-1".into()))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "orgId": "org-1",
                "branchId": "br-1",
                "name": "Turbo",
                "pricePerMinute": 2000,
                "relayBits": "1010",
                "pump2Power": 60,
            })
        );
    }

    #[test]
    fn test_promotion_dates() {
        let fields = PromotionFields {
            title: Some("Spring".into()),
            start: NaiveDate::from_ymd_opt(2026, 3, 1),
            end: NaiveDate::from_ymd_opt(2026, 3, 31),
            ..Default::default()
        };
        let payload = promotion_payload(fields, None, Some("http://x/banner.png".into())).unwrap();
        assert_eq!(payload.start_date.as_deref(), Some("2026-03-01"));
        assert_eq!(payload.end_date.as_deref(), Some("2026-03-31"));
        assert_eq!(payload.image_url.as_deref(), Some("http://x/banner.png"));

        let backwards = PromotionFields {
            start: NaiveDate::from_ymd_opt(2026, 3, 31),
            end: NaiveDate::from_ymd_opt(2026, 3, 1),
            ..Default::default()
        };
        assert!(promotion_payload(backwards, None, None).is_err());
    }

    #[test]
    fn test_org_payload_sends_given_fields_only() {
        let fields = OrgFields {
            name: Some("Aqua".into()),
            partner_type: Some(PartnerType::CarWash),
            ..Default::default()
        };
        let json = serde_json::to_value(org_payload(fields, None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Aqua", "partnerType": "CAR_WASH" })
        );
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(require(&None, "name").is_err());
        assert!(require(&Some("  ".into()), "name").is_err());
        assert_eq!(require(&Some("Box".into()), "name").unwrap(), "Box");
    }
}

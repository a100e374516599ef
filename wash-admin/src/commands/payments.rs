//! Payment transactions and daily totals

use anyhow::Result;
use shared::models::{PaymentFilter, PaymentType};

use super::table_state;
use crate::cli::{PaymentArgs, PaymentCommand};
use crate::context::Context;
use crate::render;

fn filter(ctx: &Context, args: PaymentArgs, payment_type: Option<PaymentType>) -> Result<PaymentFilter> {
    Ok(PaymentFilter {
        payment_type,
        org_id: ctx.scope(args.org)?,
        kiosk_id: args.kiosk,
        date: args.date,
    })
}

pub async fn run(ctx: &mut Context, cmd: PaymentCommand) -> Result<()> {
    match cmd {
        PaymentCommand::List {
            filter: args,
            payment_type,
            search,
            page,
            page_size,
        } => {
            let filter = filter(ctx, args, payment_type)?;
            let result = ctx.api().payments(&filter).await;
            let items = ctx.check(result)?;
            let mut state = table_state(&search, page, page_size)?;
            println!("{}", render::page(&state.view(&items)));
            Ok(())
        }
        PaymentCommand::Summary { filter: args } => {
            let filter = filter(ctx, args, None)?;
            let result = ctx.api().payment_summary(&filter).await;
            let summary = ctx.check(result)?;

            let rows: Vec<Vec<String>> = [PaymentType::Cash, PaymentType::Rfid, PaymentType::Online]
                .into_iter()
                .map(|t| {
                    let totals = summary.by_type(t);
                    vec![t.to_string(), totals.count.to_string(), totals.total.to_string()]
                })
                .chain(std::iter::once(vec![
                    "ALL".to_string(),
                    summary.all.count.to_string(),
                    summary.all.total.to_string(),
                ]))
                .collect();
            print!("{}", render::table(&["TYPE", "COUNT", "TOTAL"], &rows));
            Ok(())
        }
    }
}

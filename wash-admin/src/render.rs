//! Plain text tables

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use shared::models::{
    Account, Branch, Device, Organization, PaymentTransaction, Promotion, Service, WashSession,
};
use wash_client::{KioskRow, PageLink, PageView};

/// A type rendered as one table row
pub trait Row {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl Row for Organization {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "TYPE", "STATUS", "PHONE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            or_dash(self.partner_type.map(|t| t.as_str())),
            self.status.clone(),
            or_dash(self.phone.as_deref()),
        ]
    }
}

impl Row for Branch {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "ADDRESS", "PHONE", "STATUS", "BOXES"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.address.clone(),
            self.phone.clone(),
            self.status.to_string(),
            self.box_count.map_or_else(|| "-".to_string(), |n| n.to_string()),
        ]
    }
}

impl Row for Device {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "MAC", "STATUS", "BALANCE", "HEARTBEAT"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            or_dash(self.mac_id.as_deref()),
            self.status.clone(),
            self.cash_balance.to_string(),
            timestamp(self.last_heartbeat),
        ]
    }
}

impl Row for Service {
    const HEADERS: &'static [&'static str] =
        &["ID", "NAME", "CATEGORY", "PRICE/MIN", "MINUTES", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.category.clone(),
            self.price_per_minute.to_string(),
            self.duration_minutes.to_string(),
            if self.active { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl Row for Promotion {
    const HEADERS: &'static [&'static str] = &["ID", "TITLE", "DISCOUNT", "FROM", "TO", "ACTIVE"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.discount_value.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            if self.active { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl Row for Account {
    const HEADERS: &'static [&'static str] = &["ID", "EMAIL", "NAME", "ROLE", "ORG"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.email.clone(),
            self.full_name.clone(),
            self.role.to_string(),
            or_dash(self.org_id.as_deref()),
        ]
    }
}

impl Row for KioskRow {
    const HEADERS: &'static [&'static str] =
        &["ID", "NAME", "MAC", "STATUS", "ORGANIZATION", "BRANCH", "BALANCE", "HEARTBEAT"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.kiosk.id.clone(),
            self.kiosk.name.clone(),
            self.kiosk.mac_id.clone(),
            self.kiosk.status.to_string(),
            or_dash(self.org_name.as_deref()),
            or_dash(self.branch_name.as_deref()),
            self.kiosk.cash_balance.to_string(),
            timestamp(self.kiosk.last_heartbeat),
        ]
    }
}

impl Row for PaymentTransaction {
    const HEADERS: &'static [&'static str] = &["ID", "TYPE", "KIOSK", "AMOUNT", "STATUS", "CREATED"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.payment_type.to_string(),
            self.kiosk_id.clone(),
            format!("{} {}", self.amount, self.currency),
            format!("{:?}", self.status).to_uppercase(),
            timestamp(self.created_at),
        ]
    }
}

/// Wash session row with the live elapsed time
pub struct SessionLine<'a> {
    pub session: &'a WashSession,
    pub now: DateTime<Utc>,
}

impl Row for SessionLine<'_> {
    const HEADERS: &'static [&'static str] = &["ID", "KIOSK", "STATUS", "PAID", "STARTED", "ELAPSED"];

    fn cells(&self) -> Vec<String> {
        let s = self.session;
        vec![
            s.id.clone(),
            s.kiosk_id.clone(),
            s.status.label().to_string(),
            s.paid_amount.to_string(),
            timestamp(s.started_at),
            s.elapsed_label(self.now).unwrap_or_else(|| "-".to_string()),
        ]
    }
}

/// Render rows under `headers`, columns padded to the widest cell
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &header, &widths);
    for row in rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Rows of any [`Row`] type
pub fn rows<T: Row>(items: &[&T]) -> String {
    let cells: Vec<Vec<String>> = items.iter().map(|item| item.cells()).collect();
    table(T::HEADERS, &cells)
}

/// "Showing X–Y of Z" plus the page strip
pub fn footer<T>(page: &PageView<'_, T>) -> String {
    if page.total_items == 0 {
        return "No records".to_string();
    }
    let strip: Vec<String> = page
        .page_numbers()
        .into_iter()
        .map(|link| match link {
            PageLink::Page(n) if n == page.page => format!("[{}]", n),
            PageLink::Page(n) => n.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        })
        .collect();
    format!(
        "{}  |  {} {} {}  |  {} per page",
        page.summary(),
        if page.has_prev() { "<" } else { " " },
        strip.join(" "),
        if page.has_next() { ">" } else { " " },
        page.page_size
    )
}

/// Full list output: table plus footer
pub fn page<T: Row>(page: &PageView<'_, T>) -> String {
    if page.total_items == 0 {
        return footer(page);
    }
    format!("{}{}", rows(&page.items), footer(page))
}

//! Command line definition

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use shared::iot::IotField;
use shared::models::{
    BranchStatus, KioskAssignment, KioskStatus, PartnerType, PaymentType, Role, SessionStatus,
};
use wash_client::DEFAULT_PAGE_SIZE;

/// Admin console for the car-wash kiosk network
#[derive(Parser, Debug)]
#[command(name = "wash-admin", version, about)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "WASH_API_URL")]
    pub api_url: Option<String>,

    /// Directory holding the stored token
    #[arg(long, global = true, env = "WASH_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Log level for the console crates (overridden by RUST_LOG)
    #[arg(long, global = true, env = "WASH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Write logs to daily files in this directory
    #[arg(long, global = true, env = "WASH_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password
    Login {
        email: String,
        /// Password; read from stdin when omitted
        #[arg(long, env = "WASH_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Record counts of the network
    Stats,

    /// Organizations (super admin)
    #[command(subcommand)]
    Orgs(OrgCommand),

    /// Branches
    #[command(subcommand)]
    Branches(BranchCommand),

    /// Legacy devices
    #[command(subcommand)]
    Devices(DeviceCommand),

    /// Wash services
    #[command(subcommand)]
    Services(ServiceCommand),

    /// Promotions
    #[command(subcommand)]
    Promotions(PromotionCommand),

    /// Admin accounts (super admin)
    #[command(subcommand)]
    Users(UserCommand),

    /// Hardware kiosks
    #[command(subcommand)]
    Kiosks(KioskCommand),

    /// Payment transactions
    #[command(subcommand)]
    Payments(PaymentCommand),

    /// Wash sessions
    #[command(subcommand)]
    Sessions(SessionCommand),

    /// Upload a file and print its URL
    Upload { file: PathBuf },
}

/// Search, paging and scope of a list
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(short, long, default_value = "")]
    pub search: String,

    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// One of 10, 25, 50, 100
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Organization scope (super admin only; partners are pinned to their own)
    #[arg(long)]
    pub org: Option<String>,

    #[arg(long)]
    pub branch: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum OrgCommand {
    List(ListArgs),
    Create(OrgFields),
    /// Change the given fields only
    Update {
        id: String,
        #[command(flatten)]
        fields: OrgFields,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Attach kiosks to an organization
    Attach {
        org_id: String,
        #[arg(required = true)]
        kiosk_ids: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct OrgFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub inn: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// CAR_WASH, GAS_STATION or SERVICE
    #[arg(long)]
    pub partner_type: Option<PartnerType>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub working_hours: Option<String>,
    /// Logo image, uploaded before saving
    #[arg(long)]
    pub logo: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum BranchCommand {
    List(ListArgs),
    Create {
        #[arg(long)]
        org: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "OPEN")]
        status: BranchStatus,
        /// CAR_WASH, GAS_STATION or SERVICE
        #[arg(long)]
        partner_type: Option<PartnerType>,
        /// Number of wash boxes; the backend registers one kiosk per box
        #[arg(long)]
        box_count: Option<u32>,
    },
    /// Change the given fields, keep the rest
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        status: Option<BranchStatus>,
        #[arg(long)]
        partner_type: Option<PartnerType>,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeviceCommand {
    List(ListArgs),
    Create(DeviceFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: DeviceFields,
    },
    /// Archive a record
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct DeviceFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub org: Option<String>,
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long)]
    pub mac: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub cash_balance: Option<Decimal>,
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommand {
    List(ListArgs),
    Create(ServiceFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: ServiceFields,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

/// Service form, IoT baseline included
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceFields {
    #[arg(long)]
    pub org: Option<String>,
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub price_per_minute: Option<i32>,
    #[arg(long)]
    pub duration: Option<i32>,
    #[arg(long)]
    pub bookable: Option<bool>,
    #[arg(long)]
    pub booking_interval: Option<i32>,
    #[arg(long)]
    pub working_hours: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
    /// Four relay bits, e.g. 1010
    #[arg(long)]
    pub relay_bits: Option<String>,
    #[arg(long)]
    pub command: Option<String>,
    #[arg(long)]
    pub motor_flag: Option<String>,
    #[arg(long)]
    pub motor_frequency: Option<i32>,
    #[arg(long)]
    pub pump1_power: Option<i32>,
    #[arg(long)]
    pub pump2_power: Option<i32>,
    #[arg(long)]
    pub pump3_power: Option<i32>,
    #[arg(long)]
    pub pump4_power: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum PromotionCommand {
    List(ListArgs),
    Create(PromotionFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: PromotionFields,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PromotionFields {
    #[arg(long)]
    pub org: Option<String>,
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Discount as shown to customers, e.g. "20%"
    #[arg(long)]
    pub discount: Option<String>,
    /// Day in YYYY-MM-DD
    #[arg(long)]
    pub start: Option<NaiveDate>,
    #[arg(long)]
    pub end: Option<NaiveDate>,
    #[arg(long)]
    pub active: Option<bool>,
    /// Banner image, uploaded before saving
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    List(ListArgs),
    Create {
        email: String,
        /// Password; read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "")]
        full_name: String,
        #[arg(long, default_value = "MANAGER")]
        role: Role,
        #[arg(long)]
        org: Option<String>,
    },
    /// Change name or role; a password is only sent when given
    Update {
        id: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        password: Option<String>,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum KioskCommand {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[arg(long)]
        status: Option<KioskStatus>,
        /// all, assigned or unassigned
        #[arg(long, default_value = "all")]
        assignment: KioskAssignment,
    },
    /// Register a kiosk by MAC address
    Create {
        #[arg(long)]
        mac: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        kiosk_id: Option<String>,
    },
    /// Rename or change status
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<KioskStatus>,
    },
    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Assign a kiosk to an organization and optionally a branch
    Assign {
        id: String,
        #[arg(long)]
        org: String,
        #[arg(long)]
        branch: Option<String>,
    },
    Unassign { id: String },
    /// Add cash to the kiosk balance
    TopUp { id: String, amount: Decimal },
    /// Per-service IoT overrides
    #[command(subcommand)]
    Overrides(OverrideCommand),
}

#[derive(Subcommand, Debug)]
pub enum OverrideCommand {
    /// Effective parameters per branch service
    Show { kiosk: String },
    /// Copy every service baseline into the overrides
    Populate { kiosk: String },
    /// Override one field
    Set {
        kiosk: String,
        service: String,
        field: IotField,
        value: String,
    },
    /// Reset one field, or the whole service without a field
    Clear {
        kiosk: String,
        service: String,
        field: Option<IotField>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PaymentCommand {
    List {
        #[command(flatten)]
        filter: PaymentArgs,
        #[arg(long = "type")]
        payment_type: Option<PaymentType>,
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Totals per payment type
    Summary {
        #[command(flatten)]
        filter: PaymentArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PaymentArgs {
    #[arg(long)]
    pub org: Option<String>,
    #[arg(long)]
    pub kiosk: Option<String>,
    /// Day in YYYY-MM-DD
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Live view, refreshed every five seconds
    Watch {
        /// Session status, or "all"
        #[arg(long, default_value = "ACTIVE", value_parser = parse_status_filter)]
        status: StatusFilter,
    },
    /// Force-finish a running session
    Stop {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// `--status` value of the live view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter(pub Option<SessionStatus>);

fn parse_status_filter(raw: &str) -> Result<StatusFilter, String> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(StatusFilter(None));
    }
    raw.parse().map(|status| StatusFilter(Some(status)))
}

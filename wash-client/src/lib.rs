//! Wash Client - REST client for the wash network backend
//!
//! Typed endpoint wrappers, explicit admin/app sessions with persisted
//! tokens, and the screen-level state the dashboard builds on: the
//! filter/paginate data table, the kiosk override editor and the live
//! wash-session monitor.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod kiosk;
pub mod live;
pub mod session;
pub mod table;
pub mod token_store;
pub mod view;

pub use api::{AdminApi, AppApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use kiosk::{EditorError, KioskEditor, assign_kiosk, unassign_kiosk};
pub use live::{FetchOutcome, SessionMonitor, SessionSnapshot};
pub use session::{AdminSession, AppSession};
pub use table::{
    DEFAULT_PAGE_SIZE, KioskRow, PAGE_SIZES, PageLink, PageView, Searchable, TableState,
    filter_items,
};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use view::{DataTable, Generation, ListState, LoadOutcome, Ticket};

// Re-export shared types for convenience
pub use shared::client::{AdminProfile, LoginResponse};
pub use shared::error::ErrorCategory;

// wash-client/src/api/admin.rs
// 管理后台 API

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::IgnoredAny;

use shared::client::{AdminProfile, LoginRequest, LoginResponse};
use shared::models::{
    Account, AccountCreate, AccountUpdate, AttachKiosks, AttachedKiosks, Branch, BranchCreate,
    BranchUpdate, Device, DevicePayload, HardwareKiosk, KioskAssign, KioskCreate, KioskStatus,
    KioskUpdate, Organization, OrganizationPayload, PaymentFilter, PaymentSummary,
    PaymentTransaction, Promotion, PromotionPayload, Service, ServicePayload, SessionStatus, TopUp,
    WashSession,
};

use super::files;
use crate::http::HttpClient;
use crate::ClientResult;

const AUTH: &str = "/api/v1/admin/auth";
const ORGANIZATIONS: &str = "/api/v1/admin/organizations";
const ACCOUNTS: &str = "/api/v1/admin/accounts";
const BRANCHES: &str = "/api/v1/admin/branches";
const SERVICES: &str = "/api/v1/admin/services";
const PROMOTIONS: &str = "/api/v1/admin/promotions";
const DEVICES: &str = "/api/v1/admin/devices";
const KIOSKS: &str = "/api/v1/admin/hardware-kiosks";
const PAYMENTS: &str = "/api/v1/admin/payments";
const WASH_SESSIONS: &str = "/api/v1/admin/wash-sessions";

/// Organization/branch scope of a list request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
}

impl ListFilter {
    pub fn org(org_id: impl Into<String>) -> Self {
        Self {
            org_id: Some(org_id.into()),
            branch_id: None,
        }
    }
}

/// Hardware kiosk list filters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KioskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<KioskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
}

/// Wash session list filters; no status means every session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WashSessionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kiosk_id: Option<String>,
}

/// Record counts behind the dashboard tiles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkStats {
    /// Only known for network-wide stats
    pub organizations: Option<usize>,
    pub accounts: Option<usize>,
    pub branches: usize,
    pub kiosks: usize,
    pub active_kiosks: usize,
    pub unassigned_kiosks: usize,
}

/// Admin dashboard endpoints
pub struct AdminApi<'a, C: HttpClient> {
    http: &'a C,
}

impl<'a, C: HttpClient> AdminApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    // ========== Auth ==========

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.http.post(&format!("{}/login", AUTH), &req).await
    }

    pub async fn me(&self) -> ClientResult<AdminProfile> {
        self.http.get(&format!("{}/me", AUTH)).await
    }

    // ========== Organizations ==========

    pub async fn organizations(&self) -> ClientResult<Vec<Organization>> {
        self.http.get(ORGANIZATIONS).await
    }

    pub async fn create_organization(
        &self,
        payload: &OrganizationPayload,
    ) -> ClientResult<Organization> {
        self.http.post(ORGANIZATIONS, payload).await
    }

    pub async fn update_organization(
        &self,
        id: &str,
        payload: &OrganizationPayload,
    ) -> ClientResult<Organization> {
        self.http
            .put(&format!("{}/{}", ORGANIZATIONS, id), payload)
            .await
    }

    /// Archive an organization
    pub async fn delete_organization(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{}", ORGANIZATIONS, id)).await
    }

    /// Bulk-attach unowned kiosks to a car-wash organization
    pub async fn attach_kiosks(
        &self,
        org_id: &str,
        kiosk_ids: Vec<String>,
    ) -> ClientResult<AttachedKiosks> {
        self.http
            .post(
                &format!("{}/{}/attach-kiosks", ORGANIZATIONS, org_id),
                &AttachKiosks { kiosk_ids },
            )
            .await
    }

    // ========== Accounts ==========

    pub async fn accounts(&self) -> ClientResult<Vec<Account>> {
        self.http.get(ACCOUNTS).await
    }

    pub async fn create_account(&self, payload: &AccountCreate) -> ClientResult<Account> {
        self.http.post(ACCOUNTS, payload).await
    }

    pub async fn update_account(&self, id: &str, payload: &AccountUpdate) -> ClientResult<Account> {
        self.http.put(&format!("{}/{}", ACCOUNTS, id), payload).await
    }

    pub async fn delete_account(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{}", ACCOUNTS, id)).await
    }

    // ========== Branches ==========

    pub async fn branches(&self, org_id: Option<&str>) -> ClientResult<Vec<Branch>> {
        let filter = ListFilter {
            org_id: org_id.map(str::to_string),
            branch_id: None,
        };
        self.http.get_with_query(BRANCHES, &filter).await
    }

    pub async fn create_branch(&self, payload: &BranchCreate) -> ClientResult<Branch> {
        self.http.post(BRANCHES, payload).await
    }

    pub async fn update_branch(&self, id: &str, payload: &BranchUpdate) -> ClientResult<Branch> {
        self.http.put(&format!("{}/{}", BRANCHES, id), payload).await
    }

    pub async fn delete_branch(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{}", BRANCHES, id)).await
    }

    // ========== Services ==========

    pub async fn services(&self, filter: &ListFilter) -> ClientResult<Vec<Service>> {
        self.http.get_with_query(SERVICES, filter).await
    }

    pub async fn create_service(&self, payload: &ServicePayload) -> ClientResult<Service> {
        self.http.post(SERVICES, payload).await
    }

    pub async fn update_service(&self, id: &str, payload: &ServicePayload) -> ClientResult<Service> {
        self.http.put(&format!("{}/{}", SERVICES, id), payload).await
    }

    pub async fn delete_service(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{}", SERVICES, id)).await
    }

    // ========== Promotions ==========

    pub async fn promotions(&self, filter: &ListFilter) -> ClientResult<Vec<Promotion>> {
        self.http.get_with_query(PROMOTIONS, filter).await
    }

    pub async fn create_promotion(&self, payload: &PromotionPayload) -> ClientResult<Promotion> {
        self.http.post(PROMOTIONS, payload).await
    }

    pub async fn update_promotion(
        &self,
        id: &str,
        payload: &PromotionPayload,
    ) -> ClientResult<Promotion> {
        self.http.put(&format!("{}/{}", PROMOTIONS, id), payload).await
    }

    pub async fn delete_promotion(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{}", PROMOTIONS, id)).await
    }

    // ========== Devices ==========

    pub async fn devices(&self, org_id: Option<&str>) -> ClientResult<Vec<Device>> {
        let filter = ListFilter {
            org_id: org_id.map(str::to_string),
            branch_id: None,
        };
        self.http.get_with_query(DEVICES, &filter).await
    }

    pub async fn create_device(&self, payload: &DevicePayload) -> ClientResult<Device> {
        self.http.post(DEVICES, payload).await
    }

    pub async fn update_device(&self, id: &str, payload: &DevicePayload) -> ClientResult<Device> {
        self.http.put(&format!("{}/{}", DEVICES, id), payload).await
    }

    pub async fn delete_device(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{}", DEVICES, id)).await
    }

    // ========== Hardware kiosks ==========

    pub async fn hardware_kiosks(&self, query: &KioskQuery) -> ClientResult<Vec<HardwareKiosk>> {
        self.http.get_with_query(KIOSKS, query).await
    }

    /// Kiosks together with the organizations and branches needed to name them
    pub async fn kiosk_overview(
        &self,
        query: &KioskQuery,
    ) -> ClientResult<(Vec<HardwareKiosk>, Vec<Organization>, Vec<Branch>)> {
        futures::try_join!(
            self.hardware_kiosks(query),
            self.organizations(),
            self.branches(None)
        )
    }

    /// Dashboard counts; `None` means the whole network
    ///
    /// Organizations and accounts are super-admin endpoints, so an
    /// organization scope leaves them out.
    pub async fn stats(&self, org_id: Option<&str>) -> ClientResult<NetworkStats> {
        let (kiosks, branches, organizations, accounts) = match org_id {
            None => {
                let query = KioskQuery::default();
                let ((kiosks, orgs, branches), accounts) = futures::try_join!(
                    self.kiosk_overview(&query),
                    self.accounts()
                )?;
                (kiosks, branches, Some(orgs.len()), Some(accounts.len()))
            }
            Some(org_id) => {
                let query = KioskQuery {
                    org_id: Some(org_id.to_string()),
                    ..Default::default()
                };
                let (kiosks, branches) =
                    futures::try_join!(self.hardware_kiosks(&query), self.branches(Some(org_id)))?;
                (kiosks, branches, None, None)
            }
        };

        Ok(NetworkStats {
            organizations,
            accounts,
            branches: branches.len(),
            kiosks: kiosks.len(),
            active_kiosks: kiosks
                .iter()
                .filter(|k| k.status == KioskStatus::Active)
                .count(),
            unassigned_kiosks: kiosks.iter().filter(|k| !k.is_assigned()).count(),
        })
    }

    pub async fn create_hardware_kiosk(&self, payload: &KioskCreate) -> ClientResult<HardwareKiosk> {
        self.http.post(KIOSKS, payload).await
    }

    /// Update name/status/assignment and the whole override map
    pub async fn update_hardware_kiosk(
        &self,
        id: &str,
        payload: &KioskUpdate,
    ) -> ClientResult<HardwareKiosk> {
        self.http.put(&format!("{}/{}", KIOSKS, id), payload).await
    }

    pub async fn delete_hardware_kiosk(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("{}/{}", KIOSKS, id)).await
    }

    pub async fn assign_kiosk(&self, id: &str, payload: &KioskAssign) -> ClientResult<HardwareKiosk> {
        self.http
            .post(&format!("{}/{}/assign", KIOSKS, id), payload)
            .await
    }

    pub async fn unassign_kiosk(&self, id: &str) -> ClientResult<HardwareKiosk> {
        self.http
            .post_empty(&format!("{}/{}/unassign", KIOSKS, id))
            .await
    }

    /// Add cash to the kiosk balance; the backend rejects non-positive amounts
    pub async fn top_up_kiosk(&self, id: &str, amount: Decimal) -> ClientResult<HardwareKiosk> {
        self.http
            .post(&format!("{}/{}/top-up", KIOSKS, id), &TopUp { amount })
            .await
    }

    // ========== Payments ==========

    pub async fn payments(&self, filter: &PaymentFilter) -> ClientResult<Vec<PaymentTransaction>> {
        self.http.get_with_query(PAYMENTS, filter).await
    }

    /// Per-type totals of successful payments
    pub async fn payment_summary(&self, filter: &PaymentFilter) -> ClientResult<PaymentSummary> {
        self.http
            .get_with_query(&format!("{}/summary", PAYMENTS), &filter.for_summary())
            .await
    }

    // ========== Wash sessions ==========

    pub async fn wash_sessions(&self, query: &WashSessionQuery) -> ClientResult<Vec<WashSession>> {
        self.http.get_with_query(WASH_SESSIONS, query).await
    }

    /// Force-finish a running session
    pub async fn stop_wash_session(&self, id: &str) -> ClientResult<WashSession> {
        self.http
            .post_empty(&format!("{}/{}/stop", WASH_SESSIONS, id))
            .await
    }

    // ========== Files ==========

    /// Upload a file, returning its absolute URL
    pub async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<String> {
        files::upload_file(self.http, file_name, bytes).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let _: IgnoredAny = self.http.delete(path).await?;
        tracing::info!(path, "Record archived");
        Ok(())
    }
}

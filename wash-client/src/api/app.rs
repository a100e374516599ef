// wash-client/src/api/app.rs
// 移动端 API

use serde::Serialize;

use shared::client::{OtpRequest, OtpRequestResponse, OtpVerifyRequest, OtpVerifyResponse};
use shared::models::{
    AppOrder, AppUser, Branch, BranchStatus, ProfileUpdate, Promotion, QrScanResult, Service,
    Wallet,
};
use shared::response::PageContent;

use crate::http::HttpClient;
use crate::ClientResult;

const APP_AUTH: &str = "/api/v1/app-auth";
const APP: &str = "/api/v1/app";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BranchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<BranchStatus>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScopeQuery<'q> {
    #[serde(skip_serializing_if = "Option::is_none")]
    branch_id: Option<&'q str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mac_id: Option<&'q str>,
}

#[derive(Serialize)]
struct QrQuery<'q> {
    code: &'q str,
}

/// Mobile app endpoints
pub struct AppApi<'a, C: HttpClient> {
    http: &'a C,
}

impl<'a, C: HttpClient> AppApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    /// Send an OTP by SMS; development backends echo the code back
    pub async fn request_otp(&self, phone: &str) -> ClientResult<OtpRequestResponse> {
        let req = OtpRequest {
            phone: phone.to_string(),
        };
        let resp: Option<OtpRequestResponse> = self
            .http
            .post(&format!("{}/otp/request", APP_AUTH), &req)
            .await?;
        Ok(resp.unwrap_or_default())
    }

    pub async fn verify_otp(&self, phone: &str, otp: &str) -> ClientResult<OtpVerifyResponse> {
        let req = OtpVerifyRequest {
            phone: phone.to_string(),
            otp: otp.to_string(),
        };
        self.http
            .post(&format!("{}/otp/verify", APP_AUTH), &req)
            .await
    }

    pub async fn me(&self) -> ClientResult<AppUser> {
        self.http.get(&format!("{}/me", APP)).await
    }

    pub async fn update_profile(&self, profile: &ProfileUpdate) -> ClientResult<AppUser> {
        self.http
            .put(&format!("{}/user/profile", APP), profile)
            .await
    }

    /// Branches shown on the map; a non-array answer counts as none
    pub async fn branches(&self, status: Option<BranchStatus>) -> ClientResult<Vec<Branch>> {
        let value: serde_json::Value = self
            .http
            .get_with_query(&format!("{}/branches", APP), &BranchQuery { status })
            .await?;
        if !value.is_array() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    pub async fn promotions(&self, branch_id: Option<&str>) -> ClientResult<Vec<Promotion>> {
        let query = ScopeQuery {
            branch_id,
            mac_id: None,
        };
        self.http
            .get_with_query(&format!("{}/promotions", APP), &query)
            .await
    }

    pub async fn services(
        &self,
        branch_id: Option<&str>,
        mac_id: Option<&str>,
    ) -> ClientResult<Vec<Service>> {
        self.http
            .get_with_query(
                &format!("{}/services", APP),
                &ScopeQuery { branch_id, mac_id },
            )
            .await
    }

    /// Resolve a scanned kiosk QR code
    pub async fn scan_qr(&self, code: &str) -> ClientResult<QrScanResult> {
        self.http
            .get_with_query(&format!("{}/qr/scan", APP), &QrQuery { code })
            .await
    }

    pub async fn orders(&self) -> ClientResult<Vec<AppOrder>> {
        let page: Option<PageContent<AppOrder>> =
            self.http.get(&format!("{}/orders", APP)).await?;
        Ok(page.map(PageContent::into_items).unwrap_or_default())
    }

    pub async fn wallet(&self) -> ClientResult<Wallet> {
        self.http.get(&format!("{}/wallet", APP)).await
    }
}

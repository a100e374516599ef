//! Client-related types shared between the admin and mobile clients
//!
//! Request/response types for the auth endpoints:
//! - admin: `POST /api/v1/admin/auth/login`, `GET /api/v1/admin/auth/me`
//! - app: `POST /api/v1/app-auth/otp/request`, `POST /api/v1/app-auth/otp/verify`

use serde::{Deserialize, Serialize};

use crate::models::Role;

// =============================================================================
// Admin auth DTOs
// =============================================================================

/// Admin login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin login response
///
/// The backend flattens the profile next to the token and sends `""` for
/// an account without organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub org_id: Option<String>,
}

impl LoginResponse {
    /// Profile part of the response
    pub fn profile(&self) -> AdminProfile {
        AdminProfile {
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role,
            org_id: self.org_id.clone(),
        }
    }
}

/// Current admin profile (`/auth/me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub org_id: Option<String>,
}

impl AdminProfile {
    /// Organization the account is scoped to, `None` for network-wide accounts
    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

// =============================================================================
// Mobile app auth DTOs
// =============================================================================

/// OTP request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpRequest {
    pub phone: String,
}

/// OTP request response; `devOtp` is only filled on development backends
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequestResponse {
    #[serde(default)]
    pub dev_otp: Option<String>,
}

/// OTP verification body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub phone: String,
    pub otp: String,
}

/// OTP verification response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub is_new_user: bool,
}

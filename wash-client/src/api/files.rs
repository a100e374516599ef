//! File upload endpoint

use serde::{Deserialize, Serialize};

use crate::http::{HttpClient, resolve_file_url};
use crate::ClientResult;

pub(crate) const UPLOAD_PATH: &str = "/api/v1/files/upload";

/// `POST /api/v1/files/upload` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Upload a file and return its absolute URL
pub(crate) async fn upload_file<C: HttpClient>(
    http: &C,
    file_name: &str,
    bytes: Vec<u8>,
) -> ClientResult<String> {
    let resp: UploadResponse = http.upload(UPLOAD_PATH, file_name, bytes).await?;
    Ok(resolve_file_url(http.base_url(), &resp.url))
}

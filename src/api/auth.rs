//! Auth Endpoints

use super::{ApiClient, ApiResult};
use crate::models::{LoginRequest, LoginResponse};

impl ApiClient {
    /// Exchange credentials for a bearer token
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        self.post_json("/auth/login", credentials).await
    }
}

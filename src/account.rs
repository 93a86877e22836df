//! Account profile endpoint.

use reqwest::Method;
use serde::Deserialize;

use crate::client::TrackingClient;
use crate::error::Result;

/// Account information bound to the API key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountProfile {
    /// Login email address.
    #[serde(default)]
    pub email: String,
    /// Account registration time.
    #[serde(default, rename = "regtime")]
    pub reg_time: i64,
    /// Phone number bound to the account.
    #[serde(default)]
    pub phone: String,
    /// Remaining SMS quota.
    #[serde(default)]
    pub sms: i64,
    /// Remaining tracking-number quota.
    #[serde(default)]
    pub track_number: i64,
}

pub struct AccountService<'a> {
    pub(crate) client: &'a TrackingClient,
}

impl AccountService<'_> {
    pub async fn profile(&self) -> Result<AccountProfile> {
        self.client
            .dispatch(Method::GET, "/userinfo", |req| req)
            .await
    }
}

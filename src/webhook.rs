//! Inbound webhook payloads and signature verification.
//!
//! 51Tracking pushes status changes as `{code, message, data}` with the
//! tracked parcel's fields plus a `verify` block. The signature is the
//! hex-encoded HMAC-SHA256 of the decimal timestamp, keyed by the receiving
//! account's registered email address.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::tracking::Track;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebhookVerify {
    pub timestamp: i64,
    pub signature: String,
    #[serde(rename = "usertag")]
    pub user_tag: String,
}

/// Pushed tracking record plus its verification block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Webhook {
    #[serde(flatten)]
    pub track: Track,
    #[serde(default)]
    pub verify: WebhookVerify,
}

/// Full push payload as delivered to the callback endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebhookRequest {
    pub code: i32,
    pub message: String,
    pub data: Webhook,
}

impl Webhook {
    /// Verifies that the push came from 51Tracking for the account with the
    /// given login email. A zero timestamp or empty signature never
    /// verifies.
    pub fn is_valid(&self, email: &str) -> bool {
        if self.verify.timestamp == 0 || self.verify.signature.is_empty() {
            return false;
        }
        let Ok(expected) = hex::decode(&self.verify.signature) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(email.as_bytes()) else {
            return false;
        };
        mac.update(self.verify.timestamp.to_string().as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

impl WebhookRequest {
    pub fn is_valid(&self, email: &str) -> bool {
        self.data.is_valid(email)
    }
}

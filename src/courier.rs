//! Courier list and reassignment endpoints.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::client::TrackingClient;
use crate::constants::{CHINESE_LANGUAGE, LANGUAGES};
use crate::error::Result;

/// One carrier/logistics provider known to the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Courier {
    #[serde(default, rename = "courier_name")]
    pub name: String,
    #[serde(default, rename = "courier_code")]
    pub code: String,
    #[serde(default, rename = "courier_phone")]
    pub phone: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default, rename = "courier_type")]
    pub kind: String,
    #[serde(default, rename = "courier_url")]
    pub url: Option<String>,
    #[serde(default, rename = "courier_logo")]
    pub logo: String,
}

pub struct CourierService<'a> {
    pub(crate) client: &'a TrackingClient,
}

impl CourierService<'_> {
    /// Lists the supported couriers. `lang` must be `cn` or `en`; anything
    /// else falls back to `cn`.
    pub async fn list(&self, lang: &str) -> Result<Vec<Courier>> {
        let lang = lang.to_lowercase();
        let lang = if LANGUAGES.contains(&lang.as_str()) {
            lang
        } else {
            CHINESE_LANGUAGE.to_string()
        };
        self.client
            .dispatch(Method::GET, "/courier", move |req| {
                req.query(&[("lang", lang.as_str())])
            })
            .await
    }

    /// Reassigns the courier code registered for a tracking number.
    pub async fn update(
        &self,
        tracking_number: &str,
        courier_code: &str,
        new_courier_code: &str,
    ) -> Result<()> {
        let body = json!({
            "tracking_number": tracking_number,
            "courier_code": courier_code,
            "new_courier_code": new_courier_code,
        });
        let _: serde_json::Value = self
            .client
            .dispatch(Method::PUT, "/modifycourier", move |req| req.json(&body))
            .await?;
        Ok(())
    }
}

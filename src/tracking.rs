//! Tracking-record endpoints: create, query, delete, stop-update, manual
//! refresh, status statistics and transit times.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::TrackingClient;
use crate::constants::*;
use crate::error::Result;
use crate::response::BatchResult;
use crate::validate::{validate_batch, Checker, Failures, Validate};

/// Registers one tracking number with the API.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTrackRequest {
    /// Carrier-assigned tracking number of the parcel.
    pub tracking_number: String,
    /// Short code identifying the courier.
    pub courier_code: String,
    /// Merchant/platform order number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    /// Parcel title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Two-letter destination country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_code: Option<String>,
    /// Free-form logistics channel, e.g. a freight forwarder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logistics_channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Phone number for SMS notifications, formatted as `+<country code><number>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// Shipping time, `YYYY-MM-DD HH:MM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<String>,
    /// Shipping date in `YYYYMMDD`, required by some couriers (e.g. deutsch-post).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_shipping_date: Option<String>,
    /// Recipient postal code, required by some couriers (e.g. postnl-3s).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_destination_code: Option<String>,
    /// Official courier account, required by some couriers (e.g. dynamic-logistics).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_courier_account: Option<String>,
}

impl Validate for CreateTrackRequest {
    fn validate(&self) -> std::result::Result<(), Failures> {
        Checker::new()
            .required(&self.tracking_number, "tracking number cannot be empty")
            .required(&self.courier_code, "courier code cannot be empty")
            .email(
                self.customer_email.as_deref(),
                "customer email address is malformed",
            )
            .phone(
                self.customer_phone.as_deref(),
                "customer phone number is malformed",
            )
            .datetime(
                self.shipping_date.as_deref(),
                "shipping date must be formatted as YYYY-MM-DD HH:MM",
            )
            .date(
                self.tracking_shipping_date.as_deref(),
                "tracking shipping date must be formatted as YYYYMMDD",
            )
            .finish()
    }
}

/// Per-item outcome of a create call.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreateResultItem {
    pub tracking_number: String,
    pub courier_code: String,
    pub order_number: String,
}

pub type CreateResult = BatchResult<CreateResultItem>;

/// A `{tracking_number, courier_code}` pair, the element shape shared by
/// the delete, stop-update and refresh batches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackingItem {
    pub tracking_number: String,
    pub courier_code: String,
}

impl Validate for TrackingItem {
    fn validate(&self) -> std::result::Result<(), Failures> {
        Checker::new()
            .required(&self.tracking_number, "tracking number cannot be empty")
            .required(&self.courier_code, "courier code cannot be empty")
            .finish()
    }
}

/// Failed refresh item, with the API's per-item error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshError {
    #[serde(flatten)]
    pub item: TrackingItem,
    #[serde(default, rename = "errorCode")]
    pub error_code: i32,
    #[serde(default, rename = "errorMessage")]
    pub error_message: String,
}

/// One tracked parcel as returned by the query endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Track {
    pub tracking_number: String,
    pub courier_code: String,
    pub logistics_channel: String,
    /// Two-letter destination country code.
    pub destination: String,
    /// Whether the system keeps updating this record automatically.
    pub track_update: bool,
    pub consignee: String,
    pub updating: bool,
    pub created_at: String,
    pub update_date: String,
    pub order_create_time: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub title: String,
    pub order_number: String,
    pub note: String,
    pub customer_name: String,
    pub archived: bool,
    /// Origin country name.
    pub original: String,
    pub destination_country: String,
    /// Days from pickup to delivery.
    pub transit_time: i64,
    /// Days since the last checkpoint update.
    pub stay_time: i64,
    pub origin_info: TrackOriginInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackOriginInfo {
    /// Tracking number assigned in the destination country.
    pub destination_track_number: String,
    pub reference_number: String,
    #[serde(rename = "exchangeNumber")]
    pub exchange_number: String,
    pub received_date: String,
    pub dispatched_date: String,
    pub departed_airport_date: String,
    pub arrived_abroad_date: String,
    pub customs_received_date: String,
    pub arrived_destination_date: String,
    pub weblink: String,
    pub courier_phone: String,
    #[serde(rename = "trackinfo")]
    pub track_info: Vec<TrackInfo>,
    pub service_code: String,
    pub status_info: String,
    pub weight: String,
    pub destination_info: String,
    pub latest_event: String,
    // The wire name carries the API's own typo.
    #[serde(rename = "lastest_checkpoint_time")]
    pub latest_checkpoint_time: String,
}

/// One checkpoint scan.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackInfo {
    pub checkpoint_date: String,
    pub tracking_detail: String,
    pub location: String,
    pub checkpoint_delivery_status: String,
    #[serde(rename = "checkpoint_delivery_substatus")]
    pub checkpoint_delivery_sub_status: String,
}

/// Query filters for the tracking-record list.
///
/// Date bounds are epoch timestamps. Unset or non-positive pagination
/// fields default to 100 items and page 1 at dispatch time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TracksQueryParams {
    /// Comma-separated tracking numbers, at most 40.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_numbers: Option<String>,
    /// Comma-separated order numbers, at most 40.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_numbers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_status: Option<String>,
    /// `"true"` for archived records, `"false"` for active ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_amount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_amount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date_max: Option<i64>,
    /// Result language, `cn` or `en`; honored only when the courier
    /// supports multilingual results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Validate for TracksQueryParams {
    fn validate(&self) -> std::result::Result<(), Failures> {
        Checker::new()
            .csv_max(
                self.tracking_numbers.as_deref(),
                MAX_BATCH_ITEMS,
                "no more than 40 tracking numbers per query",
            )
            .csv_max(
                self.order_numbers.as_deref(),
                MAX_BATCH_ITEMS,
                "no more than 40 order numbers per query",
            )
            .one_of(
                self.delivery_status.as_deref(),
                DELIVERY_STATUSES,
                "invalid delivery status",
            )
            .one_of(
                self.archived_status.as_deref(),
                ARCHIVED_STATUSES,
                "invalid archived status",
            )
            .one_of(self.lang.as_deref(), LANGUAGES, "invalid result language")
            .finish()
    }
}

/// One page of query results. `is_last_page` is derived: the server does
/// not return it, a page shorter than the requested size is the last one.
#[derive(Debug, Clone, Default)]
pub struct TrackPage {
    pub items: Vec<Track>,
    pub is_last_page: bool,
}

/// Filters for the status-count statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusStatisticRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_date_max: Option<i64>,
}

/// Tracked-parcel counts per delivery status.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatusStatistic {
    pub pending: i64,
    #[serde(rename = "notfound")]
    pub not_found: i64,
    pub transit: i64,
    pub pickup: i64,
    pub delivered: i64,
    pub expired: i64,
    pub undelivered: i64,
    pub exception: i64,
    #[serde(rename = "infoReceived")]
    pub info_received: i64,
}

/// One courier/origin/destination triple to compute transit times for.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransitTimeRequest {
    pub courier_code: String,
    /// Two-letter origin country code.
    pub original_code: String,
    /// Two-letter destination country code.
    pub destination_code: String,
}

impl Validate for TransitTimeRequest {
    fn validate(&self) -> std::result::Result<(), Failures> {
        Checker::new()
            .required(&self.courier_code, "courier code cannot be empty")
            .required(&self.original_code, "origin country code cannot be empty")
            .required(
                &self.destination_code,
                "destination country code cannot be empty",
            )
            .finish()
    }
}

/// Transit-time statistics for one courier/origin/destination triple.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransitTime {
    pub courier_code: String,
    pub original_code: String,
    pub destination_code: String,
    /// Undelivered tracking numbers counted.
    pub total: i64,
    /// Delivered tracking numbers counted.
    pub delivered: i64,
    /// Share of parcels delivered within 1-7 days, and so on below.
    #[serde(rename = "range_1_7")]
    pub range_1_to_7: f64,
    #[serde(rename = "range_8_15")]
    pub range_8_to_15: f64,
    #[serde(rename = "range_16_30")]
    pub range_16_to_30: f64,
    #[serde(rename = "range_31_60")]
    pub range_31_to_60: f64,
    #[serde(rename = "range_60_up")]
    pub range_60_up: f64,
    /// Average delivery time in days.
    pub average_delivery_time: f64,
}

pub struct TrackingService<'a> {
    pub(crate) client: &'a TrackingClient,
}

impl TrackingService<'_> {
    /// Registers one or more tracking numbers.
    pub async fn create(&self, req: &CreateTrackRequest) -> Result<CreateResult> {
        req.validate()?;
        self.client
            .dispatch(Method::PUT, "/create", move |r| r.json(req))
            .await
    }

    /// Queries tracking records, returning one page of results.
    pub async fn query(&self, params: &TracksQueryParams) -> Result<TrackPage> {
        params.validate()?;

        let mut params = params.clone();
        let items_amount = params
            .items_amount
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_ITEMS_AMOUNT);
        params.items_amount = Some(items_amount);
        params.pages_amount = Some(
            params
                .pages_amount
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_PAGES_AMOUNT),
        );

        let items: Vec<Track> = self
            .client
            .dispatch(Method::GET, "/get", move |r| r.query(&params))
            .await?;
        let is_last_page = items.len() < items_amount as usize;
        Ok(TrackPage {
            items,
            is_last_page,
        })
    }

    /// Removes 1 to 40 tracking numbers.
    pub async fn delete(&self, items: &[TrackingItem]) -> Result<BatchResult<TrackingItem>> {
        validate_batch(items)?;
        self.client
            .dispatch(Method::DELETE, "/delete", move |r| r.json(items))
            .await
    }

    /// Stops auto-updating 1 to 40 tracking numbers.
    pub async fn stop_update(&self, items: &[TrackingItem]) -> Result<BatchResult<TrackingItem>> {
        validate_batch(items)?;
        self.client
            .dispatch(Method::POST, "/notupdate", move |r| r.json(items))
            .await
    }

    /// Forces a refresh of 1 to 40 tracking numbers.
    pub async fn refresh(
        &self,
        items: &[TrackingItem],
    ) -> Result<BatchResult<TrackingItem, RefreshError>> {
        validate_batch(items)?;
        self.client
            .dispatch(Method::POST, "/manualupdate", move |r| r.json(items))
            .await
    }

    /// Aggregates tracked-parcel counts per delivery status.
    pub async fn status_statistic(
        &self,
        req: &StatusStatisticRequest,
    ) -> Result<StatusStatistic> {
        self.client
            .dispatch(Method::GET, "/status", move |r| r.query(req))
            .await
    }

    /// Transit-time statistics for 1 to 40 courier/origin/destination
    /// triples. The endpoint takes its batch as a JSON body on a GET.
    pub async fn transit_time(
        &self,
        items: &[TransitTimeRequest],
    ) -> Result<BatchResult<TransitTime>> {
        validate_batch(items)?;
        self.client
            .dispatch(Method::GET, "/transittime", move |r| r.json(items))
            .await
    }
}

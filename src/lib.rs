pub mod account;
pub mod client;
pub mod config;
pub mod constants;
pub mod courier;
pub mod error;
pub mod response;
pub mod tracking;
pub mod validate;
pub mod webhook;

pub use account::{AccountProfile, AccountService};
pub use client::TrackingClient;
pub use config::Config;
pub use courier::{Courier, CourierService};
pub use error::{Error, Result};
pub use response::{BatchResult, Envelope};
pub use tracking::{
    CreateResult, CreateResultItem, CreateTrackRequest, RefreshError, StatusStatistic,
    StatusStatisticRequest, Track, TrackInfo, TrackOriginInfo, TrackPage, TrackingItem,
    TrackingService, TracksQueryParams, TransitTime, TransitTimeRequest,
};
pub use validate::{Failures, Validate};
pub use webhook::{Webhook, WebhookRequest, WebhookVerify};

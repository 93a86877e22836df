use std::time::Duration;

pub const BASE_URL: &str = "https://api.51tracking.com/v3/trackings";
pub const SANDBOX_SUFFIX: &str = "/sandbox";
pub const API_KEY_HEADER: &str = "Tracking-Api-Key";
pub const USER_AGENT: &str = concat!(
    "51tracking API Client-Rust/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/11philip22/tracking51-client-rs)"
);

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RETRY_COUNT: u32 = 2;
pub const DEFAULT_RETRY_WAIT_MS: u64 = 5_000;
pub const DEFAULT_RETRY_MAX_WAIT_MS: u64 = 10_000;

/// A configured request interval below this floor is raised to it.
pub const MIN_INTERVAL_MS: u64 = 1_000;

/// Batch endpoints accept at most this many items per call.
pub const MAX_BATCH_ITEMS: usize = 40;

pub const DEFAULT_ITEMS_AMOUNT: u32 = 100;
pub const DEFAULT_PAGES_AMOUNT: u32 = 1;

// Response codes carried in the envelope body.
// https://www.51tracking.com/v3/api-index#response
pub const OK: i32 = 200;
pub const PAYMENT_REQUIRED: i32 = 203;
pub const NO_CONTENT: i32 = 204;
pub const BAD_REQUEST: i32 = 400;
pub const UNAUTHORIZED: i32 = 401;
pub const NOT_FOUND: i32 = 404;
pub const TIMED_OUT: i32 = 408;
pub const PARAMETERS_TOO_LONG: i32 = 411;
pub const PARAMETERS_FORMAT: i32 = 412;
pub const PARAMETERS_OVER_LIMIT: i32 = 413;
pub const TOO_MANY_REQUESTS: i32 = 429;

pub const CHINESE_LANGUAGE: &str = "cn";
pub const ENGLISH_LANGUAGE: &str = "en";
pub const LANGUAGES: &[&str] = &[CHINESE_LANGUAGE, ENGLISH_LANGUAGE];

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_NOT_FOUND: &str = "notfound";
pub const STATUS_TRANSIT: &str = "transit";
pub const STATUS_PICKUP: &str = "pickup";
pub const STATUS_DELIVERED: &str = "delivered";
pub const STATUS_EXPIRED: &str = "expired";
pub const STATUS_UNDELIVERED: &str = "undelivered";
pub const STATUS_EXCEPTION: &str = "exception";
pub const STATUS_INFO_RECEIVED: &str = "infoReceived";

pub const DELIVERY_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_NOT_FOUND,
    STATUS_TRANSIT,
    STATUS_PICKUP,
    STATUS_DELIVERED,
    STATUS_EXPIRED,
    STATUS_UNDELIVERED,
    STATUS_EXCEPTION,
    STATUS_INFO_RECEIVED,
];

pub const ARCHIVED_STATUSES: &[&str] = &["true", "false"];

pub fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

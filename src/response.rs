//! Response envelope decoding.
//!
//! Every endpoint wraps its payload in `{code, message, data}`. A body code
//! of 200 is success, 204 is a successful call that matched no data (the
//! caller sees an empty payload); everything else is a logical failure even
//! when the transport returned HTTP 200.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::constants::{NO_CONTENT, OK};
use crate::error::{Error, Result};

/// Wire-level wrapper common to every response.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

/// Success/error item lists returned by the batch endpoints.
#[derive(Debug, Deserialize)]
pub struct BatchResult<S, E = S> {
    #[serde(default)]
    pub success: Vec<S>,
    #[serde(default)]
    pub error: Vec<E>,
}

impl<S, E> Default for BatchResult<S, E> {
    fn default() -> Self {
        Self {
            success: Vec::new(),
            error: Vec::new(),
        }
    }
}

/// Unwraps a response body into the expected payload type.
///
/// The envelope is decoded in two steps so that an error response whose
/// `data` does not match `T` still surfaces as an [`Error::Api`] rather than
/// a decoding failure.
pub(crate) fn decode<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let envelope: Envelope<serde_json::Value> = serde_json::from_slice(body)?;
    match envelope.code {
        OK | NO_CONTENT => match envelope.data {
            Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
            _ => Ok(T::default()),
        },
        code => Err(Error::api(code, envelope.message)),
    }
}

#[derive(Deserialize)]
struct CodeProbe {
    code: i32,
}

/// Reads just the envelope code, used by the retry policy to spot a
/// rate-limit code hidden behind an HTTP 200.
pub(crate) fn body_code(body: &[u8]) -> Option<i32> {
    serde_json::from_slice::<CodeProbe>(body)
        .ok()
        .map(|probe| probe.code)
}

/// Maps a rate-limited response into the error the caller would have seen,
/// surfaced when the retry budget runs out.
pub(crate) fn failure(status: StatusCode, body: &[u8]) -> Error {
    match serde_json::from_slice::<Envelope<serde_json::Value>>(body) {
        Ok(envelope) => Error::api(envelope.code, envelope.message),
        Err(_) => Error::Status {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Profile {
        email: String,
        sms: i32,
    }

    #[test]
    fn decodes_success_payload() {
        let body = br#"{"code": 200, "message": "ok", "data": {"email": "a@b.cn", "sms": 3}}"#;
        let profile: Profile = decode(body).unwrap();
        assert_eq!(
            profile,
            Profile {
                email: "a@b.cn".into(),
                sms: 3
            }
        );
    }

    #[test]
    fn no_content_yields_empty_payload() {
        let body = br#"{"code": 204, "message": "no data"}"#;
        let items: Vec<Profile> = decode(body).unwrap();
        assert!(items.is_empty());
        let body = br#"{"code": 200, "message": "ok", "data": null}"#;
        let profile: Profile = decode(body).unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn non_success_code_maps_to_api_error() {
        let body = br#"{"code": 401, "message": "denied", "data": "garbage"}"#;
        let err = decode::<Profile>(body).unwrap_err();
        match err {
            Error::Api { code, .. } => assert_eq!(code, 401),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let err = decode::<Profile>(b"<html>gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn probes_the_body_code() {
        assert_eq!(body_code(br#"{"code": 429, "message": "slow down"}"#), Some(429));
        assert_eq!(body_code(b"not json"), None);
    }

    #[test]
    fn batch_result_defaults_missing_lists() {
        let body = br#"{"code": 200, "message": "ok", "data": {"success": []}}"#;
        let result: BatchResult<Profile> = decode(body).unwrap();
        assert!(result.success.is_empty());
        assert!(result.error.is_empty());
    }
}

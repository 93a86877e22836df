//! Pre-flight request validation.
//!
//! Each request type declares an ordered list of field rules through a
//! [`Checker`]; rule failures accumulate per struct, and batch validation
//! halts at the first invalid element.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::MAX_BATCH_ITEMS;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

// "+<2-digit country code><11-digit number>", e.g. +8612345678910
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\d{2}\d{11}$").expect("phone pattern is valid"));

/// Messages for every rule a request value violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failures(Vec<String>);

impl Failures {
    pub(crate) fn of(message: impl Into<String>) -> Self {
        Failures(vec![message.into()])
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Failures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

/// Implemented by every request type that is checked before dispatch.
pub trait Validate {
    fn validate(&self) -> Result<(), Failures>;
}

/// Collects rule violations for one request value.
///
/// Rules taking an `Option<&str>` only apply when the field is present and
/// non-empty, mirroring optional fields that are format-checked but not
/// required.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    failures: Vec<String>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail_if(mut self, violated: bool, message: &str) -> Self {
        if violated {
            self.failures.push(message.to_string());
        }
        self
    }

    pub fn required(self, value: &str, message: &str) -> Self {
        let empty = value.trim().is_empty();
        self.fail_if(empty, message)
    }

    pub fn email(self, value: Option<&str>, message: &str) -> Self {
        match present(value) {
            Some(v) => {
                let ok = EMAIL_RE.is_match(v);
                self.fail_if(!ok, message)
            }
            None => self,
        }
    }

    pub fn phone(self, value: Option<&str>, message: &str) -> Self {
        match present(value) {
            Some(v) => {
                let ok = PHONE_RE.is_match(v);
                self.fail_if(!ok, message)
            }
            None => self,
        }
    }

    /// Checks a `YYYY-MM-DD HH:MM` timestamp.
    pub fn datetime(self, value: Option<&str>, message: &str) -> Self {
        match present(value) {
            Some(v) => {
                let ok = NaiveDateTime::parse_from_str(v, DATETIME_FORMAT).is_ok();
                self.fail_if(!ok, message)
            }
            None => self,
        }
    }

    /// Checks a compact `YYYYMMDD` date.
    pub fn date(self, value: Option<&str>, message: &str) -> Self {
        match present(value) {
            Some(v) => {
                let ok = NaiveDate::parse_from_str(v, COMPACT_DATE_FORMAT).is_ok();
                self.fail_if(!ok, message)
            }
            None => self,
        }
    }

    pub fn one_of(self, value: Option<&str>, allowed: &[&str], message: &str) -> Self {
        match present(value) {
            Some(v) => {
                let ok = allowed.contains(&v);
                self.fail_if(!ok, message)
            }
            None => self,
        }
    }

    /// Bounds the entry count of a comma-separated list.
    pub fn csv_max(self, value: Option<&str>, max: usize, message: &str) -> Self {
        match present(value) {
            Some(v) => {
                let count = v.split(',').count();
                self.fail_if(count > max, message)
            }
            None => self,
        }
    }

    pub fn finish(self) -> Result<(), Failures> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(Failures(self.failures))
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validates a batch request: 1 to [`MAX_BATCH_ITEMS`] elements, each passing
/// its own field rules. Stops at the first invalid element.
pub fn validate_batch<T: Validate>(items: &[T]) -> Result<(), Failures> {
    if items.is_empty() {
        return Err(Failures::of("the request batch cannot be empty"));
    }
    if items.len() > MAX_BATCH_ITEMS {
        return Err(Failures::of(format!(
            "the request batch cannot exceed {MAX_BATCH_ITEMS} items"
        )));
    }
    for item in items {
        item.validate()?;
    }
    Ok(())
}

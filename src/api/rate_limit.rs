// src/api/rate_limit.rs
//! Rate-limit bookkeeping from response headers.

use crate::constants::{
    DEFAULT_RATE_LIMIT, HEADER_RATE_LIMIT_LIMIT, HEADER_RATE_LIMIT_REMAINING,
    HEADER_RATE_LIMIT_RESET,
};
use crate::error::ClientError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use reqwest::header::HeaderMap;

/// The most recently observed rate-limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    /// When the window resets. `None` until a response reports it.
    pub reset: Option<DateTime<Utc>>,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RATE_LIMIT,
            remaining: DEFAULT_RATE_LIMIT,
            reset: None,
        }
    }
}

/// Shared rate-limit state, updated after every response.
///
/// Readers always see a complete snapshot from a single response.
#[derive(Debug, Default)]
pub struct RateLimitState {
    current: RwLock<RateLimit>,
}

/// Header values parsed from one response. Absent headers stay `None`.
#[derive(Debug, Default, PartialEq, Eq)]
struct RateLimitUpdate {
    limit: Option<u64>,
    remaining: Option<u64>,
    reset: Option<DateTime<Utc>>,
}

impl RateLimitState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RateLimit {
        *self.current.read()
    }

    /// Apply the rate-limit headers of a response.
    ///
    /// All present headers are parsed before anything is written, so an
    /// invalid value leaves the previous state untouched.
    pub(crate) fn observe(&self, headers: &HeaderMap) -> Result<(), ClientError> {
        let update = parse_headers(headers).map_err(|err| {
            log::warn!("{}", err);
            err
        })?;
        if update == RateLimitUpdate::default() {
            return Ok(());
        }

        let mut current = self.current.write();
        if let Some(limit) = update.limit {
            current.limit = limit;
        }
        if let Some(remaining) = update.remaining {
            current.remaining = remaining;
        }
        if let Some(reset) = update.reset {
            current.reset = Some(reset);
        }
        log::trace!(
            "rate limit: {}/{} remaining, reset {:?}",
            current.remaining,
            current.limit,
            current.reset
        );
        Ok(())
    }
}

fn parse_headers(headers: &HeaderMap) -> Result<RateLimitUpdate, ClientError> {
    let reset = match header_number(headers, HEADER_RATE_LIMIT_RESET)? {
        Some((seconds, raw)) => Some(
            i64::try_from(seconds)
                .ok()
                .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
                .ok_or(ClientError::RateLimitHeader {
                    header: HEADER_RATE_LIMIT_RESET,
                    value: raw,
                })?,
        ),
        None => None,
    };

    Ok(RateLimitUpdate {
        limit: header_number(headers, HEADER_RATE_LIMIT_LIMIT)?.map(|(value, _)| value),
        remaining: header_number(headers, HEADER_RATE_LIMIT_REMAINING)?.map(|(value, _)| value),
        reset,
    })
}

/// Read a header as an unsigned integer, returning the raw text alongside.
fn header_number(
    headers: &HeaderMap,
    name: &'static str,
) -> Result<Option<(u64, String)>, ClientError> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };
    let raw = String::from_utf8_lossy(value.as_bytes()).into_owned();
    match raw.trim().parse::<u64>() {
        Ok(number) => Ok(Some((number, raw))),
        Err(_) => Err(ClientError::RateLimitHeader {
            header: name,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_defaults_before_any_response() {
        let state = RateLimitState::new();
        assert_eq!(
            state.snapshot(),
            RateLimit {
                limit: 10_000,
                remaining: 10_000,
                reset: None
            }
        );
    }

    #[test]
    fn test_observe_all_headers() {
        let state = RateLimitState::new();
        state
            .observe(&headers(&[
                ("x-ratelimit-limit", "1000"),
                ("x-ratelimit-remaining", "99"),
                ("x-ratelimit-reset", "1598795193"),
            ]))
            .unwrap();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.limit, 1000);
        assert_eq!(snapshot.remaining, 99);
        assert_eq!(snapshot.reset.map(|reset| reset.timestamp()), Some(1_598_795_193));
    }

    #[test]
    fn test_invalid_header_leaves_state_untouched() {
        let state = RateLimitState::new();
        let err = state
            .observe(&headers(&[
                ("x-ratelimit-limit", "1000"),
                ("x-ratelimit-remaining", "lots"),
            ]))
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::RateLimitHeader { header: "x-ratelimit-remaining", ref value } if value == "lots"
        ));
        assert_eq!(state.snapshot(), RateLimit::default());
    }

    #[test]
    fn test_absent_headers_keep_previous_values() {
        let state = RateLimitState::new();
        state
            .observe(&headers(&[("x-ratelimit-remaining", "5")]))
            .unwrap();
        state.observe(&HeaderMap::new()).unwrap();
        assert_eq!(state.snapshot().remaining, 5);
        assert_eq!(state.snapshot().limit, 10_000);
    }
}

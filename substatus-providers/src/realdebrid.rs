//! Real-Debrid adapter.
//!
//! Active marker: `premium == true` or `type == "premium"`
//! (case-insensitive). Expiry comes from `expiration`, which the service
//! has emitted both as epoch seconds and as a date string; `premium_until`
//! is the fallback, always epoch seconds.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use substatus_core::{Credential, ProviderFailure, ProviderKind, ProviderStatus, time};
use substatus_fetch::HttpClient;

use crate::adapter;

pub(crate) const ENDPOINT: &str = "https://api.real-debrid.com/rest/1.0/user";
pub(crate) const QUERY_PARAM: &str = "auth_token";

#[derive(Debug, Default, Deserialize)]
struct UserResponse {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    user: Option<String>,
    /// Bool on some plans, a number of remaining seconds on others; only a
    /// literal `true` counts as the marker.
    #[serde(default)]
    premium: Option<Value>,
    #[serde(default, rename = "type")]
    account_type: Option<String>,
    /// Epoch seconds or a date string, depending on API vintage.
    #[serde(default)]
    expiration: Option<Value>,
    #[serde(default, alias = "premiumUntil")]
    premium_until: Option<f64>,
}

pub(crate) async fn fetch(
    client: &HttpClient,
    credential: &Credential,
) -> Result<ProviderStatus, ProviderFailure> {
    let endpoint = credential.endpoint.as_deref().unwrap_or(ENDPOINT);
    let body = adapter::get_json(client, endpoint, credential, QUERY_PARAM).await?;
    parse(body, Utc::now())
}

fn parse(body: Value, now: DateTime<Utc>) -> Result<ProviderStatus, ProviderFailure> {
    let user: UserResponse = adapter::decode(body)?;

    let username = user.username.clone().or_else(|| user.user.clone());
    let premium = user.premium.as_ref().and_then(Value::as_bool) == Some(true)
        || user
            .account_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("premium"));

    if !premium {
        return Ok(ProviderStatus::inactive(ProviderKind::RealDebrid).with_username(username));
    }

    let (days, expires_at) = match resolve_time(&user, now) {
        Some(t) => (Some(t.days), t.expires_at),
        None => (None, None),
    };
    Ok(ProviderStatus::active(ProviderKind::RealDebrid, days, expires_at).with_username(username))
}

/// Resolves the expiry from whichever time field the payload carries.
/// A present `expiration` is authoritative even when unresolvable.
fn resolve_time(user: &UserResponse, now: DateTime<Utc>) -> Option<time::TimeRemaining> {
    if let Some(expiration) = user.expiration.as_ref().filter(|v| !is_empty_field(v)) {
        if let Some(num) = expiration.as_f64() {
            // Large numbers are epoch seconds; anything smaller is read as
            // epoch milliseconds, which in practice means long elapsed.
            if num > 1.0e9 {
                return Some(time::from_epoch_seconds(num, now));
            }
            return time::from_epoch_millis(num, now);
        }
        if let Some(s) = expiration.as_str() {
            return time::from_date_string(s, now);
        }
        return None;
    }
    user.premium_until
        .map(|secs| time::from_epoch_seconds(secs, now))
}

fn is_empty_field(v: &Value) -> bool {
    v.is_null() || v.as_f64() == Some(0.0) || v.as_str() == Some("")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;
    use substatus_core::PremiumState;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_premium_with_epoch_premium_until() {
        let t = now();
        let until = t + Duration::days(2);
        let body = json!({
            "username": "alice",
            "premium": true,
            "premium_until": until.timestamp(),
        });

        let status = parse(body, t).unwrap();
        assert_eq!(status.premium, PremiumState::Active);
        assert_eq!(status.days_remaining, Some(2));
        assert!(!status.error);
        assert_eq!(status.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_premium_type_marker_case_insensitive() {
        let body = json!({ "type": "PREMIUM" });
        let status = parse(body, now()).unwrap();
        assert_eq!(status.premium, PremiumState::Active);
        // No time field at all: days stay unresolved.
        assert_eq!(status.days_remaining, None);
    }

    #[test]
    fn test_expiration_date_string() {
        let t = now();
        let expiry = t + Duration::days(10);
        let body = json!({ "premium": true, "expiration": expiry.to_rfc3339() });

        let status = parse(body, t).unwrap();
        assert_eq!(status.days_remaining, Some(10));
        assert_eq!(status.expires_at, Some(expiry));
    }

    #[test]
    fn test_expiration_epoch_number() {
        let t = now();
        let expiry = t + Duration::days(3);
        let body = json!({ "premium": true, "expiration": expiry.timestamp() });

        let status = parse(body, t).unwrap();
        assert_eq!(status.days_remaining, Some(3));
    }

    #[test]
    fn test_small_numeric_expiration_reads_as_epoch_millis() {
        let t = now();
        // 1971 in milliseconds: resolved, elapsed, days clamp to zero.
        let body = json!({ "premium": true, "expiration": 86_400_000 });

        let status = parse(body, t).unwrap();
        assert_eq!(status.premium, PremiumState::Active);
        assert_eq!(status.days_remaining, Some(0));
        assert_eq!(
            status.expires_at,
            Some(DateTime::from_timestamp(86_400, 0).unwrap())
        );
    }

    #[test]
    fn test_inactive_forces_zero_days_despite_stray_time_field() {
        let t = now();
        let until = t + Duration::days(30);
        let body = json!({ "premium": false, "premium_until": until.timestamp() });

        let status = parse(body, t).unwrap();
        assert_eq!(status.premium, PremiumState::Inactive);
        assert_eq!(status.days_remaining, Some(0));
        assert_eq!(status.expires_at, None);
    }

    #[test]
    fn test_premium_as_number_is_not_the_marker() {
        // The live API reports remaining seconds under `premium` on some
        // plans; a number alone does not confirm the subscription.
        let body = json!({ "premium": 864000 });
        let status = parse(body, now()).unwrap();
        assert_eq!(status.premium, PremiumState::Inactive);
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        let result = parse(json!("oops"), now());
        assert_eq!(result.unwrap_err(), ProviderFailure::MalformedResponse);
    }
}

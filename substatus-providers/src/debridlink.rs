//! Debrid-Link adapter.
//!
//! The only provider whose auth scheme and endpoint are commonly
//! overridden; both come in on the credential. The envelope must carry
//! `success == true` and a `value` object; activity is inferred from the
//! computed days on `value.premiumLeft` (remaining seconds).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use substatus_core::{Credential, ProviderFailure, ProviderKind, ProviderStatus, time};
use substatus_fetch::HttpClient;

use crate::adapter;

pub(crate) const ENDPOINT: &str = "https://debrid-link.com/api/account/infos";
pub(crate) const QUERY_PARAM: &str = "apikey";

#[derive(Debug, Default, Deserialize)]
struct InfosResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    value: Option<AccountValue>,
}

#[derive(Debug, Default, Deserialize)]
struct AccountValue {
    #[serde(default)]
    username: Option<String>,
    #[serde(default, rename = "premiumLeft", alias = "premium_left")]
    premium_left: Option<f64>,
    #[serde(default, rename = "accountType", alias = "account_type")]
    account_type: Option<Value>,
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
    let infos: InfosResponse = adapter::decode(body)?;

    if !infos.success {
        return Err(ProviderFailure::MalformedResponse);
    }
    let value = infos.value.ok_or(ProviderFailure::MalformedResponse)?;

    let username = value.username.clone();
    let secs = value.premium_left.unwrap_or(0.0);
    let remaining = if secs > 0.0 {
        time::from_duration_seconds(secs, now)
    } else {
        time::TimeRemaining::none()
    };

    if remaining.days > 0 {
        return Ok(ProviderStatus::active(
            ProviderKind::DebridLink,
            Some(remaining.days),
            remaining.expires_at,
        )
        .with_username(username));
    }

    let account_type = value
        .account_type
        .as_ref()
        .map_or_else(|| "?".to_string(), value_display);
    Ok(ProviderStatus::inactive(ProviderKind::DebridLink)
        .with_username(username)
        .with_note(format!("accountType={account_type}")))
}

fn value_display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use substatus_core::PremiumState;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_premium_left_duration() {
        let body = json!({
            "success": true,
            "value": { "username": "dluser", "premiumLeft": 86_401 }
        });

        let status = parse(body, now()).unwrap();
        assert_eq!(status.premium, PremiumState::Active);
        assert_eq!(status.days_remaining, Some(2));
        assert_eq!(status.username.as_deref(), Some("dluser"));
    }

    #[test]
    fn test_zero_premium_left_is_inactive_with_account_type() {
        let body = json!({
            "success": true,
            "value": { "username": "dluser", "premiumLeft": 0, "accountType": 0 }
        });

        let status = parse(body, now()).unwrap();
        assert_eq!(status.premium, PremiumState::Inactive);
        assert_eq!(status.days_remaining, Some(0));
        assert_eq!(status.note.as_deref(), Some("accountType=0"));
    }

    #[test]
    fn test_missing_account_type_renders_placeholder() {
        let body = json!({ "success": true, "value": {} });
        let status = parse(body, now()).unwrap();
        assert_eq!(status.note.as_deref(), Some("accountType=?"));
    }

    #[test]
    fn test_unsuccessful_envelope_is_malformed() {
        let body = json!({ "success": false, "error": "badToken" });
        assert_eq!(
            parse(body, now()).unwrap_err(),
            ProviderFailure::MalformedResponse
        );
    }

    #[test]
    fn test_missing_value_is_malformed() {
        let body = json!({ "success": true });
        assert_eq!(
            parse(body, now()).unwrap_err(),
            ProviderFailure::MalformedResponse
        );
    }
}

//! TorBox adapter.
//!
//! The loosest payload of the five: the user object may live under `data`,
//! under `user`, or at the top level, and the subscription flag and time
//! fields each come in several spellings. `success === false` with no data
//! object means the service answered without resolving the account, which
//! is the ambiguous case. Subscription is active when either the explicit
//! flag is set or the computed days are positive; the two can disagree, in
//! which case the flag wins and the days stay unresolved.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use substatus_core::{Credential, ProviderFailure, ProviderKind, ProviderStatus, time};
use substatus_fetch::HttpClient;

use crate::adapter;

pub(crate) const ENDPOINT: &str = "https://api.torbox.app/v1/api/user/me?settings=true";
pub(crate) const QUERY_PARAM: &str = "token";

#[derive(Debug, Default, Deserialize)]
struct TorBoxUser {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "isSubscribed")]
    is_subscribed: Option<bool>,
    #[serde(default, alias = "premiumExpiresAt", alias = "premium_until_iso")]
    premium_expires_at: Option<String>,
    #[serde(
        default,
        alias = "remainingPremiumSeconds",
        alias = "premium_left",
        alias = "premiumLeft"
    )]
    remaining_seconds: Option<f64>,
    #[serde(default)]
    note: Option<String>,
}

pub(crate) async fn fetch(
    client: &HttpClient,
    credential: &Credential,
) -> Result<ProviderStatus, ProviderFailure> {
    let endpoint = credential.endpoint.as_deref().unwrap_or(ENDPOINT);
    let body = adapter::get_json(client, endpoint, credential, QUERY_PARAM).await?;
    parse(&body, Utc::now())
}

fn parse(body: &Value, now: DateTime<Utc>) -> Result<ProviderStatus, ProviderFailure> {
    let success = body.get("success").and_then(Value::as_bool);
    let data = body.get("data").filter(|v| !v.is_null());

    if success == Some(false) && data.is_none() {
        return Err(ProviderFailure::AmbiguousState);
    }

    let user_value = data
        .or_else(|| body.get("user").filter(|v| !v.is_null()))
        .unwrap_or(body);
    let user: TorBoxUser = serde_json::from_value(user_value.clone()).unwrap_or_default();

    let username = user.username.clone().or_else(|| user.email.clone());
    let subscribed = user.is_subscribed == Some(true);

    let remaining = if let Some(iso) = user
        .premium_expires_at
        .as_deref()
        .filter(|s| !s.is_empty())
    {
        time::from_date_string(iso, now)
    } else {
        user.remaining_seconds
            .filter(|s| *s > 0.0)
            .map(|s| time::from_duration_seconds(s, now))
    };

    let days = remaining.map(|t| t.days);
    let has_days = days.is_some_and(|d| d > 0);

    if subscribed || has_days {
        let expires_at = remaining.and_then(|t| t.expires_at);
        return Ok(ProviderStatus::active(
            ProviderKind::TorBox,
            if has_days { days } else { None },
            expires_at,
        )
        .with_username(username));
    }

    let note = body
        .get("error")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .map(String::from)
        .or(user.note)
        .unwrap_or_else(|| "not subscribed".to_string());
    Ok(ProviderStatus::inactive(ProviderKind::TorBox)
        .with_username(username)
        .with_note(note))
}

// ============================================================================
// Tests
// ============================================================================

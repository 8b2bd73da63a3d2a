//! AllDebrid adapter.
//!
//! The envelope must carry `status == "success"` and a `data.user` object;
//! anything else is a malformed response. Active iff `data.user.isPremium`,
//! expiry from `data.user.premiumUntil` in epoch seconds.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use substatus_core::{Credential, ProviderFailure, ProviderKind, ProviderStatus, time};
use substatus_fetch::HttpClient;

use crate::adapter;

pub(crate) const ENDPOINT: &str = "https://api.alldebrid.com/v4/user";
pub(crate) const QUERY_PARAM: &str = "apikey";

#[derive(Debug, Default, Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<UserData>,
}

#[derive(Debug, Default, Deserialize)]
struct UserData {
    #[serde(default)]
    user: Option<UserBody>,
}

#[derive(Debug, Default, Deserialize)]
struct UserBody {
    #[serde(default)]
    username: Option<String>,
    #[serde(default, rename = "isPremium", alias = "is_premium")]
    is_premium: bool,
    #[serde(default, rename = "premiumUntil", alias = "premium_until")]
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
    let envelope: UserEnvelope = adapter::decode(body)?;

    if envelope.status.as_deref() != Some("success") {
        return Err(ProviderFailure::MalformedResponse);
    }
    let user = envelope
        .data
        .and_then(|d| d.user)
        .ok_or(ProviderFailure::MalformedResponse)?;

    let username = user.username.clone();
    if !user.is_premium {
        return Ok(ProviderStatus::inactive(ProviderKind::AllDebrid).with_username(username));
    }

    let (days, expires_at) = match user
        .premium_until
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| time::from_epoch_seconds(v, now))
    {
        Some(t) => (Some(t.days), t.expires_at),
        None => (None, None),
    };
    Ok(ProviderStatus::active(ProviderKind::AllDebrid, days, expires_at).with_username(username))
}

// ============================================================================
// Tests
// ============================================================================

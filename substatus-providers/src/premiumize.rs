//! Premiumize adapter.
//!
//! Authenticates via query parameter. The envelope must carry
//! `status == "success"`; activity is inferred from the computed days
//! remaining on `premium_until` (absent counts as zero). The customer id
//! doubles as the display identifier.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use substatus_core::{Credential, ProviderFailure, ProviderKind, ProviderStatus, time};
use substatus_fetch::HttpClient;

use crate::adapter;

pub(crate) const ENDPOINT: &str = "https://www.premiumize.me/api/account/info";
pub(crate) const QUERY_PARAM: &str = "apikey";

#[derive(Debug, Default, Deserialize)]
struct AccountResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    premium_until: Option<f64>,
    /// Numeric in practice, stringified for display.
    #[serde(default)]
    customer_id: Option<Value>,
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
    let account: AccountResponse = adapter::decode(body)?;

    if !account
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("success"))
    {
        return Err(ProviderFailure::MalformedResponse);
    }

    let username = account.customer_id.as_ref().map(adapter_value_display);
    let remaining = time::from_epoch_seconds(account.premium_until.unwrap_or(0.0), now);

    if remaining.days > 0 {
        Ok(
            ProviderStatus::active(
                ProviderKind::Premiumize,
                Some(remaining.days),
                remaining.expires_at,
            )
            .with_username(username),
        )
    } else {
        Ok(ProviderStatus::inactive(ProviderKind::Premiumize).with_username(username))
    }
}

fn adapter_value_display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

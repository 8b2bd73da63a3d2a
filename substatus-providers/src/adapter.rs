//! Uniform adapter dispatch.
//!
//! Every provider lookup goes through [`fetch_status`], which has one
//! contract: it never fails. Failures of any kind become a
//! [`ProviderStatus`] with the error flag set, so the aggregator can treat
//! each provider's outcome as plain data.

use serde_json::Value;
use substatus_core::{Credential, ProviderFailure, ProviderKind, ProviderStatus};
use substatus_fetch::HttpClient;
use tracing::{debug, instrument, warn};

use crate::{alldebrid, debridlink, premiumize, realdebrid, torbox};

/// Fetches the normalized subscription status for one provider.
///
/// An empty secret short-circuits before any network activity.
#[instrument(skip(client, credential), fields(provider = %provider))]
pub async fn fetch_status(
    client: &HttpClient,
    provider: ProviderKind,
    credential: &Credential,
) -> ProviderStatus {
    if credential.is_missing() {
        debug!("Credential missing, no call attempted");
        return ProviderStatus::failed(provider, &ProviderFailure::CredentialMissing);
    }

    let result = match provider {
        ProviderKind::RealDebrid => realdebrid::fetch(client, credential).await,
        ProviderKind::AllDebrid => alldebrid::fetch(client, credential).await,
        ProviderKind::Premiumize => premiumize::fetch(client, credential).await,
        ProviderKind::TorBox => torbox::fetch(client, credential).await,
        ProviderKind::DebridLink => debridlink::fetch(client, credential).await,
    };

    match result {
        Ok(status) => status,
        Err(failure) => {
            warn!(%failure, "Provider lookup failed");
            ProviderStatus::failed(provider, &failure)
        }
    }
}

/// Shared request path for all adapters: send the GET with the credential's
/// auth scheme, map transport and status failures into the taxonomy, and
/// decode the JSON body.
pub(crate) async fn get_json(
    client: &HttpClient,
    endpoint: &str,
    credential: &Credential,
    query_param: &str,
) -> Result<Value, ProviderFailure> {
    let response = client
        .get_account(
            endpoint,
            credential.auth_scheme,
            &credential.secret,
            query_param,
        )
        .await
        .map_err(|e| ProviderFailure::Transport(e.transport_message()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderFailure::UnexpectedStatus(status.as_u16()));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ProviderFailure::Transport(e.to_string()))
}

/// Decodes a provider payload into its typed shape; a non-conforming body
/// is a malformed response.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, ProviderFailure> {
    serde_json::from_value(body).map_err(|_| ProviderFailure::MalformedResponse)
}

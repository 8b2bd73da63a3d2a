//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use substatus_core::{PremiumState, ProviderStatus, Severity};
use substatus_providers::ProviderDescriptor;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a single provider status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub provider: String,
    pub display_name: String,
    pub premium: PremiumState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<u32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_datetime_opt"
    )]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub error: bool,
}

/// Provider info output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfoOutput {
    pub provider: String,
    pub display_name: String,
    pub endpoint: String,
    pub auth_scheme: String,
    pub configured: bool,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&dt.to_rfc3339()),
        None => s.serialize_none(),
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a status sequence.
    pub fn format_statuses(&self, statuses: &[ProviderStatus]) -> Result<String> {
        let outputs: Vec<StatusOutput> = statuses.iter().map(status_to_output).collect();
        self.format(&outputs)
    }

    /// Formats the provider list; `configured` runs parallel to `providers`.
    pub fn format_providers(
        &self,
        providers: &[ProviderDescriptor],
        configured: &[bool],
    ) -> Result<String> {
        let outputs: Vec<ProviderInfoOutput> = providers
            .iter()
            .zip(configured)
            .map(|(desc, configured)| ProviderInfoOutput {
                provider: desc.kind.cli_name().to_string(),
                display_name: desc.display_name().to_string(),
                endpoint: desc.endpoint.to_string(),
                auth_scheme: desc.auth_scheme.as_str().to_string(),
                configured: *configured,
            })
            .collect();

        self.format(&outputs)
    }
}

fn status_to_output(status: &ProviderStatus) -> StatusOutput {
    StatusOutput {
        provider: status.provider.cli_name().to_string(),
        display_name: status.provider.display_name().to_string(),
        premium: status.premium,
        days_remaining: status.days_remaining,
        expires_at: status.expires_at,
        username: status.username.clone(),
        severity: status.severity(),
        note: status.note.clone(),
        error: status.error,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use substatus_core::ProviderKind;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_status_output_shape() {
        let formatter = JsonFormatter::new(false);
        let status = ProviderStatus::active(ProviderKind::RealDebrid, Some(30), None)
            .with_username(Some("alice".to_string()));

        let output = formatter.format_statuses(&[status]).unwrap();
        assert!(output.contains(r#""provider":"realdebrid""#));
        assert!(output.contains(r#""premium":"active""#));
        assert!(output.contains(r#""daysRemaining":30"#));
        assert!(output.contains(r#""severity":"ok""#));
        // Unknown fields are omitted rather than nulled.
        assert!(!output.contains("expiresAt"));
    }

    #[test]
    fn test_failed_status_output() {
        let formatter = JsonFormatter::new(false);
        let status = ProviderStatus::failed(
            ProviderKind::TorBox,
            &substatus_core::ProviderFailure::UnexpectedStatus(401),
        );

        let output = formatter.format_statuses(&[status]).unwrap();
        assert!(output.contains(r#""error":true"#));
        assert!(output.contains(r#""note":"HTTP 401""#));
        assert!(output.contains(r#""severity":"expired""#));
    }
}

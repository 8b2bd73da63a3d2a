//! Status command - check subscriptions across the configured providers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use substatus_core::{AuthScheme, Credential, ProviderKind, ProviderRequest, ProviderStatus};
use substatus_providers::{Aggregator, ProviderRegistry};
use substatus_store::ResultCache;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Real-Debrid API token (or RD_TOKEN).
    #[arg(long, value_name = "TOKEN")]
    pub rd_token: Option<String>,

    /// AllDebrid API key (or AD_KEY).
    #[arg(long, value_name = "KEY")]
    pub ad_key: Option<String>,

    /// Premiumize API key (or PM_KEY).
    #[arg(long, value_name = "KEY")]
    pub pm_key: Option<String>,

    /// TorBox API token (or TB_TOKEN).
    #[arg(long, value_name = "TOKEN")]
    pub tb_token: Option<String>,

    /// Debrid-Link API key (or DL_KEY).
    #[arg(long, value_name = "KEY")]
    pub dl_key: Option<String>,

    /// Debrid-Link auth scheme (bearer or query).
    #[arg(long, default_value = "bearer")]
    pub dl_auth: String,

    /// Debrid-Link endpoint override.
    #[arg(long, value_name = "URL")]
    pub dl_endpoint: Option<String>,

    /// Result cache lifetime in minutes (clamped to 1-1440).
    #[arg(long, default_value = "45")]
    pub cache_minutes: u64,

    /// Show only accounts that are expired or about to expire.
    #[arg(long)]
    pub expiring_only: bool,
}

impl Default for StatusArgs {
    fn default() -> Self {
        Self {
            rd_token: None,
            ad_key: None,
            pm_key: None,
            tb_token: None,
            dl_key: None,
            dl_auth: "bearer".to_string(),
            dl_endpoint: None,
            cache_minutes: 45,
            expiring_only: false,
        }
    }
}

/// Environment variable carrying the secret for a provider.
pub fn env_var(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::RealDebrid => "RD_TOKEN",
        ProviderKind::AllDebrid => "AD_KEY",
        ProviderKind::Premiumize => "PM_KEY",
        ProviderKind::TorBox => "TB_TOKEN",
        ProviderKind::DebridLink => "DL_KEY",
    }
}

/// Runs the status command.
pub async fn run(args: &StatusArgs, cli: &Cli) -> Result<()> {
    let secrets = ResolvedSecrets::from_args(args);
    let requests = build_requests(args, &secrets);
    info!(providers = requests.len(), "Checking subscriptions");

    let ttl = cache_ttl(args.cache_minutes);
    let aggregator = Aggregator::new(Arc::new(ResultCache::new()));
    let result = aggregator.fetch(&requests, ttl).await;

    if let Some(error) = &result.error {
        anyhow::bail!("aggregation failed: {error}");
    }

    let statuses = apply_filter(result.statuses, args.expiring_only);
    output_statuses(&statuses, cli)?;

    if !result.has_data {
        std::process::exit(ExitCode::NoData as i32);
    }

    Ok(())
}

/// Hard cap on the cache lifetime flag, in minutes (one day).
const MAX_CACHE_MINUTES: u64 = 1440;

/// Clamps the cache-minutes flag into its valid range and converts to a TTL.
fn cache_ttl(minutes: u64) -> Duration {
    Duration::from_secs(minutes.clamp(1, MAX_CACHE_MINUTES) * 60)
}

/// Secrets after flag/environment resolution, one slot per provider.
/// An empty slot means the provider is not configured.
#[derive(Debug, Default)]
struct ResolvedSecrets {
    rd: String,
    ad: String,
    pm: String,
    tb: String,
    dl: String,
}

impl ResolvedSecrets {
    fn from_args(args: &StatusArgs) -> Self {
        Self {
            rd: resolve_secret(args.rd_token.as_ref(), env_var(ProviderKind::RealDebrid)),
            ad: resolve_secret(args.ad_key.as_ref(), env_var(ProviderKind::AllDebrid)),
            pm: resolve_secret(args.pm_key.as_ref(), env_var(ProviderKind::Premiumize)),
            tb: resolve_secret(args.tb_token.as_ref(), env_var(ProviderKind::TorBox)),
            dl: resolve_secret(args.dl_key.as_ref(), env_var(ProviderKind::DebridLink)),
        }
    }

    fn get(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::RealDebrid => &self.rd,
            ProviderKind::AllDebrid => &self.ad,
            ProviderKind::Premiumize => &self.pm,
            ProviderKind::TorBox => &self.tb,
            ProviderKind::DebridLink => &self.dl,
        }
    }
}

/// Builds the request set: configured providers only, in canonical order.
///
/// A provider with no secret is not enabled and gets no output row; with
/// nothing configured at all the set is empty and the aggregator
/// short-circuits without touching the cache or the network.
fn build_requests(args: &StatusArgs, secrets: &ResolvedSecrets) -> Vec<ProviderRequest> {
    ProviderRegistry::all()
        .iter()
        .filter(|desc| !secrets.get(desc.kind).is_empty())
        .map(|desc| {
            let secret = secrets.get(desc.kind).to_string();
            let credential = match desc.kind {
                ProviderKind::DebridLink => {
                    let mut cred =
                        Credential::new(secret).with_auth_scheme(AuthScheme::parse(&args.dl_auth));
                    if let Some(endpoint) = &args.dl_endpoint {
                        cred = cred.with_endpoint(endpoint.clone());
                    }
                    cred
                }
                _ => desc.credential(secret),
            };
            ProviderRequest::new(desc.kind, credential)
        })
        .collect()
}

/// Flag value wins over the environment; both get trimmed.
fn resolve_secret(flag: Option<&String>, var: &str) -> String {
    flag.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var(var).ok().map(|s| s.trim().to_string()))
        .unwrap_or_default()
}

/// Drops entries outside the urgent buckets when the filter is on.
fn apply_filter(statuses: Vec<ProviderStatus>, expiring_only: bool) -> Vec<ProviderStatus> {
    if !expiring_only {
        return statuses;
    }
    statuses
        .into_iter()
        .filter(|s| s.severity().is_expiring())
        .collect()
}

/// Outputs statuses in the requested format.
fn output_statuses(statuses: &[ProviderStatus], cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            let mut first = true;
            for status in statuses {
                if !first {
                    println!(); // Blank line between providers
                }
                first = false;
                println!("{}", formatter.format_status(status));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_statuses(statuses)?);
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

//! Providers command - list the known providers and their configuration.

use anyhow::Result;
use substatus_providers::ProviderRegistry;

use crate::commands::status::env_var;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the providers command.
pub fn run(cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_providers_header());
            for desc in ProviderRegistry::all() {
                let configured = secret_configured(env_var(desc.kind));
                println!("{}", formatter.format_provider_line(desc, configured));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let configured: Vec<bool> = ProviderRegistry::all()
                .iter()
                .map(|d| secret_configured(env_var(d.kind)))
                .collect();
            println!(
                "{}",
                formatter.format_providers(ProviderRegistry::all(), &configured)?
            );
        }
    }

    Ok(())
}

/// True when the environment carries a non-blank secret.
fn secret_configured(var: &str) -> bool {
    std::env::var(var).is_ok_and(|v| !v.trim().is_empty())
}

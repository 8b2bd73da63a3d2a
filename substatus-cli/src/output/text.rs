//! Text output formatting with colors.

use substatus_core::{PremiumState, ProviderStatus, Severity};
use substatus_providers::ProviderDescriptor;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats one provider's status as a block.
    pub fn format_status(&self, status: &ProviderStatus) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold(status.provider.display_name()));

        let user = status
            .username
            .as_deref()
            .map_or_else(|| "\u{2014}".to_string(), |u| self.cyan(&format!("@{u}")));
        lines.push(format!("  User:    {user}"));

        lines.push(format!("  Expires: {}", self.format_expiry(status)));
        lines.push(format!(
            "  Status:  {}",
            self.format_severity(status.severity())
        ));

        if let Some(note) = &status.note {
            let line = format!("  Note:    {note}");
            lines.push(if status.error {
                self.red(&line)
            } else {
                self.dim(&line)
            });
        }

        lines.join("\n")
    }

    /// Formats the expiry column: date plus a days countdown.
    fn format_expiry(&self, status: &ProviderStatus) -> String {
        if status.premium == PremiumState::Unknown {
            return self.dim("N/A");
        }

        let date = status
            .expires_at
            .map_or_else(|| "\u{2014}".to_string(), |d| d.format("%Y-%m-%d").to_string());

        match status.days_remaining {
            Some(days) => {
                let countdown = format!("{days} day{} left", if days == 1 { "" } else { "s" });
                format!("{date} ({})", self.color_for_days(days, &countdown))
            }
            None => date,
        }
    }

    /// Formats a severity as "emoji label".
    fn format_severity(&self, severity: Severity) -> String {
        let text = severity.to_string();
        match severity {
            Severity::Expired | Severity::Critical => self.red(&text),
            Severity::Warning => self.yellow(&text),
            Severity::Ok => self.green(&text),
        }
    }

    /// Formats provider list header.
    pub fn format_providers_header(&self) -> String {
        format!(
            "{:<14} {:<12} {:<8} {:<11} {}",
            self.bold("Provider"),
            self.bold("CLI"),
            self.bold("Auth"),
            self.bold("Configured"),
            self.bold("Endpoint")
        )
    }

    /// Formats a single provider line.
    pub fn format_provider_line(&self, desc: &ProviderDescriptor, configured: bool) -> String {
        let configured_str = if configured {
            self.green("\u{2713}")
        } else {
            self.dim("\u{2212}")
        };

        format!(
            "{:<14} {:<12} {:<8} {:<11} {}",
            desc.display_name(),
            desc.kind.cli_name(),
            desc.auth_scheme.as_str(),
            configured_str,
            self.dim(desc.endpoint)
        )
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_days(&self, days: u32, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        match Severity::from_days(days) {
            Severity::Expired | Severity::Critical => self.red(text),
            Severity::Warning => self.yellow(text),
            Severity::Ok => self.green(text),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        if self.use_colors {
            format!("{GREEN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.use_colors {
            format!("{YELLOW}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.use_colors {
            format!("{RED}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn cyan(&self, text: &str) -> String {
        if self.use_colors {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

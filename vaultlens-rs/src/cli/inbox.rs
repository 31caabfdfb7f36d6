//! Inbox command.

use crate::analytics::{analyze_inbox, InboxOptions};
use crate::cli::output::Output;
use crate::config::InboxConfig;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;

/// Build scanner options from command-line values, falling back to the config.
pub fn inbox_options(
    headings: &[String],
    min_items: Option<usize>,
    defaults: &InboxConfig,
) -> InboxOptions {
    InboxOptions {
        headings: if headings.is_empty() {
            defaults.headings.clone()
        } else {
            headings.to_vec()
        },
        min_items: min_items.unwrap_or(defaults.min_items),
    }
}

/// Print inbox sections across the vault.
pub fn inbox(vault: &Vault, options: &InboxOptions, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let analysis = analyze_inbox(&records, options);

    if analysis.high_urgency > 0 {
        output.info(&format!("{} inbox sections need urgent attention", analysis.high_urgency));
    }
    output.print(&analysis)?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbox_options_fallback() {
        let defaults = InboxConfig {
            headings: vec!["Capture".to_string()],
            min_items: 3,
        };

        let options = inbox_options(&[], None, &defaults);
        assert_eq!(options.headings, vec!["Capture"]);
        assert_eq!(options.min_items, 3);

        let options = inbox_options(&["Inbox".to_string()], Some(1), &defaults);
        assert_eq!(options.headings, vec!["Inbox"]);
        assert_eq!(options.min_items, 1);
    }
}

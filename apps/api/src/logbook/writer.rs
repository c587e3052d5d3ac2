//! Log Writer — renders a `Summary` into the fixed audit-record layout and appends it.
//!
//! The layout is consumed by downstream log parsers; keep it byte-stable.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, warn};

use crate::analysis::analyzer::Summary;
use crate::logbook::store::{LogStore, LogStoreError};

const RULE: &str = "==============================================";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returned by `read_log` when there is nothing to show.
pub const NO_LOGS_SENTINEL: &str = "No logs found yet.";

/// Renders one record. The block ends with the closing rule and a blank line.
pub fn format_record(submitter_name: &str, summary: &Summary, analyzed_on: NaiveDateTime) -> String {
    let mut lines = vec![
        RULE.to_string(),
        format!("Name       : {}", single_line(submitter_name)),
        format!("Role       : {}", single_line(&summary.role_label)),
        format!("Analyzed on: {}", analyzed_on.format(TIMESTAMP_FORMAT)),
        format!("Skill Score: {}%", summary.score),
    ];

    push_section(&mut lines, "Matched Skills for Role:", &summary.found_for_role);
    push_section(&mut lines, "Missing Skills for Role:", &summary.missing_for_role);
    push_section(&mut lines, "Soft Skills Mentioned:", &summary.found_soft);

    lines.push(RULE.to_string());
    lines.push(String::new());

    let mut block = lines.join("\n");
    block.push('\n');
    block
}

/// Control characters become spaces so a value can never start a new line.
fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn push_section(lines: &mut Vec<String>, heading: &str, skills: &[String]) {
    lines.push(heading.to_string());
    if skills.is_empty() {
        lines.push("  (none)".to_string());
    } else {
        lines.extend(skills.iter().map(|s| format!("  - {s}")));
    }
}

/// Initializes the store if needed and appends one record stamped with local time.
/// Errors are surfaced to the caller; nothing is retried.
pub async fn append_log(
    store: &dyn LogStore,
    submitter_name: &str,
    summary: &Summary,
) -> Result<(), LogStoreError> {
    store.ensure_initialized().await?;

    let block = format_record(submitter_name, summary, Local::now().naive_local());
    store.append(&block).await?;

    debug!(
        "Logged analysis for role {} (score {}%)",
        summary.role_key, summary.score
    );
    Ok(())
}

/// Full log content, trimmed. Degrades to `NO_LOGS_SENTINEL` if the store is
/// absent, empty or unreadable.
pub async fn read_log(store: &dyn LogStore) -> String {
    match store.read_all().await {
        Ok(Some(content)) if !content.trim().is_empty() => content.trim().to_string(),
        Ok(_) => NO_LOGS_SENTINEL.to_string(),
        Err(e) => {
            warn!("Failed to read log store: {e}");
            NO_LOGS_SENTINEL.to_string()
        }
    }
}

//! Console rendering of a finished session.

use colored::Colorize;
use roundtable_domain::{AggregatedResult, EXPERT_NAME, SYSTEM_NAME};

/// Format the merged transcript, references, and any failures.
pub fn render_result(result: &AggregatedResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=== Transcript ===".bold()));
    for message in &result.messages {
        if message.author == SYSTEM_NAME {
            out.push_str(&format!("{}\n", message.content.trim().dimmed()));
        } else if message.author == EXPERT_NAME {
            out.push_str(&format!(
                "{} {}\n",
                format!("{}:", message.author).green().bold(),
                message.content
            ));
        } else {
            out.push_str(&format!(
                "{} {}\n",
                format!("{}:", message.author).blue().bold(),
                message.content
            ));
        }
    }

    if !result.references.is_empty() {
        out.push_str(&format!("\n{}\n", "=== References ===".bold()));
        for (index, source) in result.references.keys().enumerate() {
            out.push_str(&format!("[{}] {}\n", index + 1, source));
        }
    }

    if !result.failures.is_empty() {
        out.push_str(&format!("\n{}\n", "=== Failed interviews ===".bold()));
        for failure in &result.failures {
            out.push_str(&format!(
                "{} {} - {}\n",
                "x".red(),
                failure.editor,
                failure.error
            ));
        }
    }

    out
}

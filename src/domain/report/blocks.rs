//! Line classifier for the generated report text.
//!
//! The narrative comes back as lightweight Markdown. Each line is classified
//! on its own by a fixed prefix rule:
//!
//! | Line                               | Block         |
//! |------------------------------------|---------------|
//! | starts with `# `                   | `Title`       |
//! | starts with `## `                  | `Section`     |
//! | starts with `### `                 | `Subsection`  |
//! | first non-space character is `\|`  | `TableRow`    |
//! | empty or whitespace only           | `Blank`       |
//! | anything else                      | `Paragraph`   |

use serde::{Deserialize, Serialize};

/// One classified line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ReportBlock {
    /// Top-level heading, marker removed.
    Title(String),
    /// Second-level heading, marker removed.
    Section(String),
    /// Third-level heading, marker removed.
    Subsection(String),
    /// Raw table line, kept verbatim.
    TableRow(String),
    Blank,
    Paragraph(String),
}

/// Classifies a single line.
pub fn classify_line(line: &str) -> ReportBlock {
    if let Some(text) = line.strip_prefix("# ") {
        ReportBlock::Title(text.to_string())
    } else if let Some(text) = line.strip_prefix("## ") {
        ReportBlock::Section(text.to_string())
    } else if let Some(text) = line.strip_prefix("### ") {
        ReportBlock::Subsection(text.to_string())
    } else if line.trim_start().starts_with('|') {
        ReportBlock::TableRow(line.to_string())
    } else if line.trim().is_empty() {
        ReportBlock::Blank
    } else {
        ReportBlock::Paragraph(line.to_string())
    }
}

/// Splits report text into lines and classifies each, preserving order.
pub fn parse_report(text: &str) -> Vec<ReportBlock> {
    text.lines().map(classify_line).collect()
}

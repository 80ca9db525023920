//! Content entries for document generation.
//!
//! A document is an ordered, append-only list of [`ContentEntry`] values;
//! order is the sole layout driver. The serde representation doubles as the
//! wire contract consumed from collaborators:
//!
//! ```json
//! [
//!   {"kind": "Title", "text": "Membership Proposal"},
//!   {"kind": "Text", "text": "Company: Acme Ltda", "blankLinesAfter": 1},
//!   {"kind": "Spacer", "blankLinesAfter": 2},
//!   {"kind": "Signature"}
//! ]
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One typed content block in the document's entry list.
///
/// Title, Heading and Text carry a string payload plus an optional number of
/// blank lines to append after their wrapped lines. Spacer only advances the
/// cursor. Signature carries no payload; it marks where the attached
/// signature image is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum ContentEntry {
    /// Document title, rendered bold at the title size.
    Title {
        /// Text payload.
        text: String,
        /// Blank lines appended after the wrapped lines.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        blank_lines_after: Option<u32>,
    },
    /// Section heading, rendered bold at the heading size.
    Heading {
        /// Text payload.
        text: String,
        /// Blank lines appended after the wrapped lines.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        blank_lines_after: Option<u32>,
    },
    /// Body text, rendered regular at the body size.
    Text {
        /// Text payload.
        text: String,
        /// Blank lines appended after the wrapped lines.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        blank_lines_after: Option<u32>,
    },
    /// Vertical gap of the given number of blank lines.
    Spacer {
        /// Blank lines to advance the cursor by.
        blank_lines_after: u32,
    },
    /// Placement marker for the attached signature image.
    Signature,
}

impl ContentEntry {
    /// Text payload, if this entry carries one.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentEntry::Title { text, .. }
            | ContentEntry::Heading { text, .. }
            | ContentEntry::Text { text, .. } => Some(text),
            ContentEntry::Spacer { .. } | ContentEntry::Signature => None,
        }
    }

    /// Blank lines appended after this entry's own content.
    pub fn blank_lines_after(&self) -> u32 {
        match self {
            ContentEntry::Title { blank_lines_after, .. }
            | ContentEntry::Heading { blank_lines_after, .. }
            | ContentEntry::Text { blank_lines_after, .. } => blank_lines_after.unwrap_or(0),
            ContentEntry::Spacer { blank_lines_after } => *blank_lines_after,
            ContentEntry::Signature => 0,
        }
    }
}

/// Parse an ordered entry list from a collaborator's JSON payload.
pub fn entries_from_json(json: &str) -> Result<Vec<ContentEntry>> {
    Ok(serde_json::from_str(json)?)
}

//! Content parser — splits a hooks result into selectable items.
//!
//! The hooks prompt asks the model for a numbered list. That request and this
//! parser share one output grammar, version [`LIST_GRAMMAR_VERSION`]:
//!
//! ```text
//! content = preamble? item*
//! item    = marker body
//! marker  = line-start DIGIT+ ("." | ")") (" " | "\t")
//! body    = any text, across lines, up to the next marker or end of text
//! ```
//!
//! Anything before the first marker is dropped. Content that does not match
//! the grammar is not an error: it is shown as a plain document.

use std::sync::LazyLock;

use hookstudio_core::studio::{Mode, ParsedItem};
use regex_lite::Regex;

/// Version of the numbered-list contract between prompt and parser.
pub const LIST_GRAMMAR_VERSION: u32 = 1;

/// The formatting instruction the hooks prompt embeds.
pub const NUMBERED_LIST_INSTRUCTION: &str =
    "IMPORTANTE: Formate a saída como uma lista numerada simples (1., 2., 3...).";

static MARKER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9]+[.)][ \t]").ok());

/// How a result should be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering<'a> {
    /// One undifferentiated block of text
    Document(&'a str),
    /// Discrete numbered entries the user can pick from
    Items(Vec<ParsedItem>),
}

/// Numbered items in `content`, for modes that produce lists.
///
/// Only hooks results are split; every other mode, and empty content,
/// yields an empty list.
pub fn parse(mode: Mode, content: &str) -> Vec<ParsedItem> {
    if mode != Mode::Hooks || content.trim().is_empty() {
        return Vec::new();
    }
    split_numbered(content)
}

/// Decide whether `content` is shown as items or as a document.
pub fn classify(mode: Mode, content: &str) -> Rendering<'_> {
    let items = parse(mode, content);
    if items.is_empty() {
        Rendering::Document(content)
    } else {
        Rendering::Items(items)
    }
}

/// Split `content` at every line that opens with a list marker.
fn split_numbered(content: &str) -> Vec<ParsedItem> {
    let Some(marker) = MARKER.as_ref() else {
        return Vec::new();
    };

    let mut starts = Vec::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if marker.is_match(line) {
            starts.push(offset);
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(position, &start)| {
            let end = starts.get(position + 1).copied().unwrap_or(content.len());
            ParsedItem {
                position,
                text: content[start..end].trim().to_string(),
            }
        })
        .collect()
}

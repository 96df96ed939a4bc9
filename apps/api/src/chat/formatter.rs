//! Response Formatter — turns scored chunks into one length-bounded answer.
//!
//! Truncation always lands on a sentence boundary when one fits, otherwise on
//! a word boundary followed by an ellipsis. Lengths are counted in characters,
//! never bytes, so multi-byte text is never split.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chat::suggestions::follow_ups;
use crate::retrieval::intent::Intent;
use crate::retrieval::scoring::ScoredChunk;

/// The one answer given whenever nothing relevant was found.
pub const NOT_FOUND: &str = "I don't have that information yet.";

const BRIEF_BUDGET: usize = 280;
const NORMAL_BUDGET: usize = 600;
const DETAILED_BUDGET: usize = 800;
const DETAILED_MAX_LINES: usize = 4;
const DETAILED_CLOSING: &str = "There's more I can share if you'd like to dig deeper.";
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    Brief,
    #[default]
    Normal,
    Detailed,
}

impl ResponseMode {
    /// Character budget for the rendered answer.
    pub fn budget(&self) -> usize {
        match self {
            ResponseMode::Brief => BRIEF_BUDGET,
            ResponseMode::Normal => NORMAL_BUDGET,
            ResponseMode::Detailed => DETAILED_BUDGET,
        }
    }
}

impl FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brief" => Ok(ResponseMode::Brief),
            "normal" => Ok(ResponseMode::Normal),
            "detailed" => Ok(ResponseMode::Detailed),
            other => Err(format!("unknown response mode '{other}'")),
        }
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseMode::Brief => "brief",
            ResponseMode::Normal => "normal",
            ResponseMode::Detailed => "detailed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedAnswer {
    pub answer: String,
    pub suggestions: Vec<String>,
}

impl FormattedAnswer {
    pub fn not_found() -> Self {
        Self {
            answer: NOT_FOUND.to_string(),
            suggestions: Vec::new(),
        }
    }
}

/// Renders the chunks (already in score order) under the mode's rules.
pub fn format_response(
    chunks: &[ScoredChunk],
    mode: ResponseMode,
    intent: &Intent,
) -> FormattedAnswer {
    if chunks.is_empty() {
        return FormattedAnswer::not_found();
    }

    let raw = chunks
        .iter()
        .map(|c| c.chunk.content.trim())
        .collect::<Vec<_>>()
        .join(" ");

    let answer = match mode {
        ResponseMode::Brief | ResponseMode::Normal => fit_sentences(&raw, mode.budget()),
        ResponseMode::Detailed => bullet_lines(&raw),
    };

    FormattedAnswer {
        answer,
        suggestions: follow_ups(intent),
    }
}

/// Longest run of leading whole sentences within `budget`, or a word-boundary
/// cut with an ellipsis when not even the first sentence fits.
fn fit_sentences(text: &str, budget: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;

    for sentence in split_sentences(text) {
        let len = sentence.chars().count();
        let needed = if out.is_empty() { len } else { used + 1 + len };
        if needed > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(sentence);
        used = needed;
    }

    if out.is_empty() {
        truncate_words(text, budget)
    } else {
        out
    }
}

/// Up to four "• sentence" lines, plus a closing remark when content was cut.
fn bullet_lines(text: &str) -> String {
    let sentences = split_sentences(text);
    let line_budget = DETAILED_BUDGET - DETAILED_CLOSING.chars().count() - 1;

    let mut lines: Vec<String> = Vec::new();
    let mut used = 0usize;
    let mut truncated = sentences.len() > DETAILED_MAX_LINES;

    for sentence in sentences.iter().take(DETAILED_MAX_LINES) {
        let separator = usize::from(!lines.is_empty());
        let remaining = line_budget.saturating_sub(used + separator);
        // "• " prefix plus at least a word and the ellipsis
        if remaining < 8 {
            truncated = true;
            break;
        }

        let body_budget = remaining - 2;
        let body = if sentence.chars().count() > body_budget {
            truncated = true;
            truncate_words(sentence, body_budget)
        } else {
            sentence.to_string()
        };

        let line = format!("• {body}");
        used += separator + line.chars().count();
        lines.push(line);

        if body.ends_with(ELLIPSIS) {
            break;
        }
    }

    let mut out = lines.join("\n");
    if truncated {
        out.push('\n');
        out.push_str(DETAILED_CLOSING);
    }
    out
}

/// Splits after '.', '!' or '?' when followed by whitespace or the end.
/// A period after a single letter ("A. Berger") is an initial, not a boundary.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();
    let mut word_len = 0usize;
    let mut prev = ' ';

    while let Some((idx, c)) = chars.next() {
        if c.is_whitespace() {
            word_len = 0;
            prev = c;
            continue;
        }

        let at_break = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        let is_terminal = match c {
            '!' | '?' => true,
            '.' => !(word_len == 1 && prev.is_alphabetic()),
            _ => false,
        };
        word_len += 1;
        prev = c;

        if is_terminal && at_break {
            let end = idx + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Cuts `text` to at most `budget` characters including a trailing ellipsis,
/// backing off to the previous word boundary.
fn truncate_words(text: &str, budget: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= budget {
        return text.to_string();
    }
    if budget == 0 {
        return String::new();
    }

    let keep = budget - 1;
    let cut = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(idx, _)| idx);
    let head = &text[..cut];

    // Only back off when the cut landed inside a word
    let next_is_space = text[cut..].starts_with(char::is_whitespace);
    let head = if next_is_space {
        head
    } else {
        head.rfind(char::is_whitespace).map_or(head, |ws| &head[..ws])
    };

    let dangling = |c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '–' | '-');
    let head = head.trim_end_matches(dangling);
    format!("{head}{ELLIPSIS}")
}

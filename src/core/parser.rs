//! Commit message grammar.
//!
//! Each line of a commit message is read as
//!
//! ```text
//! [verb] <board words...> card <card number> [message words...]
//! ```
//!
//! The optional leading verb is looked up in the [`VerbRegistry`] and turns into a
//! list move. The card number token has every non-digit stripped, so `3:` and `#3`
//! both address card 3.

use crate::core::verbs::VerbRegistry;
use crate::domain::model::Comment;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const CARD_MARKER: &str = "card";

static LINE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Why a single line did not produce a comment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("line is blank")]
    Blank,

    /// No `card` token, or nothing in front of it to name a board.
    #[error("no board marker in line '{line}'")]
    NoBoardMarker { line: String },

    #[error("poorly formatted line '{line}': {reason}")]
    Malformed { line: String, reason: String },
}

impl LineError {
    /// 找不到看板標記時，同一則訊息的後續行都不再處理
    pub fn stops_message(&self) -> bool {
        matches!(self, LineError::NoBoardMarker { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageParser {
    verbs: VerbRegistry,
}

impl MessageParser {
    pub fn new(verbs: VerbRegistry) -> Self {
        Self { verbs }
    }

    pub fn set_verbs(&mut self, verbs: VerbRegistry) {
        self.verbs = verbs;
    }

    /// Parse every line of a commit message.
    ///
    /// Blank and malformed lines are skipped. A line without a board marker ends
    /// parsing of the message; comments from earlier lines are kept.
    pub fn parse_commit_message(&self, text: &str) -> Vec<Comment> {
        let mut comments = Vec::new();
        // 結尾的空行 (git 訊息的換行) 不算格式問題
        let body = text.trim_end();
        if body.len() < text.len() {
            tracing::debug!("Ignoring trailing blank lines of commit message");
        }
        if body.is_empty() {
            return comments;
        }

        for line in LINE_SEPARATOR.split(body) {
            match self.parse_line(line) {
                Ok(comment) => comments.push(comment),
                Err(LineError::Blank) => {
                    tracing::warn!("Skipping blank line inside commit message");
                }
                Err(err @ LineError::Malformed { .. }) => {
                    tracing::warn!("Caught poorly formatted message: {} ({})", line, err);
                }
                Err(err) => {
                    debug_assert!(err.stops_message());
                    tracing::debug!("Stopped parsing commit message: {}", err);
                    break;
                }
            }
        }

        comments
    }

    pub fn parse_line(&self, line: &str) -> Result<Comment, LineError> {
        let mut tokens: Vec<&str> = line.split_whitespace().collect();
        let first = match tokens.first() {
            Some(first) => *first,
            None => return Err(LineError::Blank),
        };

        let list_name = self.verbs.lookup(first).map(str::to_string);
        if list_name.is_some() {
            tokens.remove(0);
        }

        let card_index = tokens
            .iter()
            .position(|token| token.to_lowercase() == CARD_MARKER)
            .ok_or_else(|| LineError::NoBoardMarker {
                line: line.to_string(),
            })?;

        let board_name = tokens[..card_index].join(" ");
        let board_name = board_name.trim();
        if board_name.is_empty() || board_name == CARD_MARKER {
            return Err(LineError::NoBoardMarker {
                line: line.to_string(),
            });
        }

        let id_token = tokens
            .get(card_index + 1)
            .ok_or_else(|| LineError::Malformed {
                line: line.to_string(),
                reason: "missing card number".to_string(),
            })?;
        let card_id = parse_card_id(id_token).ok_or_else(|| LineError::Malformed {
            line: line.to_string(),
            reason: format!("'{}' is not a card number", id_token),
        })?;

        let message = tokens[card_index + 2..].join(" ");

        Ok(Comment::new(board_name, card_id, message.trim(), list_name))
    }
}

/// Strip everything but ASCII digits and read what is left.
pub fn parse_card_id(token: &str) -> Option<u32> {
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

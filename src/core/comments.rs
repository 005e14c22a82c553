use crate::core::parser::MessageParser;
use crate::domain::model::{Comment, Commit};

/// Parse a commit's message and stamp each comment with the commit's author and revision.
pub fn construct_comments(parser: &MessageParser, commit: &Commit) -> Vec<Comment> {
    parser
        .parse_commit_message(&commit.message)
        .into_iter()
        .map(|comment| comment.stamped(commit))
        .collect()
}

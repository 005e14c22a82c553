use crate::domain::model::Comment;

/// Renders a comment into the text posted on a card.
pub trait CommentFormat: Send + Sync {
    fn render(&self, comment: &Comment) -> String;
}

/// `{revision}:{author} - {message}`
#[derive(Debug, Clone, Copy, Default)]
pub struct RevisionAuthorFormat;

impl CommentFormat for RevisionAuthorFormat {
    fn render(&self, comment: &Comment) -> String {
        format!(
            "{}:{} - {}",
            comment.revision, comment.author, comment.message
        )
    }
}

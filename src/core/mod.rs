pub mod comments;
pub mod format;
pub mod parser;
pub mod sync;
pub mod verbs;

pub use crate::domain::model::{Board, BoardList, Card, Comment, Commit, DispatchReport};
pub use crate::domain::ports::{BoardService, CommitSource};
pub use crate::utils::error::Result;

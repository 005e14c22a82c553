use crate::domain::model::{Board, BoardList, Card, Commit};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Version-control log access.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Commits with a timestamp strictly after `since`, in the source's own order.
    async fn fetch_commits_since(&self, since: DateTime<Utc>) -> Result<Vec<Commit>>;
}

/// Task-board access. Authentication happens when the implementation is built.
#[async_trait]
pub trait BoardService: Send + Sync {
    /// First board whose name matches exactly.
    async fn find_board_by_name(&self, name: &str) -> Result<Option<Board>>;

    async fn cards_for_board(&self, board: &Board) -> Result<Vec<Card>>;

    async fn add_comment(&self, card: &Card, text: &str) -> Result<()>;

    async fn lists_for_board(&self, board: &Board) -> Result<Vec<BoardList>>;

    async fn move_card(&self, card: &Card, list: &BoardList) -> Result<()>;
}

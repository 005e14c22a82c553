use crate::core::comments::construct_comments;
use crate::core::format::{CommentFormat, RevisionAuthorFormat};
use crate::core::parser::MessageParser;
use crate::core::verbs::VerbRegistry;
use crate::domain::model::{BoardList, Card, Comment, DispatchReport};
use crate::domain::ports::{BoardService, CommitSource};
use crate::utils::error::{Result, SyncError};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// What to do when a board, card or list cannot be resolved during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardFailurePolicy {
    /// Stop the run with the resolution error.
    #[default]
    Abort,
    /// Log it, record the board as failed and go on with the next board.
    Skip,
}

impl std::str::FromStr for BoardFailurePolicy {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "abort" => Ok(BoardFailurePolicy::Abort),
            "skip" => Ok(BoardFailurePolicy::Skip),
            other => Err(SyncError::InvalidConfigValueError {
                field: "error_handling.on_board_failure".to_string(),
                value: other.to_string(),
                reason: "Valid values: abort, skip".to_string(),
            }),
        }
    }
}

/// Fetches commits, turns their messages into comments and pushes them to the board service.
///
/// One engine instance is one run: comments accumulate across `check_commits`
/// calls and `push_comments` posts everything accumulated so far.
pub struct SyncEngine<S: CommitSource, B: BoardService> {
    source: S,
    boards: B,
    parser: MessageParser,
    format: Box<dyn CommentFormat>,
    failure_policy: BoardFailurePolicy,
    lookback: Duration,
    comments: Vec<Comment>,
}

impl<S: CommitSource, B: BoardService> SyncEngine<S, B> {
    pub fn new(source: S, boards: B) -> Self {
        Self {
            source,
            boards,
            parser: MessageParser::default(),
            format: Box::new(RevisionAuthorFormat),
            failure_policy: BoardFailurePolicy::default(),
            lookback: Duration::hours(1),
            comments: Vec::new(),
        }
    }

    pub fn with_verbs(mut self, verbs: VerbRegistry) -> Self {
        self.parser.set_verbs(verbs);
        self
    }

    pub fn with_format<F: CommentFormat + 'static>(mut self, format: F) -> Self {
        self.format = Box::new(format);
        self
    }

    pub fn with_failure_policy(mut self, policy: BoardFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// 未指定起始時間時往回看多久
    pub fn with_lookback(mut self, lookback: Duration) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn set_verbs(&mut self, verbs: VerbRegistry) {
        self.parser.set_verbs(verbs);
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Load commits newer than `since` (default: now minus the lookback) and
    /// accumulate the comments found in their messages.
    pub async fn check_commits(&mut self, since: Option<DateTime<Utc>>) -> Result<usize> {
        let since = match since {
            Some(since) => since,
            None => Utc::now()
                .checked_sub_signed(self.lookback)
                .ok_or_else(|| SyncError::ConfigValidationError {
                    field: "sync.since_hours".to_string(),
                    message: format!("lookback of {} is out of range", self.lookback),
                })?,
        };
        tracing::info!("Loading commits committed since {}...", since);

        let commits = self.source.fetch_commits_since(since).await?;
        tracing::debug!("Fetched {} commits", commits.len());

        let before = self.comments.len();
        for commit in &commits {
            tracing::info!(
                "Found commit from {} by {}",
                commit.timestamp,
                commit.author_name
            );
            self.comments
                .extend(construct_comments(&self.parser, commit));
        }

        let added = self.comments.len() - before;
        tracing::info!("Parsed {} comments from {} commits", added, commits.len());
        Ok(added)
    }

    /// Push accumulated comments, one board at a time, oldest revision first.
    pub async fn push_comments(&self) -> Result<DispatchReport> {
        let mut report = DispatchReport::default();

        for (board_name, comments) in group_by_board(&self.comments) {
            match self.dispatch_board(board_name, &comments, &mut report).await {
                Ok(()) => report.boards_dispatched.push(board_name.to_string()),
                Err(e)
                    if e.is_resolution_failure()
                        && self.failure_policy == BoardFailurePolicy::Skip =>
                {
                    tracing::error!("Skipping the rest of the {} board: {}", board_name, e);
                    report.failed_boards.push(board_name.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    pub async fn run(&mut self, since: Option<DateTime<Utc>>) -> Result<DispatchReport> {
        tracing::info!("Starting commit sync...");

        self.check_commits(since).await?;

        tracing::info!("Pushing {} comments...", self.comments.len());
        let report = self.push_comments().await?;
        tracing::info!(
            "Posted {} comments and moved {} cards across {} boards",
            report.comments_posted,
            report.cards_moved,
            report.boards_dispatched.len()
        );

        Ok(report)
    }

    async fn dispatch_board(
        &self,
        board_name: &str,
        comments: &[&Comment],
        report: &mut DispatchReport,
    ) -> Result<()> {
        let board = self
            .boards
            .find_board_by_name(board_name)
            .await?
            .ok_or_else(|| SyncError::BoardNotFound {
                board: board_name.to_string(),
            })?;

        let cards: HashMap<u32, Card> = self
            .boards
            .cards_for_board(&board)
            .await?
            .into_iter()
            .map(|card| (card.short_id, card))
            .collect();
        let mut lists: Option<Vec<BoardList>> = None;

        for comment in comments {
            let card = cards
                .get(&comment.card_id)
                .ok_or_else(|| SyncError::CardNotFound {
                    board: board.name.clone(),
                    card_id: comment.card_id,
                })?;

            self.boards
                .add_comment(card, &self.format.render(comment))
                .await?;
            report.comments_posted += 1;
            tracing::info!(
                "Added comment to card #{} on the {} board",
                card.short_id,
                board.name
            );

            let Some(list_name) = &comment.list_name else {
                continue;
            };
            if lists.is_none() {
                lists = Some(self.boards.lists_for_board(&board).await?);
            }
            let list = lists
                .iter()
                .flatten()
                .find(|list| &list.name == list_name)
                .ok_or_else(|| SyncError::ListNotFound {
                    board: board.name.clone(),
                    list: list_name.clone(),
                })?;

            self.boards.move_card(card, list).await?;
            report.cards_moved += 1;
            tracing::info!("Moved card #{} to {}", card.short_id, list.name);
        }

        Ok(())
    }
}

/// Group comments by board in first-seen order; each group is sorted by revision.
///
/// The sort is stable, so comments from the same revision keep their line order.
pub fn group_by_board(comments: &[Comment]) -> Vec<(&str, Vec<&Comment>)> {
    let mut groups: Vec<(&str, Vec<&Comment>)> = Vec::new();

    for comment in comments {
        match groups
            .iter_mut()
            .find(|(board, _)| *board == comment.board_name)
        {
            Some((_, group)) => group.push(comment),
            None => groups.push((comment.board_name.as_str(), vec![comment])),
        }
    }

    for (_, group) in &mut groups {
        group.sort_by_key(|comment| comment.revision);
    }

    groups
}

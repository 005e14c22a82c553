use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一行 commit 訊息解析出的指令
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub board_name: String,
    pub card_id: u32,
    pub message: String,
    /// Destination list when the line started with a registered verb.
    pub list_name: Option<String>,
    pub author: String,
    pub revision: u64,
}

impl Comment {
    pub fn new(
        board_name: impl Into<String>,
        card_id: u32,
        message: impl Into<String>,
        list_name: Option<String>,
    ) -> Self {
        Self {
            board_name: board_name.into(),
            card_id,
            message: message.into(),
            list_name: list_name.filter(|list| !list.is_empty()),
            author: String::new(),
            revision: 0,
        }
    }

    /// 以 commit 的作者與版本號標記
    pub fn stamped(mut self, commit: &Commit) -> Self {
        self.author = commit.author_name.clone();
        self.revision = commit.revision_number;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub message: String,
    pub author_name: String,
    pub revision_number: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(rename = "idShort")]
    pub short_id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: String,
    pub name: String,
}

/// 派送階段的統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub comments_posted: usize,
    pub cards_moved: usize,
    pub boards_dispatched: Vec<String>,
    pub failed_boards: Vec<String>,
}

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::SyncConfig;

pub use crate::adapters::{GitCommitSource, TrelloClient, TrelloSettings};
pub use crate::core::{
    format::{CommentFormat, RevisionAuthorFormat},
    parser::MessageParser,
    sync::{BoardFailurePolicy, SyncEngine},
    verbs::VerbRegistry,
};
pub use crate::domain::model::{Comment, Commit, DispatchReport};
pub use utils::error::{Result, SyncError};

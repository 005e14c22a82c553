// Adapters layer: concrete implementations of the domain ports.

pub mod git;
pub mod trello;

pub use git::GitCommitSource;
pub use trello::{TrelloClient, TrelloSettings};

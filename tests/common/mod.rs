#![allow(dead_code)]

use chrono::{DateTime, Utc};
use git2::{Oid, Repository, Signature, Time};
use std::path::Path;

/// 建立測試用的 git repository
pub fn init_repo(path: &Path) -> Repository {
    Repository::init(path).unwrap()
}

pub fn commit_at(repo: &Repository, author: &str, message: &str, when: DateTime<Utc>) -> Oid {
    let email = format!("{}@example.com", author.to_lowercase());
    let sig = Signature::new(author, &email, &Time::new(when.timestamp(), 0)).unwrap();

    let mut index = repo.index().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

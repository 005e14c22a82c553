use crate::domain::model::Commit;
use crate::domain::ports::CommitSource;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use git2::{ErrorCode, Oid, Repository, Sort};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_LOG_TIMEOUT: Duration = Duration::from_secs(120);

/// Reads commits from a local git repository.
///
/// Revision numbers count commits from the root in topological order, so the
/// root commit is revision 0.
#[derive(Debug, Clone)]
pub struct GitCommitSource {
    repo_path: PathBuf,
    timeout: Duration,
}

impl GitCommitSource {
    pub fn open<P: Into<PathBuf>>(repo_path: P) -> Result<Self> {
        let repo_path = repo_path.into();
        let repo = Repository::open(&repo_path).map_err(|e| SyncError::RepositoryError {
            message: format!("{}: {}", repo_path.display(), e.message()),
        })?;
        let found_at = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        tracing::info!("Found repository at {}", found_at.display());

        Ok(Self {
            repo_path,
            timeout: DEFAULT_LOG_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CommitSource for GitCommitSource {
    async fn fetch_commits_since(&self, since: DateTime<Utc>) -> Result<Vec<Commit>> {
        let path = self.repo_path.clone();
        // blocking task 無法被 abort，逾時後由旗標讓 revwalk 自行結束
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let task = tokio::task::spawn_blocking(move || read_commits_since(&path, since, &flag));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(commits)) => commits,
            Ok(Err(e)) => Err(SyncError::RepositoryError {
                message: format!("log task failed: {}", e),
            }),
            Err(_) => {
                cancelled.store(true, Ordering::Relaxed);
                Err(SyncError::RepositoryError {
                    message: format!(
                        "timed out after {:?} reading the log of {}",
                        self.timeout,
                        self.repo_path.display()
                    ),
                })
            }
        }
    }
}

/// 新的在前，與 `git log` 相同
fn read_commits_since(
    path: &Path,
    since: DateTime<Utc>,
    cancelled: &AtomicBool,
) -> Result<Vec<Commit>> {
    let repo = Repository::open(path)?;

    if let Err(e) = repo.head() {
        if e.code() == ErrorCode::UnbornBranch {
            tracing::debug!("Repository has no commits yet");
            return Ok(Vec::new());
        }
        return Err(e.into());
    }

    let mut revwalk = repo.revwalk()?;
    revwalk.push_head()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
    let oids = revwalk.collect::<std::result::Result<Vec<Oid>, git2::Error>>()?;

    let mut commits = Vec::new();
    for (revision, oid) in oids.into_iter().enumerate() {
        if cancelled.load(Ordering::Relaxed) {
            return Err(SyncError::RepositoryError {
                message: format!("log walk of {} cancelled", path.display()),
            });
        }
        let commit = repo.find_commit(oid)?;
        let seconds = commit.time().seconds();
        let timestamp =
            DateTime::from_timestamp(seconds, 0).ok_or_else(|| SyncError::RepositoryError {
                message: format!("commit {} has an invalid timestamp {}", oid, seconds),
            })?;
        if timestamp <= since {
            continue;
        }

        let author_name = commit.author().name().unwrap_or("unknown").to_string();
        commits.push(Commit {
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            author_name,
            revision_number: revision as u64,
            timestamp,
        });
    }

    commits.reverse();
    Ok(commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Signature, Time};
    use tempfile::TempDir;

    fn repo_with_commit(path: &Path) {
        let repo = Repository::init(path).unwrap();
        let sig = Signature::new("Ada", "ada@example.com", &Time::new(Utc::now().timestamp(), 0))
            .unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "Site card 1: hi", &tree, &[])
            .unwrap();
    }

    #[test]
    fn test_cancelled_walk_stops_with_repository_error() {
        let temp_dir = TempDir::new().unwrap();
        repo_with_commit(temp_dir.path());
        let since = Utc::now() - chrono::Duration::hours(1);

        let err = read_commits_since(temp_dir.path(), since, &AtomicBool::new(true)).unwrap_err();

        assert!(
            matches!(err, SyncError::RepositoryError { ref message } if message.contains("cancelled"))
        );
    }

    #[test]
    fn test_uncancelled_walk_reads_commits() {
        let temp_dir = TempDir::new().unwrap();
        repo_with_commit(temp_dir.path());
        let since = Utc::now() - chrono::Duration::hours(1);

        let commits = read_commits_since(temp_dir.path(), since, &AtomicBool::new(false)).unwrap();

        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].revision_number, 0);
    }
}

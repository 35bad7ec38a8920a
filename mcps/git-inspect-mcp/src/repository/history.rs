//! Commit history

use chrono::{DateTime, FixedOffset, Offset, SecondsFormat, Utc};
use git2::{Repository, Sort};

use crate::types::{Commit, GitResult};

/// Length of the abbreviated hash reported for each commit
pub const SHORT_SHA_LEN: usize = 7;

/// Author reported when a commit has no author name
pub const UNKNOWN_AUTHOR: &str = "Unknown";

pub(super) fn collect(repo: &Repository, limit: usize) -> GitResult<Vec<Commit>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
    if let Err(e) = revwalk.push_head() {
        if super::is_unborn(&e) {
            return Ok(Vec::new());
        }
        return Err(e.into());
    }

    revwalk
        .take(limit)
        .map(|oid| -> GitResult<Commit> {
            let commit = repo.find_commit(oid?)?;
            Ok(to_commit(&commit))
        })
        .collect()
}

/// Shape a git2 commit into the reported [`Commit`].
pub fn to_commit(commit: &git2::Commit) -> Commit {
    let mut sha = commit.id().to_string();
    sha.truncate(SHORT_SHA_LEN);

    let author = commit.author();
    let author = match String::from_utf8_lossy(author.name_bytes()) {
        name if name.is_empty() => UNKNOWN_AUTHOR.to_string(),
        name => name.into_owned(),
    };

    let message = String::from_utf8_lossy(commit.message_bytes());
    let message = message.trim().split('\n').next().unwrap_or_default().to_string();

    Commit {
        sha,
        author,
        date: format_git_time(commit.time()),
        message,
    }
}

/// ISO-8601 timestamp in the offset the time was recorded with
pub fn format_git_time(time: git2::Time) -> String {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
    DateTime::from_timestamp(time.seconds(), 0)
        .unwrap_or_default()
        .with_timezone(&offset)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}

//! Long-format `git status` text

use std::collections::HashMap;
use std::fmt::Write as _;

use git2::{BranchType, Oid, Repository, Status, StatusEntry, StatusOptions};

use crate::types::GitResult;

use super::{head_branch, head_tree, SHORT_SHA_LEN};

/// One line of a status section: `<label>:   <path>`
struct Change {
    label: &'static str,
    path: String,
}

/// Index stages present for a conflicted path
const ANCESTOR: u8 = 1;
const OURS: u8 = 2;
const THEIRS: u8 = 4;

/// A conflicted path and the stages it has in the index
struct Conflict {
    stages: u8,
    path: String,
}

#[derive(Default)]
struct Changes {
    staged: Vec<Change>,
    unstaged: Vec<Change>,
    unmerged: Vec<Conflict>,
    untracked: Vec<String>,
}

pub(super) fn render(repo: &Repository) -> GitResult<String> {
    let unborn = head_tree(repo)?.is_none();
    let changes = collect(repo)?;

    let mut out = String::new();

    match head_branch(repo)? {
        Some(branch) => {
            let _ = writeln!(out, "On branch {}", branch);
            if let Some(tracking) = tracking_line(repo, &branch) {
                let _ = writeln!(out, "{}\n", tracking);
            }
        }
        None => {
            let head = repo.head()?.peel_to_commit()?.id();
            let _ = writeln!(out, "{}", detached_line(repo, head)?);
        }
    }

    if unborn {
        out.push_str("\nNo commits yet\n\n");
    }

    if !changes.staged.is_empty() {
        out.push_str("Changes to be committed:\n");
        if unborn {
            out.push_str("  (use \"git rm --cached <file>...\" to unstage)\n");
        } else {
            out.push_str("  (use \"git restore --staged <file>...\" to unstage)\n");
        }
        write_changes(&mut out, &changes.staged, 12);
    }

    if !changes.unmerged.is_empty() {
        out.push_str("Unmerged paths:\n");
        if unborn {
            out.push_str("  (use \"git rm --cached <file>...\" to unstage)\n");
        } else {
            out.push_str("  (use \"git restore --staged <file>...\" to unstage)\n");
        }
        out.push_str(resolution_hint(&changes.unmerged));
        let unmerged: Vec<Change> = changes
            .unmerged
            .iter()
            .map(|c| Change {
                label: unmerged_label(c.stages),
                path: c.path.clone(),
            })
            .collect();
        write_changes(&mut out, &unmerged, 17);
    }

    if !changes.unstaged.is_empty() {
        out.push_str("Changes not staged for commit:\n");
        out.push_str("  (use \"git add <file>...\" to update what will be committed)\n");
        out.push_str("  (use \"git restore <file>...\" to discard changes in working directory)\n");
        write_changes(&mut out, &changes.unstaged, 12);
    }

    if !changes.untracked.is_empty() {
        out.push_str("Untracked files:\n");
        out.push_str("  (use \"git add <file>...\" to include in what will be committed)\n");
        for path in &changes.untracked {
            let _ = writeln!(out, "\t{}", path);
        }
        out.push('\n');
    }

    if changes.staged.is_empty() {
        let summary = if !changes.unstaged.is_empty() || !changes.unmerged.is_empty() {
            "no changes added to commit (use \"git add\" and/or \"git commit -a\")"
        } else if !changes.untracked.is_empty() {
            "nothing added to commit but untracked files present (use \"git add\" to track)"
        } else if unborn {
            "nothing to commit (create/copy files and use \"git add\" to track)"
        } else {
            "nothing to commit, working tree clean"
        };
        out.push_str(summary);
    }

    Ok(out.trim_end().to_string())
}

fn write_changes(out: &mut String, changes: &[Change], width: usize) {
    for change in changes {
        let label = format!("{}:", change.label);
        let _ = writeln!(out, "\t{:<width$}{}", label, change.path, width = width);
    }
    out.push('\n');
}

fn collect(repo: &Repository) -> GitResult<Changes> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .include_ignored(false)
        .include_unmodified(false)
        .renames_head_to_index(true);

    let statuses = repo.statuses(Some(&mut opts))?;
    let stages = conflict_stages(repo)?;
    let mut changes = Changes::default();

    for entry in statuses.iter() {
        let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
        let status = entry.status();

        if status.is_conflicted() {
            let stages = stages
                .get(entry.path_bytes())
                .copied()
                .unwrap_or(ANCESTOR | OURS | THEIRS);
            changes.unmerged.push(Conflict { stages, path });
            continue;
        }

        if status.is_wt_new() {
            changes.untracked.push(path);
            continue;
        }

        if let Some(label) = index_label(status) {
            let path = if status.is_index_renamed() {
                renamed_path(&entry, &path)
            } else {
                path.clone()
            };
            changes.staged.push(Change { label, path });
        }

        if let Some(label) = worktree_label(status) {
            let path = worktree_path(&entry, path);
            changes.unstaged.push(Change { label, path });
        }
    }

    Ok(changes)
}

/// Stage mask of every conflicted path in the index, keyed by path
fn conflict_stages(repo: &Repository) -> GitResult<HashMap<Vec<u8>, u8>> {
    let index = repo.index()?;
    let mut stages = HashMap::new();
    if !index.has_conflicts() {
        return Ok(stages);
    }

    for conflict in index.conflicts()? {
        let conflict = conflict?;
        let sides = [
            (conflict.ancestor, ANCESTOR),
            (conflict.our, OURS),
            (conflict.their, THEIRS),
        ];
        for (entry, bit) in sides {
            if let Some(entry) = entry {
                *stages.entry(entry.path).or_insert(0) |= bit;
            }
        }
    }
    Ok(stages)
}

fn unmerged_label(stages: u8) -> &'static str {
    match stages {
        ANCESTOR => "both deleted",
        OURS => "added by us",
        THEIRS => "added by them",
        s if s == ANCESTOR | OURS => "deleted by them",
        s if s == ANCESTOR | THEIRS => "deleted by us",
        s if s == OURS | THEIRS => "both added",
        _ => "both modified",
    }
}

/// How git tells the user to resolve the listed conflicts
fn resolution_hint(conflicts: &[Conflict]) -> &'static str {
    let both_deleted = conflicts.iter().any(|c| c.stages == ANCESTOR);
    let deleted_modified = conflicts
        .iter()
        .any(|c| c.stages == ANCESTOR | OURS || c.stages == ANCESTOR | THEIRS);

    match (both_deleted, deleted_modified) {
        (false, false) => "  (use \"git add <file>...\" to mark resolution)\n",
        (true, false) => "  (use \"git rm <file>...\" to mark resolution)\n",
        _ => "  (use \"git add/rm <file>...\" as appropriate to mark resolution)\n",
    }
}

fn index_label(status: Status) -> Option<&'static str> {
    if status.is_index_new() {
        Some("new file")
    } else if status.is_index_modified() {
        Some("modified")
    } else if status.is_index_deleted() {
        Some("deleted")
    } else if status.is_index_renamed() {
        Some("renamed")
    } else if status.is_index_typechange() {
        Some("typechange")
    } else {
        None
    }
}

fn worktree_label(status: Status) -> Option<&'static str> {
    if status.is_wt_modified() {
        Some("modified")
    } else if status.is_wt_deleted() {
        Some("deleted")
    } else if status.is_wt_typechange() {
        Some("typechange")
    } else {
        None
    }
}

/// `old -> new` for a rename staged in the index
fn renamed_path(entry: &StatusEntry<'_>, fallback: &str) -> String {
    entry
        .head_to_index()
        .and_then(|delta| {
            let old = delta.old_file().path()?;
            let new = delta.new_file().path()?;
            Some(format!("{} -> {}", old.display(), new.display()))
        })
        .unwrap_or_else(|| fallback.to_string())
}

/// Working tree side of an entry; the entry's own path is the pre-rename one.
fn worktree_path(entry: &StatusEntry<'_>, fallback: String) -> String {
    entry
        .index_to_workdir()
        .and_then(|delta| delta.new_file().path().map(|p| p.to_string_lossy().into_owned()))
        .unwrap_or(fallback)
}

/// `HEAD detached at|from <name>`, named after the checkout that detached HEAD.
///
/// "at" while HEAD is still on the commit it was detached to, "from" once it
/// has moved. Without a checkout in the reflog git has nothing to name.
fn detached_line(repo: &Repository, head: Oid) -> GitResult<String> {
    let reflog = repo.reflog("HEAD")?;
    let checkout = reflog.iter().find_map(|entry| {
        let message = entry.message()?;
        let (_, target) = message
            .strip_prefix("checkout: moving from ")?
            .rsplit_once(" to ")?;
        Some((target.to_string(), entry.id_new()))
    });

    let Some((target, detached_to)) = checkout else {
        return Ok("Not currently on any branch.".to_string());
    };

    let name = match Oid::from_str(&target) {
        Ok(oid) if target.len() == 40 => {
            let mut sha = oid.to_string();
            sha.truncate(SHORT_SHA_LEN);
            sha
        }
        _ => target,
    };

    let relation = if detached_to == head { "at" } else { "from" };
    Ok(format!("HEAD detached {} {}", relation, name))
}

/// "Your branch is ..." relative to the branch's upstream, if it has one
fn tracking_line(repo: &Repository, branch: &str) -> Option<String> {
    let local = repo.find_branch(branch, BranchType::Local).ok()?;
    let upstream = local.upstream().ok()?;
    let upstream_name = upstream.name().ok()??.to_string();

    let local_oid = local.get().target()?;
    let upstream_oid = upstream.get().target()?;
    let (ahead, behind) = repo.graph_ahead_behind(local_oid, upstream_oid).ok()?;

    let plural = |n: usize| if n == 1 { "commit" } else { "commits" };
    let line = match (ahead, behind) {
        (0, 0) => format!("Your branch is up to date with '{}'.", upstream_name),
        (ahead, 0) => format!(
            "Your branch is ahead of '{}' by {} {}.",
            upstream_name,
            ahead,
            plural(ahead)
        ),
        (0, behind) => format!(
            "Your branch is behind '{}' by {} {}, and can be fast-forwarded.",
            upstream_name,
            behind,
            plural(behind)
        ),
        (ahead, behind) => format!(
            "Your branch and '{}' have diverged,\nand have {} and {} different commits each, respectively.",
            upstream_name, ahead, behind
        ),
    };
    Some(line)
}

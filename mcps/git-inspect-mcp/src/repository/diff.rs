//! Unified diff text

use git2::{Diff, DiffFindOptions, DiffFormat, DiffOptions, Repository};

use crate::types::GitResult;

use super::head_tree;

pub(super) fn render(repo: &Repository, file_path: Option<&str>, staged: bool) -> GitResult<String> {
    let mut diff_opts = DiffOptions::new();
    if let Some(path) = file_path {
        diff_opts.pathspec(path);
    }

    let mut diff = if staged {
        // Before the first commit everything in the index is new.
        let tree = head_tree(repo)?;
        repo.diff_tree_to_index(tree.as_ref(), None, Some(&mut diff_opts))?
    } else {
        repo.diff_index_to_workdir(None, Some(&mut diff_opts))?
    };

    // git diffs with diff.renames on by default
    diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;

    patch_text(&diff)
}

/// Print `diff` the way `git diff` does, headers included, without the
/// final newline.
fn patch_text(diff: &Diff<'_>) -> GitResult<String> {
    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if let '+' | '-' | ' ' = line.origin() {
            text.push(line.origin());
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

//! Throwaway repositories for integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::path::{Path, PathBuf};

use git2::{IndexEntry, IndexTime, Oid, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

/// A fresh repository on branch `main` in a temp directory.
///
/// Commits get strictly increasing timestamps one minute apart, recorded at
/// UTC+01:00.
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: Cell<i64>,
}

pub const START_TIME: i64 = 1_700_000_000;
pub const OFFSET_MINUTES: i32 = 60;

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        Self {
            dir,
            repo,
            clock: Cell::new(START_TIME),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn stage(&self, rel: &str) {
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(rel)).unwrap();
        index.write().unwrap();
    }

    pub fn commit(&self, message: &str) -> Oid {
        self.commit_as("Test User", message)
    }

    pub fn commit_as(&self, author: &str, message: &str) -> Oid {
        let when = self.clock.get();
        self.clock.set(when + 60);
        let sig = Signature::new(author, "test@example.com", &Time::new(when, OFFSET_MINUTES)).unwrap();

        let mut index = self.repo.index().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();

        let parent = self.repo.head().ok().map(|h| h.peel_to_commit().unwrap());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    /// Write, stage and commit a single file.
    pub fn commit_file(&self, rel: &str, contents: &str, message: &str) -> Oid {
        self.write(rel, contents);
        self.stage(rel);
        self.commit(message)
    }

    /// Write a commit object by hand so author and message can hold
    /// anything, then move `main` to it.
    pub fn commit_raw(&self, author_line: &str, message: &[u8]) -> Oid {
        let mut index = self.repo.index().unwrap();
        let tree_id = index.write_tree().unwrap();

        let mut buf = format!(
            "tree {}\nauthor {}\ncommitter Test User <test@example.com> {} +0100\n\n",
            tree_id,
            author_line,
            self.clock.get()
        )
        .into_bytes();
        buf.extend_from_slice(message);

        let oid = self
            .repo
            .odb()
            .unwrap()
            .write(git2::ObjectType::Commit, &buf)
            .unwrap();
        self.repo
            .reference("refs/heads/main", oid, true, "raw commit")
            .unwrap();
        oid
    }

    /// Move a file in the working tree and stage the move.
    pub fn rename(&self, from: &str, to: &str) {
        std::fs::rename(self.path().join(from), self.path().join(to)).unwrap();
        let mut index = self.repo.index().unwrap();
        index.remove_path(Path::new(from)).unwrap();
        index.add_path(Path::new(to)).unwrap();
        index.write().unwrap();
    }

    /// Replace `rel` in the index with conflict stages 1 (ancestor), 2 (ours)
    /// and 3 (theirs); `None` leaves a stage out.
    pub fn conflict(&self, rel: &str, ancestor: Option<&str>, ours: Option<&str>, theirs: Option<&str>) {
        let mut index = self.repo.index().unwrap();
        let _ = index.remove_path(Path::new(rel));

        for (stage, contents) in [(1u16, ancestor), (2, ours), (3, theirs)] {
            let Some(contents) = contents else { continue };
            let id = self.repo.blob(contents.as_bytes()).unwrap();
            let entry = IndexEntry {
                ctime: IndexTime::new(0, 0),
                mtime: IndexTime::new(0, 0),
                dev: 0,
                ino: 0,
                mode: 0o100644,
                uid: 0,
                gid: 0,
                file_size: contents.len() as u32,
                id,
                flags: stage << 12,
                flags_extended: 0,
                path: rel.as_bytes().to_vec(),
            };
            index.add(&entry).unwrap();
        }
        index.write().unwrap();
    }

    pub fn branch(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo.branch(name, &head, false).unwrap();
    }

    pub fn detach_head(&self) {
        let oid = self.repo.head().unwrap().target().unwrap();
        self.repo.set_head_detached(oid).unwrap();
    }

    pub fn head_id(&self) -> String {
        self.repo.head().unwrap().target().unwrap().to_string()
    }
}

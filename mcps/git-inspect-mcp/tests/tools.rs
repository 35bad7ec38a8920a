//! Integration tests for the tool dispatcher, driven in-process
//!
//! Each test builds a repository on disk, starts a `GitInspectServer` on it
//! and goes through `EmbeddableMcp::call_tool` exactly as a host would.

mod common;

use common::TestRepo;
use git_inspect_mcp::{Commit, EmbeddableError, EmbeddableMcp, GitInspectServer, ServiceState};
use rmcp::model::CallToolResult;
use serde_json::json;

fn server_for(fixture: &TestRepo) -> GitInspectServer {
    GitInspectServer::new(ServiceState::initialize(fixture.path()))
}

fn text(result: &CallToolResult) -> String {
    assert!(!result.is_error.unwrap_or(false));
    assert_eq!(result.content.len(), 1);
    result.content[0].as_text().unwrap().text.clone()
}

#[tokio::test]
async fn list_branches_returns_json_array() {
    let fixture = TestRepo::new();
    fixture.commit_file("README.md", "hello\n", "Initial commit");
    fixture.branch("develop");
    let server = server_for(&fixture);

    let result = server.call_tool("list_branches", json!({})).await.unwrap();
    let mut branches: Vec<String> = serde_json::from_str(&text(&result)).unwrap();
    branches.sort();

    assert_eq!(branches, ["develop", "main"]);
}

#[tokio::test]
async fn get_current_branch_returns_plain_text() {
    let fixture = TestRepo::new();
    fixture.commit_file("README.md", "hello\n", "Initial commit");
    let server = server_for(&fixture);

    let result = server.call_tool("get_current_branch", json!({})).await.unwrap();

    assert_eq!(text(&result), "main");
}

#[tokio::test]
async fn get_current_branch_fails_when_detached() {
    let fixture = TestRepo::new();
    fixture.commit_file("README.md", "hello\n", "Initial commit");
    fixture.detach_head();
    let server = server_for(&fixture);

    let err = server
        .call_tool("get_current_branch", json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, EmbeddableError::McpError(ref m) if m.contains("detached")));
}

#[tokio::test]
async fn get_status_reports_clean_tree() {
    let fixture = TestRepo::new();
    fixture.commit_file("README.md", "hello\n", "Initial commit");
    let server = server_for(&fixture);

    let result = server.call_tool("get_status", json!({})).await.unwrap();

    assert!(text(&result).ends_with("nothing to commit, working tree clean"));
}

#[tokio::test]
async fn get_commit_log_defaults_to_ten() {
    let fixture = TestRepo::new();
    for i in 0..12 {
        fixture.commit_file("n.txt", &format!("{}\n", i), &format!("Change {}", i));
    }
    let server = server_for(&fixture);

    let result = server.call_tool("get_commit_log", json!({})).await.unwrap();
    let commits: Vec<Commit> = serde_json::from_str(&text(&result)).unwrap();

    assert_eq!(commits.len(), 10);
    assert_eq!(commits[0].message, "Change 11");
    assert_eq!(commits[9].message, "Change 2");
}

#[tokio::test]
async fn get_commit_log_serializes_commit_fields() {
    let fixture = TestRepo::new();
    fixture.write("a.txt", "a\n");
    fixture.stage("a.txt");
    fixture.commit_as("Ada Lovelace", "Fix bug\n\nLonger description");
    let server = server_for(&fixture);

    let result = server
        .call_tool("get_commit_log", json!({ "limit": 1 }))
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();

    let short = fixture.head_id()[..7].to_string();
    let commit = &value[0];
    assert_eq!(commit.as_object().unwrap().len(), 4);
    assert_eq!(commit["sha"], short.as_str());
    assert_eq!(commit["author"], "Ada Lovelace");
    assert_eq!(commit["date"], "2023-11-14T23:13:20+01:00");
    assert_eq!(commit["message"], "Fix bug");
}

#[tokio::test]
async fn get_commit_log_rejects_malformed_limit() {
    let fixture = TestRepo::new();
    let server = server_for(&fixture);

    let err = server
        .call_tool("get_commit_log", json!({ "limit": "ten" }))
        .await
        .unwrap_err();

    assert!(matches!(err, EmbeddableError::InvalidParams(_)));
}

#[tokio::test]
async fn show_diff_staged_and_unstaged() {
    let fixture = TestRepo::new();
    fixture.commit_file("a.txt", "one\n", "Initial commit");
    fixture.write("a.txt", "one\ntwo\n");
    let server = server_for(&fixture);

    let unstaged = server.call_tool("show_diff", json!({})).await.unwrap();
    let staged = server
        .call_tool("show_diff", json!({ "staged": true }))
        .await
        .unwrap();

    assert!(text(&unstaged).contains("+two"));
    assert_eq!(text(&staged), "");
}

#[tokio::test]
async fn show_diff_accepts_file_path_and_path() {
    let fixture = TestRepo::new();
    fixture.commit_file("a.txt", "a\n", "Add a");
    fixture.commit_file("b.txt", "b\n", "Add b");
    fixture.write("a.txt", "a\nchanged\n");
    fixture.write("b.txt", "b\nchanged\n");
    let server = server_for(&fixture);

    for args in [json!({ "file_path": "a.txt" }), json!({ "path": "a.txt" })] {
        let result = server.call_tool("show_diff", args).await.unwrap();
        let diff = text(&result);
        assert!(diff.contains("a/a.txt"));
        assert!(!diff.contains("b.txt"));
    }
}

#[tokio::test]
async fn invalid_repository_fails_every_call_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let server = GitInspectServer::new(ServiceState::initialize(dir.path()));
    let dir_name = dir.path().file_name().unwrap().to_string_lossy().to_string();

    assert!(server.state().init_error().is_some());

    for _ in 0..2 {
        let err = server
            .call_tool("list_branches", json!({}))
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Git repository is not valid"));
        assert!(message.contains("is not a valid git repository."));
        assert!(message.contains(&dir_name));
    }
}

#[tokio::test]
async fn concurrent_calls_share_one_repository() {
    let fixture = TestRepo::new();
    fixture.commit_file("a.txt", "a\n", "Initial commit");
    let server = server_for(&fixture);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let server = server.clone();
            tokio::spawn(async move {
                let tool = if i % 2 == 0 { "get_status" } else { "get_commit_log" };
                server.call_tool(tool, json!({})).await.is_ok()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}

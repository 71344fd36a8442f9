//! Integration tests for the qb module: executor seam and text-level
//! round-trips through the decomposer.

use crate::decompose;
use crate::executor::Executor;
use crate::qb::query;

/// Executor stub that records every statement it receives.
#[derive(Default)]
struct RecordingExecutor {
    statements: Vec<String>,
    rows: u64,
}

impl Executor for RecordingExecutor {
    type Row = String;
    type Error = std::convert::Infallible;

    fn execute(&mut self, sql: &str) -> Result<u64, Self::Error> {
        self.statements.push(sql.to_string());
        Ok(self.rows)
    }

    fn query(&mut self, sql: &str) -> Result<Vec<String>, Self::Error> {
        self.statements.push(sql.to_string());
        Ok(Vec::new())
    }
}

/// Executor stub that always fails.
struct FailingExecutor;

impl Executor for FailingExecutor {
    type Row = String;
    type Error = String;

    fn execute(&mut self, _sql: &str) -> Result<u64, Self::Error> {
        Err("connection refused".to_string())
    }

    fn query(&mut self, _sql: &str) -> Result<Vec<String>, Self::Error> {
        Err("connection refused".to_string())
    }
}

#[test]
fn test_get_hands_rendered_sql_to_executor() {
    let mut executor = RecordingExecutor::default();
    query("users")
        .where_and([("id", "1")])
        .get(&mut executor, &["id", "name"], "")
        .unwrap();
    assert_eq!(
        executor.statements,
        ["SELECT id, name FROM users WHERE id = 1"]
    );
}

#[test]
fn test_insert_through_executor() {
    let mut executor = RecordingExecutor { rows: 1, ..Default::default() };
    let affected = query("users")
        .insert(&mut executor, [("name", "'alice'")])
        .unwrap();
    assert_eq!(affected, 1);
    assert_eq!(executor.statements, ["INSERT INTO users (name) VALUES ('alice')"]);
}

#[test]
fn test_update_without_filter_never_reaches_executor() {
    let mut executor = RecordingExecutor::default();
    let err = query("users")
        .update(&mut executor, [("status", "'gone'")])
        .unwrap_err();
    assert!(err.is_missing_filter());
    assert!(executor.statements.is_empty());
}

#[test]
fn test_delete_without_filter_never_reaches_executor() {
    let mut executor = RecordingExecutor::default();
    let err = query("users").delete(&mut executor).unwrap_err();
    assert!(err.is_missing_filter());
    assert!(executor.statements.is_empty());
}

#[test]
fn test_executor_failure_is_propagated() {
    let err = query("users")
        .where_and([("id", "1")])
        .delete(&mut FailingExecutor)
        .unwrap_err();
    assert_eq!(err.to_string(), "Execution error: connection refused");
}

#[test]
fn test_where_text_round_trip() {
    // Text-level round-trip only: the decomposer keeps WHERE opaque, so the
    // rendered condition text must come back verbatim, not as a filter map.
    let sql = query("users")
        .where_and([("status", "'active'"), ("age", "30")])
        .limit(10)
        .select_sql(&["id"], "");
    let parsed = decompose::decompose(&sql).unwrap();
    assert_eq!(parsed.where_clause(), Some("status = 'active' AND age = 30"));
    assert_eq!(parsed.limit(), Some(10));
}

#[test]
fn test_join_round_trip() {
    let sql = query("author")
        .inner_join("book", [("author.id", "book.author_id")])
        .where_and([("author.id", "3")])
        .select_sql(&["author.name"], "");
    let parsed = decompose::decompose(&sql).unwrap();
    let join = parsed.join().unwrap();
    assert_eq!(join.table, "book");
    assert_eq!(join.condition, ("author.id".to_string(), "book.author_id".to_string()));
    assert_eq!(parsed.where_clause(), Some("author.id = 3"));
}

//! End-to-end tests against a DuckDB file destination
//!
//! Tests the full flow: JSON folder → shaped tables → destination schema

use duckdb::Connection;
use flatload::database::{DatabaseEngine, Destination};
use flatload::engine::{FileOutcome, LoadConfig, LoadEngine, RunSummary};
use flatload::ShapeMode;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn source_folder(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in files {
        fs::write(dir.path().join(name), body).unwrap();
    }
    dir
}

/// Run a load into a DuckDB file, closing the destination afterwards
fn load_into(db: &Path, source: &Path, mode: ShapeMode) -> RunSummary {
    let mut engine = DatabaseEngine::open(&Destination::Duckdb(db.to_path_buf()), "data").unwrap();
    LoadEngine::new(LoadConfig::new(source).with_mode(mode)).run(&mut engine)
}

fn query_strings(db: &Path, sql: &str) -> Vec<String> {
    let conn = Connection::open(db).unwrap();
    let mut stmt = conn.prepare(sql).unwrap();
    stmt.query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .map(Result::unwrap)
        .collect()
}

fn column_names(db: &Path, table: &str) -> Vec<String> {
    query_strings(
        db,
        &format!(
            "SELECT column_name FROM information_schema.columns
             WHERE table_schema = 'data' AND table_name = '{table}'
             ORDER BY ordinal_position"
        ),
    )
}

// ============================================================================
// Folder Load Tests
// ============================================================================

#[test]
fn test_two_files_become_two_tables() {
    let source = source_folder(&[
        ("a.json", r#"{"content": {"1": {"name": "x", "tags": ["p", "q"]}}}"#),
        ("b.json", r#"{"content": {"k1": {"meta": {"size": 3}}, "k2": {"meta": {"size": 4}}}}"#),
    ]);
    let out = tempfile::tempdir().unwrap();
    let db = out.path().join("out.duckdb");

    let summary = load_into(&db, source.path(), ShapeMode::FlattenAll);
    assert_eq!(summary.loaded(), 2);

    assert_eq!(
        query_strings(
            &db,
            "SELECT table_name FROM information_schema.tables
             WHERE table_schema = 'data' ORDER BY table_name"
        ),
        vec!["a", "b"]
    );
    assert_eq!(column_names(&db, "a"), vec!["id", "name", "tags_0", "tags_1"]);
    assert_eq!(column_names(&db, "b"), vec!["id", "meta_size"]);

    let conn = Connection::open(&db).unwrap();
    let total: i64 = conn
        .query_row("SELECT CAST(SUM(meta_size) AS BIGINT) FROM \"data\".b", [], |row| row.get(0))
        .unwrap();
    assert_eq!(total, 7);
}

#[test]
fn test_second_run_replaces_table() {
    let out = tempfile::tempdir().unwrap();
    let db = out.path().join("out.duckdb");

    let first = source_folder(&[("t.json", r#"{"content": {"1": {"a": 1}, "2": {"a": 2}}}"#)]);
    load_into(&db, first.path(), ShapeMode::FlattenAll);

    let second = source_folder(&[("t.json", r#"{"content": {"9": {"b": "new"}}}"#)]);
    load_into(&db, second.path(), ShapeMode::FlattenAll);

    assert_eq!(column_names(&db, "t"), vec!["id", "b"]);
    assert_eq!(query_strings(&db, "SELECT id FROM \"data\".t"), vec!["9"]);
}

#[test]
fn test_description_pairs() {
    let source = source_folder(&[(
        "items.json",
        r#"{"content": {"1": "first item", "2": "second item"}}"#,
    )]);
    let out = tempfile::tempdir().unwrap();
    let db = out.path().join("out.duckdb");

    load_into(&db, source.path(), ShapeMode::IdDescriptionPairs);

    assert_eq!(column_names(&db, "items"), vec!["id", "description"]);
    assert_eq!(
        query_strings(
            &db,
            "SELECT id || ':' || description FROM \"data\".items ORDER BY id"
        ),
        vec!["1:first item", "2:second item"]
    );
}

#[test]
fn test_list_or_dict_drops_null_columns() {
    let source = source_folder(&[(
        "records.json",
        r#"{"content": [{"name": "a", "unused": null}, {"name": "b", "unused": null}]}"#,
    )]);
    let out = tempfile::tempdir().unwrap();
    let db = out.path().join("out.duckdb");

    load_into(&db, source.path(), ShapeMode::FlattenListOrDict);

    assert_eq!(column_names(&db, "records"), vec!["id", "name"]);
    assert_eq!(
        query_strings(&db, "SELECT id FROM \"data\".records ORDER BY id"),
        vec!["0", "1"]
    );
}

#[test]
fn test_bad_files_are_reported_and_skipped() {
    let source = source_folder(&[
        ("1_broken.json", "{\"content\": "),
        ("2_nocontent.json", r#"{"payload": {}}"#),
        ("3_good.json", r#"{"content": {"1": {"ok": true}}}"#),
    ]);
    let out = tempfile::tempdir().unwrap();
    let db = out.path().join("out.duckdb");

    let summary = load_into(&db, source.path(), ShapeMode::FlattenAll);

    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.skipped(), 1);
    assert_eq!(summary.loaded(), 1);
    assert!(matches!(
        summary.report_for("2_nocontent").unwrap().outcome,
        FileOutcome::Skipped { .. }
    ));
    assert_eq!(column_names(&db, "3_good"), vec!["id", "ok"]);
    assert!(column_names(&db, "2_nocontent").is_empty());
}

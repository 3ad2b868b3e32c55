//! End-to-end tests driving the built `jct` binary, per spec.md §8's
//! concrete scenarios.

use std::os::unix::fs::PermissionsExt;

use assert_cmd::Command;
use predicates::prelude::*;

fn jct() -> Command {
    Command::cargo_bin("jct").expect("jct binary built")
}

#[test]
fn get_print_and_set_round_trip_through_an_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, "{}\n").unwrap();

    jct()
        .args([path.to_str().unwrap(), "set", "server.host", "localhost"])
        .assert()
        .success();

    jct()
        .args([path.to_str().unwrap(), "get", "server.host"])
        .assert()
        .success()
        .stdout("localhost\n");

    jct()
        .args([path.to_str().unwrap(), "print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"host\": \"localhost\""));
}

#[test]
fn escape_stability_across_repeated_set_calls() {
    // Scenario 1: after `set a '"a"'` then three more `set` calls, the
    // on-disk file still contains the literal escaped substring and
    // `get a` still returns the unescaped three-byte string.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.json");
    std::fs::write(&path, "{}\n").unwrap();

    jct()
        .args([path.to_str().unwrap(), "set", "a", "\"a\""])
        .assert()
        .success();
    jct()
        .args([path.to_str().unwrap(), "set", "b", "1"])
        .assert()
        .success();
    jct()
        .args([path.to_str().unwrap(), "set", "c", "2"])
        .assert()
        .success();
    jct()
        .args([path.to_str().unwrap(), "set", "d", "3"])
        .assert()
        .success();

    jct()
        .args([path.to_str().unwrap(), "get", "a"])
        .assert()
        .success()
        .stdout("\"a\"\n");

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("\"a\": \"\\\"a\\\"\""));
}

#[test]
fn create_fails_when_file_already_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, "{}\n").unwrap();

    jct()
        .args([path.to_str().unwrap(), "create"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn create_requires_explicit_path_for_short_names() {
    let dir = tempfile::tempdir().unwrap();
    jct()
        .args(["prudynt", "create"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1);
}

#[test]
fn get_on_unresolvable_short_name_exits_not_found() {
    let dir = tempfile::tempdir().unwrap();
    jct()
        .args(["nonexistent-short-name", "get", "x"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(2);
}

#[test]
fn import_merges_source_into_target() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("target.json");
    let source = dir.path().join("source.json");
    std::fs::write(&target, r#"{"a":1,"nested":{"x":1}}"#).unwrap();
    std::fs::write(&source, r#"{"nested":{"y":2}}"#).unwrap();

    jct()
        .args([target.to_str().unwrap(), "import", source.to_str().unwrap()])
        .assert()
        .success();

    let merged = std::fs::read_to_string(&target).unwrap();
    assert!(merged.contains("\"x\": 1"));
    assert!(merged.contains("\"y\": 2"));
    assert!(merged.contains("\"a\": 1"));
}

#[test]
fn path_filters_books_by_price() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    std::fs::write(
        &path,
        r#"{"store":{"book":[
            {"title":"Sayings of the Century","author":"Nigel Rees","price":8.95},
            {"title":"Sword of Honour","author":"Evelyn Waugh","price":12.99},
            {"title":"Moby Dick","author":"Herman Melville","price":8.99},
            {"title":"The Lord of the Rings","author":"J. R. R. Tolkien","price":22.99}
        ]}}"#,
    )
    .unwrap();

    jct()
        .args([
            path.to_str().unwrap(),
            "path",
            "$.store.book[?(@.price < 10)].title",
        ])
        .assert()
        .success()
        .stdout("[\"Sayings of the Century\",\"Moby Dick\"]\n");
}

#[test]
fn path_recursive_descent_collects_authors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.json");
    std::fs::write(
        &path,
        r#"{"store":{"book":[
            {"author":"Nigel Rees"},
            {"author":"Evelyn Waugh"},
            {"author":"Herman Melville"},
            {"author":"J. R. R. Tolkien"}
        ]}}"#,
    )
    .unwrap();

    jct()
        .args([path.to_str().unwrap(), "path", "$..author"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nigel Rees").and(predicate::str::contains("Tolkien")));
}

#[test]
fn path_unwrap_single_emits_bare_scalar() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, r#"{"booleans":{"true_value":true}}"#).unwrap();

    jct()
        .args([
            path.to_str().unwrap(),
            "path",
            "$.booleans.true_value",
            "--unwrap-single",
        ])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn path_strict_mode_on_bad_expression_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, "{}").unwrap();

    jct()
        .args([path.to_str().unwrap(), "path", "not a path", "--strict"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn path_lenient_mode_swallows_bad_expression() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, "{}").unwrap();

    jct()
        .args([path.to_str().unwrap(), "path", "not a path"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn resolver_precedence_prefers_bare_name_over_dot_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("prudynt"), r#"{"x":1}"#).unwrap();
    std::fs::write(dir.path().join("prudynt.json"), r#"{"x":2}"#).unwrap();

    jct()
        .args(["prudynt", "get", "x"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn resolver_permission_denied_halts_before_later_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let bare = dir.path().join("prudynt");
    std::fs::write(&bare, r#"{"x":1}"#).unwrap();
    std::fs::set_permissions(&bare, std::fs::Permissions::from_mode(0o000)).unwrap();
    std::fs::write(dir.path().join("prudynt.json"), r#"{"x":2}"#).unwrap();

    if std::fs::File::open(&bare).is_ok() {
        // Running as root: permission bits can't be exercised here.
        return;
    }

    jct()
        .args(["prudynt", "get", "x"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(13);
}

#[test]
fn restore_requires_absolute_path() {
    jct()
        .args(["relative.json", "restore"])
        .assert()
        .failure()
        .code(5);
}

use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_exportscan")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let assert = cmd().args(args).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&output).unwrap()
}

fn temp_source(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".cpp").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// -- single files --

#[test]
fn basic_declaration_as_json() {
    let json = run_json(&[&fixture_path("basic.cpp")]);
    let foobar = &json["foobar"];
    assert_eq!(foobar["line"], 4);
    assert_eq!(foobar["return_type"]["full"], "int");
    assert_eq!(foobar["return_type"]["pointer_depth"], 0);

    let args = foobar["arguments"].as_array().unwrap();
    assert_eq!(args.len(), 5);
    assert_eq!(args[2]["name"], "z");
    assert_eq!(args[2]["type"]["full"], "const long double*");
    assert_eq!(args[2]["type"]["base"], "long double");
    assert_eq!(args[2]["type"]["pointer_depth"], 1);
    assert_eq!(args[4]["name"], "becky");
    assert_eq!(args[4]["type"]["full"], "const char* const*");
    assert_eq!(args[4]["type"]["pointer_depth"], 2);

    assert!(json.get("helper").is_none());
}

#[test]
fn templates_and_tags() {
    let json = run_json(&[&fixture_path("nested/templates.cc")]);

    let args = &json["foobar"]["arguments"];
    assert_eq!(args[2]["type"]["base"], "std::map<int, char**>");
    assert_eq!(args[3]["type"]["full"], "std::vector<double>&");
    assert_eq!(args[3]["type"]["base"], "std::vector<double>");
    assert_eq!(args[3]["type"]["reference"], "lvalue");

    let allocate = &json["allocate"];
    assert_eq!(allocate["return_type"]["tags"], serde_json::json!(["owned"]));
    assert_eq!(
        allocate["arguments"][0]["type"]["tags"],
        serde_json::json!(["numpy"])
    );
    assert_eq!(allocate["arguments"][1]["type"]["base"], "size_t");
}

// -- directories --

#[test]
fn directory_scan_skips_other_extensions() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(fixture_path("basic.cpp"), dir.path().join("basic.cpp")).unwrap();
    std::fs::copy(fixture_path("ignored.h"), dir.path().join("ignored.h")).unwrap();

    let json = run_json(&[dir.path().to_str().unwrap()]);
    assert!(json.get("foobar").is_some());
    assert!(json.get("from_header").is_none());
}

#[test]
fn custom_extensions() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(fixture_path("ignored.h"), dir.path().join("api.h")).unwrap();

    let json = run_json(&["--ext", "h", dir.path().to_str().unwrap()]);
    assert_eq!(json["from_header"]["arguments"][0]["name"], "a");
}

#[test]
fn later_file_wins_on_duplicate_name() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("a.cpp"),
        "// [[export]]\nint dup(int first) {}\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("b.cpp"),
        "// [[export]]\nint dup(int second) {}\n",
    )
    .unwrap();

    for jobs in ["1", "4"] {
        let json = run_json(&["-j", jobs, dir.path().to_str().unwrap()]);
        assert_eq!(json["dup"]["arguments"][0]["name"], "second");
        assert!(json["dup"]["source"].as_str().unwrap().ends_with("b.cpp"));
    }
}

// -- failures --

#[test]
fn truncated_source_fails_naming_the_file() {
    cmd()
        .arg(fixture_path("truncated.cpp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("truncated.cpp"))
        .stderr(predicate::str::contains("unterminated export"));
}

#[test]
fn failure_in_one_file_fails_the_run() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(fixture_path("basic.cpp"), dir.path().join("basic.cpp")).unwrap();
    std::fs::copy(fixture_path("truncated.cpp"), dir.path().join("truncated.cpp")).unwrap();

    cmd()
        .arg(dir.path().to_str().unwrap())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("truncated.cpp"));
}

#[test]
fn malformed_comment_reports_line() {
    let file = temp_source("// [[export]]\nint f(int a /x) {}\n");
    cmd()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed comment at line 2"));
}

#[test]
fn requires_paths() {
    cmd().assert().failure();
}

#[test]
fn unknown_format() {
    cmd()
        .args(["-f", "yaml"])
        .arg(fixture_path("basic.cpp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

// -- output --

#[test]
fn summary_format() {
    cmd()
        .args(["-f", "summary"])
        .arg(fixture_path("basic.cpp"))
        .assert()
        .success()
        .stdout(predicate::str::contains("foobar  ("))
        .stdout(predicate::str::contains("char***  [base=char ptr=3]"));
}

#[test]
fn writes_output_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("exports.json");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(fixture_path("basic.cpp"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["foobar"]["arguments"][0]["name"], "x");
}

#[test]
fn no_exports_gives_empty_object() {
    let file = temp_source("int plain(int a) { return a; }\n");
    let json = run_json(&[file.path().to_str().unwrap()]);
    assert_eq!(json, serde_json::json!({}));
}

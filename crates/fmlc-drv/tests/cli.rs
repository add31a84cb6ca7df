//! End-to-end tests for the fmlc binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn fml_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn beautifies_to_stdout() {
    let file = fml_file("a   {  b ;  c{d;} }");
    Command::cargo_bin("fmlc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout("a\n{\n\tb;\n\tc\n\t{\n\t\td;\n\t}\n}\n");
}

#[test]
fn normalizes_head_and_values() {
    let file = fml_file("btn.primary  #ok  label=\"Go\"  ratio=0.5;");
    Command::cargo_bin("fmlc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout("btn.primary#ok label=\"Go\" ratio=0.5;\n");
}

#[test]
fn writes_output_file() {
    let file = fml_file("x k=1;");
    let out = NamedTempFile::new().unwrap();
    Command::cargo_bin("fmlc")
        .unwrap()
        .arg(file.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout("");
    let written = std::fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, "x k=1;\n");
}

#[test]
fn reports_errors_with_source_context() {
    let file = fml_file("a k=;\n");
    Command::cargo_bin("fmlc")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected token after equal sign"))
        .stderr(predicate::str::contains("a k=;"))
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn fail_fast_stops_at_first_error() {
    let file = fml_file("@ @ @\n");
    Command::cargo_bin("fmlc")
        .unwrap()
        .arg(file.path())
        .arg("--fail-fast")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 error(s)"));
}

#[test]
fn emits_token_dump() {
    let file = fml_file("a k=1;");
    Command::cargo_bin("fmlc")
        .unwrap()
        .arg(file.path())
        .arg("--emit")
        .arg("tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("Identifier(\"a\")"))
        .stdout(predicate::str::contains("Integer(1)"))
        .stdout(predicate::str::contains("Eof"));
}

#[test]
fn emits_tree_dump() {
    let file = fml_file("a { b; }");
    Command::cargo_bin("fmlc")
        .unwrap()
        .arg(file.path())
        .arg("--emit")
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("Children"))
        .stdout(predicate::str::contains("\"b\""));
}

#[test]
fn missing_input_fails_cleanly() {
    Command::cargo_bin("fmlc")
        .unwrap()
        .arg("does-not-exist.fml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn document_bodies_survive_the_round_trip() {
    let file = fml_file("doc [==[ ]]=]==]\n");
    Command::cargo_bin("fmlc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout("doc [==[ ]]=]==]\n");
}

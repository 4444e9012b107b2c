//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write fixture");
}

/// A small tree where every non-special topic is cited.
fn clean_tree(root: &Path) {
    write(
        root,
        "src/util/prte_cmd_line.h",
        "#define PRTE_CLI_HELP \"help\"\n#define PRTE_CLI_NP \"np\"\n",
    );
    write(
        root,
        "src/util/help-prte-util.txt",
        "# Copyright (c) 2025\n\n[bad-value]\nThe value \"%s\" is bad\\; try again.\n\n[help]\nGeneric help.\n",
    );
    write(
        root,
        "src/util/util.c",
        "/* pmix_show_help(\"help-prte-util.txt\", \"ignored\") */\nint f(void)\n{\n    pmix_show_help(\"help-prte-util.txt\",\n                   \"bad-value\", true, x);\n    return 0;\n}\n",
    );
    write(
        root,
        "src/tools/prun/help-prun.txt",
        "[usage]\nprun [OPTION]...\n| -n | --np <arg> | Number of processes |\n#\n[np]\nNumber of processes to run.\n",
    );
    write(root, "src/tools/prun/prun.c", "int main(void) { return 0; }\n");
}

fn helpgen() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("helpgen"))
}

#[test]
fn test_cli_version() {
    let mut cmd = helpgen();
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("helpgen"));
}

#[test]
fn test_cli_help() {
    let mut cmd = helpgen();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--root"))
        .stdout(predicate::str::contains("--out"))
        .stdout(predicate::str::contains("--purge"))
        .stdout(predicate::str::contains("--dryrun"));
}

#[test]
fn test_root_and_out_are_required() {
    let mut cmd = helpgen();
    cmd.arg("--purge");
    cmd.assert().failure().stderr(predicate::str::contains("--root"));
}

#[test]
fn test_missing_root_exits_with_one() {
    let tmp = TempDir::new().expect("tmp");
    let out = tmp.path().join("help.c");

    let mut cmd = helpgen();
    cmd.args(["--root", tmp.path().join("missing").to_str().expect("utf8")]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert().code(1).stderr(predicate::str::contains("does not exist"));
    assert!(!out.exists());
}

#[test]
fn test_missing_option_header_exits_with_one() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    fs::remove_file(tmp.path().join("src/util/prte_cmd_line.h")).expect("rm header");
    let out = tmp.path().join("help.c");

    let mut cmd = helpgen();
    cmd.args(["--root", tmp.path().to_str().expect("utf8")]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert().code(1).stderr(predicate::str::contains("prte_cmd_line.h"));
    assert!(!out.exists());
}

#[test]
fn test_generates_tables_without_purge() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    write(tmp.path(), "src/util/help-unused.txt", "[orphan]\nNobody shows this.\n");
    let out = tmp.path().join("gen/show_help_content.c");

    let mut cmd = helpgen();
    cmd.args(["--root", tmp.path().to_str().expect("utf8")]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert().success();

    let code = fs::read_to_string(&out).expect("generated file");
    assert!(code.starts_with("// THIS FILE IS GENERATED AUTOMATICALLY! EDITS WILL BE LOST!\n"));
    assert!(code.contains("{ .topic = \"orphan\","));
    assert!(code.contains("\"The value \\\"%s\\\" is bad; try again.\","));
    assert!(code.contains("{ \"help-prun.txt\", ini_entries_0}"));
    assert!(code.contains("{ \"help-prte-util.txt\", ini_entries_1}"));
    assert!(code.contains("{ \"help-unused.txt\", ini_entries_2}"));
    assert!(code.ends_with("    { NULL, NULL }\n};\n"));
}

#[test]
fn test_generation_is_repeatable() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    let first = tmp.path().join("first.c");
    let second = tmp.path().join("second.c");

    for out in [&first, &second] {
        let mut cmd = helpgen();
        cmd.args(["--root", tmp.path().to_str().expect("utf8")]);
        cmd.args(["--out", out.to_str().expect("utf8")]);
        cmd.assert().success();
    }

    similar_asserts::assert_eq!(
        fs::read_to_string(&first).expect("first"),
        fs::read_to_string(&second).expect("second")
    );
}

#[test]
fn test_purge_passes_on_fully_cited_tree() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    let out = tmp.path().join("help.c");

    let mut cmd = helpgen();
    cmd.args(["--root", tmp.path().to_str().expect("utf8"), "--purge"]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert().success();

    let code = fs::read_to_string(&out).expect("generated file");
    assert!(code.contains("{ .topic = \"np\","));
    assert!(code.contains("{ .topic = \"bad-value\","));
    assert!(code.contains("{ .topic = \"usage\","));
}

#[test]
fn test_purge_fails_on_unused_topic() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    write(tmp.path(), "src/util/help-unused.txt", "[orphan]\nNobody shows this.\n");
    let out = tmp.path().join("help.c");

    let mut cmd = helpgen();
    cmd.args(["--root", tmp.path().to_str().expect("utf8"), "--purge"]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("unused help topic"))
        .stderr(predicate::str::contains("help-unused.txt"));
    assert!(!out.exists());
}

#[test]
fn test_purge_fails_on_duplicate_section() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    write(tmp.path(), "src/mca/help-copy.txt", "[bad-value]\nSomething else.\n");
    write(tmp.path(), "src/mca/copy.c", "pmix_show_help(\"help-copy.txt\", \"bad-value\", 1);\n");
    let out = tmp.path().join("help.c");

    let mut cmd = helpgen();
    cmd.args(["--root", tmp.path().to_str().expect("utf8"), "--purge"]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("duplicate help section with different content"));
}

#[test]
fn test_dryrun_writes_nothing() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    let out = tmp.path().join("help.c");

    let mut cmd = helpgen();
    cmd.args(["--root", tmp.path().to_str().expect("utf8"), "--dryrun"]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert().success();
    assert!(!out.exists());
}

#[test]
fn test_verbose_progress_goes_to_stdout() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    let out = tmp.path().join("help.c");

    let mut cmd = helpgen();
    cmd.env_remove("RUST_LOG");
    cmd.args(["--root", tmp.path().to_str().expect("utf8"), "--verbose"]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found tool help"))
        .stdout(predicate::str::contains("Parsed:"))
        .stdout(predicate::str::contains("CITED help-prun.txt np"))
        .stdout(predicate::str::contains("Generated C code written to"));
}

#[test]
fn test_quiet_run_prints_nothing_on_stdout() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    let out = tmp.path().join("help.c");

    let mut cmd = helpgen();
    cmd.env_remove("RUST_LOG");
    cmd.args(["--root", tmp.path().to_str().expect("utf8")]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_config_file_renames_table() {
    let tmp = TempDir::new().expect("tmp");
    clean_tree(tmp.path());
    write(tmp.path(), "helpgen.toml", "[codegen]\ntable_name = \"my_help_data\"\n");
    let out = tmp.path().join("help.c");

    let mut cmd = helpgen();
    cmd.args(["--root", tmp.path().to_str().expect("utf8")]);
    cmd.args(["--out", out.to_str().expect("utf8")]);
    cmd.assert().success();

    let code = fs::read_to_string(&out).expect("generated file");
    assert!(code.contains("pmix_show_help_file_t my_help_data[] = {"));
}

//! End-to-end tests for the `hamlet` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to run the binary with the given arguments.
fn hamlet(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hamlet"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

/// Helper to write a file, creating parent directories.
fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_single_file_next_to_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("index.haml");
    write(&src, "%p\n  - if user\n    = user.name");

    let output = hamlet(&[path_arg(&src)]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("index.html")).unwrap(),
        "<p>{% if user %}{{ user.name }}{% endif %}</p>"
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Finished converting 1 file(s)"));
}

#[test]
fn test_directory_tree_with_custom_extensions() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("views");
    let dst = dir.path().join("build");
    write(&src.join("a.haml"), "%h1 A");
    write(&src.join("nested/b.tpl"), "%h2 B");
    write(&src.join("notes.md"), "# not converted");

    let output = hamlet(&[
        path_arg(&src),
        path_arg(&dst),
        "-e",
        "haml,.tpl",
        "-o",
        "htm",
    ]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(dst.join("a.htm")).unwrap(), "<h1>A</h1>");
    assert_eq!(
        fs::read_to_string(dst.join("nested/b.htm")).unwrap(),
        "<h2>B</h2>"
    );
    assert!(!dst.join("notes.htm").exists());
}

#[test]
fn test_nested_output_directory_is_skipped() {
    let dir = TempDir::new().unwrap();
    let src = dir.path();
    let dst = src.join("out");
    write(&src.join("page.haml"), "%p page");
    write(&dst.join("stale.haml"), "%p stale");

    let output = hamlet(&[path_arg(src), path_arg(&dst)]);
    assert!(output.status.success());
    assert!(dst.join("page.html").exists());
    assert!(!dst.join("stale.html").exists());
    assert!(!dst.join("out").exists());
}

#[test]
fn test_failed_file_is_reported_and_batch_continues() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("bad.haml"), "%p\n  %a\n      %b too deep");
    write(&dir.path().join("good.haml"), "%p fine");

    let output = hamlet(&[path_arg(dir.path())]);
    assert!(!output.status.success());
    assert!(dir.path().join("good.html").exists());
    assert!(!dir.path().join("bad.html").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3"));
    assert!(stderr.contains("bad.haml"));
    assert!(stderr.contains("too much indentation"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 file(s) failed"));
}

#[test]
fn test_stdout_with_engine_choice() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("list.haml");
    write(&src, "- for x in xs\n  = x\n- empty\n  none");

    let output = hamlet(&[path_arg(&src), "--stdout", "--engine", "django"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "{% for x in xs %}{{ x }}{% empty %}none{% endfor %}"
    );
    assert!(!dir.path().join("list.html").exists());
}

#[test]
fn test_no_engine_rejects_blocks() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("page.haml");
    write(&src, "- if x\n  y");

    let output = hamlet(&[path_arg(&src), "--stdout", "--no-engine"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("requires a template engine"));
}

#[test]
fn test_tree_dump_is_json() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("page.haml");
    write(&src, "%p.lead hello");

    let output = hamlet(&[path_arg(&src), "--stdout", "--tree"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"name\": \"p\""));
    assert!(stdout.contains("\"lead\""));
    assert!(stdout.contains("\"text\": \"hello\""));
}

#[test]
fn test_missing_source() {
    let dir = TempDir::new().unwrap();
    let output = hamlet(&[path_arg(&dir.path().join("nope.haml"))]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}
